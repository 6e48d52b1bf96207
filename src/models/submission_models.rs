use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The open field set a form hands to the ledger.
pub type Fields = Map<String, Value>;

/// Keys the ledger assigns itself; caller values under these names are replaced.
pub const DERIVED_KEYS: [&str; 5] = ["id", "submitted_at", "status", "reference_id", "membership_id"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Contacts,
    Complaints,
    Donations,
    Memberships,
}

impl RecordType {
    pub const ALL: [RecordType; 4] = [
        RecordType::Contacts,
        RecordType::Complaints,
        RecordType::Donations,
        RecordType::Memberships,
    ];

    /// The storage key this collection lives under.
    pub fn key(&self) -> &'static str {
        match self {
            RecordType::Contacts => "contacts",
            RecordType::Complaints => "complaints",
            RecordType::Donations => "donations",
            RecordType::Memberships => "memberships",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown submission type: {0}")]
pub struct UnknownRecordType(pub String);

impl FromStr for RecordType {
    type Err = UnknownRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RecordType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownRecordType(s.to_string()))
    }
}

/// A submitted form as it sits in the ledger: the caller's fields plus the
/// values assigned at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: i64,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<String>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl SubmissionRecord {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Reads `amount` whether the form sent it as a number or a numeric string.
    pub fn amount(&self) -> Option<f64> {
        match self.fields.get("amount")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationStatus {
    Pending,
    Verified,
    Acknowledged,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::Verified => "verified",
            DonationStatus::Acknowledged => "acknowledged",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DonationStatus::Pending),
            "verified" => Some(DonationStatus::Verified),
            "acknowledged" => Some(DonationStatus::Acknowledged),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonationSummary {
    pub total_donations: usize,
    pub pending_donations: usize,
    pub verified_donations: usize,
    pub acknowledged_donations: usize,
    pub total_amount_raised: f64,
}
