use crate::models::submission_models::{DonationStatus, DonationSummary, RecordType, SubmissionRecord};
use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

const ORG_PREFIX: &str = "MMN";

/// Lifecycle status a freshly appended record starts in, if its type has one.
pub fn initial_status(record_type: RecordType) -> Option<&'static str> {
    match record_type {
        RecordType::Donations => Some(DonationStatus::Pending.as_str()),
        _ => None,
    }
}

/// `MMN-CMP-<YYYYMMDD>-<8 upper hex>`, quoted back to complainants.
pub fn complaint_reference_id(now: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}-CMP-{}-{}",
        ORG_PREFIX,
        now.format("%Y%m%d"),
        random[..8].to_uppercase()
    )
}

/// `MMN-<YYYY>-<NNNNNN>`, one past the highest sequence issued this year.
/// `None` once the year's sequence cannot grow any further.
pub fn next_membership_id(existing: &[SubmissionRecord], now: DateTime<Utc>) -> Option<String> {
    let year_prefix = format!("{}-{}-", ORG_PREFIX, now.year());
    let highest = existing
        .iter()
        .filter_map(|r| r.membership_id.as_deref())
        .filter_map(|id| id.strip_prefix(&year_prefix))
        .filter_map(|seq| seq.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    let next = highest.checked_add(1)?;
    Some(format!("{}{:06}", year_prefix, next))
}

/// Counts donations by status; only verified donations add to the amount raised.
///
/// The ledger only ever writes `pending`. Verified and acknowledged statuses
/// are assigned by the external backend that reviews donations.
pub fn summarize_donations(donations: &[SubmissionRecord]) -> DonationSummary {
    let mut summary = DonationSummary {
        total_donations: donations.len(),
        ..DonationSummary::default()
    };
    for donation in donations {
        match donation.status.as_deref().and_then(DonationStatus::parse) {
            Some(DonationStatus::Pending) => summary.pending_donations += 1,
            Some(DonationStatus::Verified) => {
                summary.verified_donations += 1;
                summary.total_amount_raised += donation.amount().unwrap_or(0.0);
            }
            Some(DonationStatus::Acknowledged) => summary.acknowledged_donations += 1,
            None => {}
        }
    }
    summary
}
