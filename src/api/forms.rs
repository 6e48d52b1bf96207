use super::PortalApi;
use crate::helper::submission_helpers;
use crate::models::envelope::Envelope;
use crate::models::submission_models::{DonationSummary, Fields, RecordType, SubmissionRecord};

impl PortalApi {
    pub async fn submit_contact(&self, fields: Fields) -> Envelope<SubmissionRecord> {
        self.submit(RecordType::Contacts, fields).await
    }

    pub async fn submit_complaint(&self, fields: Fields) -> Envelope<SubmissionRecord> {
        self.submit(RecordType::Complaints, fields).await
    }

    pub async fn record_donation(&self, fields: Fields) -> Envelope<SubmissionRecord> {
        self.submit(RecordType::Donations, fields).await
    }

    pub async fn submit_membership(&self, fields: Fields) -> Envelope<SubmissionRecord> {
        self.submit(RecordType::Memberships, fields).await
    }

    /// Appends `fields` under `record_type` and returns the stored record.
    /// Fields are stored as given; validation belongs to the form.
    pub async fn submit(&self, record_type: RecordType, fields: Fields) -> Envelope<SubmissionRecord> {
        self.simulate_delay().await;
        match self.ledger.append(record_type, fields) {
            Ok(record) => {
                log::info!("{} submission recorded with id {}", record_type, record.id);
                Envelope::ok(record)
            }
            Err(e) => {
                log::error!("Failed to record {} submission: {}", record_type, e);
                Envelope::failure(format!("Failed to record {} submission", record_type))
            }
        }
    }

    /// Ledger contents for administrative inspection, addressed by storage
    /// key (`contacts`, `complaints`, `donations`, `memberships`).
    pub async fn list_submissions(&self, record_type: &str) -> Envelope<Vec<SubmissionRecord>> {
        match record_type.parse::<RecordType>() {
            Ok(record_type) => self.list_records(record_type).await,
            Err(e) => {
                self.simulate_delay().await;
                Envelope::failure(e.to_string())
            }
        }
    }

    pub async fn list_records(&self, record_type: RecordType) -> Envelope<Vec<SubmissionRecord>> {
        self.simulate_delay().await;
        match self.ledger.list(record_type) {
            Ok(records) => Envelope::ok(records),
            Err(e) => {
                log::error!("Failed to read {} submissions: {}", record_type, e);
                Envelope::failure(format!("Failed to read {} submissions", record_type))
            }
        }
    }

    /// Counts stored donations by status. Every donation recorded here stays
    /// `pending`; verified and acknowledged statuses come from an external
    /// backend, so only data it has written shows up in those counts.
    pub async fn donation_summary(&self) -> Envelope<DonationSummary> {
        self.simulate_delay().await;
        match self.ledger.list(RecordType::Donations) {
            Ok(donations) => Envelope::ok(submission_helpers::summarize_donations(&donations)),
            Err(e) => {
                log::error!("Failed to summarize donations: {}", e);
                Envelope::failure("Failed to summarize donations")
            }
        }
    }
}
