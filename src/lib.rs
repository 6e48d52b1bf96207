pub mod api;
pub mod config;
pub mod helper;
pub mod models;
pub mod setup;

pub use api::PortalApi;
pub use models::envelope::{Envelope, PageMeta};
pub use models::submission_models::{Fields, RecordType, SubmissionRecord};
