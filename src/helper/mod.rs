pub mod fixture_helpers;
pub mod form_helpers;
pub mod latency_helpers;
pub mod submission_helpers;
