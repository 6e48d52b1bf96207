//! The single entry point page components call.
//!
//! Every operation first awaits the configured [`LatencyStrategy`], then reads
//! the read-only [`ContentStore`] or writes the [`SubmissionLedger`], and
//! resolves to an [`Envelope`]. Failures are reported in the envelope; no
//! operation returns an `Err` or panics on a missing item.
//!
//! [`Envelope`]: crate::models::envelope::Envelope

use crate::config::PortalConfig;
use crate::helper::fixture_helpers;
use crate::helper::latency_helpers::{LatencyStrategy, NoLatency, RandomLatency};
use crate::models::db_operations::content_store_operations::{ContentStore, FixtureError};
use crate::models::db_operations::ledger_db_operations::{DbError, MemoryStorage, RedbStorage, SubmissionLedger};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub mod forms;
pub mod public;

#[derive(Error, Debug)]
pub enum PortalInitError {
    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),
    #[error("Ledger database error: {0}")]
    Ledger(#[from] DbError),
}

/// Cheap to clone; clones share the same store, ledger and latency strategy.
#[derive(Clone)]
pub struct PortalApi {
    store: Arc<ContentStore>,
    ledger: Arc<SubmissionLedger>,
    latency: Arc<dyn LatencyStrategy>,
}

impl PortalApi {
    pub fn new(store: ContentStore, ledger: SubmissionLedger, latency: impl LatencyStrategy + 'static) -> Self {
        Self {
            store: Arc::new(store),
            ledger: Arc::new(ledger),
            latency: Arc::new(latency),
        }
    }

    /// Loads fixtures, opens the durable ledger and uses randomized latency,
    /// all as configured.
    pub fn from_config(config: &PortalConfig) -> Result<Self, PortalInitError> {
        let store = match &config.fixtures_path {
            Some(dir) => fixture_helpers::store_from_dir(Path::new(dir))?,
            None => fixture_helpers::bundled_store()?,
        };
        let ledger = SubmissionLedger::new(RedbStorage::open(&config.ledger_db_path())?);
        let latency = RandomLatency::new(config.latency.min(), config.latency.max());
        log::info!(
            "Portal data layer ready: {} posts, latency {:?}..={:?}",
            store.posts().len(),
            config.latency.min(),
            config.latency.max()
        );
        Ok(Self::new(store, ledger, latency))
    }

    /// Bundled fixtures, a non-durable ledger and no latency.
    pub fn in_memory() -> Result<Self, PortalInitError> {
        Ok(Self::new(
            fixture_helpers::bundled_store()?,
            SubmissionLedger::new(MemoryStorage::new()),
            NoLatency,
        ))
    }

    pub fn with_latency(mut self, latency: impl LatencyStrategy + 'static) -> Self {
        self.latency = Arc::new(latency);
        self
    }

    async fn simulate_delay(&self) {
        self.latency.delay().await;
    }
}
