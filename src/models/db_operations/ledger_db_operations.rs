use redb::{Database, DatabaseError, ReadableTable, TableDefinition, CommitError, StorageError, TableError, TransactionError};
use crate::helper::submission_helpers;
use crate::models::submission_models::{Fields, RecordType, SubmissionRecord, DERIVED_KEYS};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, PoisonError, RwLock};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Redb database error: {0}")]
    RedbDatabase(#[from] DatabaseError),
    #[error("Redb storage error: {0}")]
    RedbStorage(#[from] StorageError),
    #[error("Redb transaction error: {0}")]
    RedbTransaction(#[from] TransactionError),
    #[error("Redb table error: {0}")]
    RedbTable(#[from] TableError),
    #[error("Redb commit error: {0}")]
    RedbCommit(#[from] CommitError),
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored '{key}' collection is not a JSON array: {source}")]
    MalformedCollection {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Membership number sequence exhausted for this year")]
    MembershipSequenceExhausted,
}

/// One JSON array of records per record type, keyed by `RecordType::key()`.
pub const SUBMISSION_LEDGER: TableDefinition<&str, &str> = TableDefinition::new("submission_ledger");

/// Durable key-value substrate the ledger persists through.
///
/// `set` must not return until the value is durable.
pub trait StoragePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DbError>;
    fn set(&self, key: &str, value: &str) -> Result<(), DbError>;
}

// ====================================================================
// ======================= STORAGE BACKENDS ===========================
// ====================================================================

pub struct RedbStorage {
    db: Database,
}

impl RedbStorage {
    /// Opens (or creates) the ledger database, including its parent folder
    /// and the ledger table.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        if let Some(parent_dir) = path.parent() {
            fs::create_dir_all(parent_dir)?;
        }
        let db = Database::create(path)?;
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(SUBMISSION_LEDGER)?;
        }
        write_txn.commit()?;
        log::info!("Submission ledger opened at '{}'", path.display());
        Ok(Self { db })
    }
}

impl StoragePort for RedbStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(SUBMISSION_LEDGER) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DbError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SUBMISSION_LEDGER)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// Non-durable storage for tests and `--no-delay` demo runs.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing the ledger's serialization.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DbError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DbError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ====================================================================
// ======================= SUBMISSION LEDGER ==========================
// ====================================================================

/// Append-only record collections. Every append is a read-modify-write
/// done under `last_id`'s lock, so concurrent appends never lose records.
pub struct SubmissionLedger {
    storage: Box<dyn StoragePort>,
    last_id: Mutex<i64>,
}

impl SubmissionLedger {
    pub fn new(storage: impl StoragePort + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            last_id: Mutex::new(0),
        }
    }

    /// Enriches `fields` with an id, timestamp and any type-specific values,
    /// persists the grown collection and returns the stored record.
    ///
    /// Stored entries that do not decode as records are written back
    /// untouched. A stored value that is not a JSON array at all is an error;
    /// it is never overwritten.
    pub fn append(&self, record_type: RecordType, mut fields: Fields) -> Result<SubmissionRecord, DbError> {
        // The guard is held until the collection is durable.
        let mut last_id = self.last_id.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read_entries(record_type)?;
        let records = decode_records(record_type, &entries);

        let now = Utc::now();
        let highest_stored = entries
            .iter()
            .filter_map(|entry| entry.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0);
        let id = now.timestamp_millis().max(*last_id + 1).max(highest_stored.saturating_add(1));

        for key in DERIVED_KEYS {
            fields.remove(key);
        }

        let membership_id = match record_type {
            RecordType::Memberships => Some(
                submission_helpers::next_membership_id(&records, now)
                    .ok_or(DbError::MembershipSequenceExhausted)?,
            ),
            _ => None,
        };

        let record = SubmissionRecord {
            id,
            submitted_at: now,
            status: submission_helpers::initial_status(record_type).map(str::to_string),
            reference_id: match record_type {
                RecordType::Complaints => Some(submission_helpers::complaint_reference_id(now)),
                _ => None,
            },
            membership_id,
            fields,
        };

        entries.push(serde_json::to_value(&record)?);
        let serialized = serde_json::to_string(&entries)?;
        self.storage.set(record_type.key(), &serialized)?;
        *last_id = id;

        log::debug!("Appended {} record {} ({} total)", record_type, id, entries.len());
        Ok(record)
    }

    /// Every readable record ever appended under `record_type`, oldest first.
    /// A collection that is not a JSON array reads as empty.
    pub fn list(&self, record_type: RecordType) -> Result<Vec<SubmissionRecord>, DbError> {
        let _guard = self.last_id.lock().unwrap_or_else(PoisonError::into_inner);
        match self.read_entries(record_type) {
            Ok(entries) => Ok(decode_records(record_type, &entries)),
            Err(DbError::MalformedCollection { key, source }) => {
                log::warn!("Ignoring malformed '{}' ledger data: {}", key, source);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn read_entries(&self, record_type: RecordType) -> Result<Vec<Value>, DbError> {
        let Some(raw) = self.storage.get(record_type.key())? else {
            return Ok(Vec::new());
        };
        serde_json::from_str::<Vec<Value>>(&raw).map_err(|source| DbError::MalformedCollection {
            key: record_type.key(),
            source,
        })
    }
}

fn decode_records(record_type: RecordType, entries: &[Value]) -> Vec<SubmissionRecord> {
    entries
        .iter()
        .filter_map(|entry| match SubmissionRecord::deserialize(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping unreadable '{}' ledger entry: {}", record_type, e);
                None
            }
        })
        .collect()
}
