use redb::{Database, ReadableTable, CommitError, StorageError, TableError, TransactionError};
use crate::models::db_operations::ledger_db_operations::SUBMISSION_LEDGER;
use crate::models::submission_models::RecordType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Redb storage error: {0}")]
    RedbStorage(#[from] StorageError),
    #[error("Redb transaction error: {0}")]
    RedbTransaction(#[from] TransactionError),
    #[error("Redb table error: {0}")]
    RedbTable(#[from] TableError),
    #[error("Redb commit error: {0}")]
    RedbCommit(#[from] CommitError),
}

/// Creates the ledger table and an empty collection for every record type
/// that has none yet. Existing collections are left untouched.
pub fn setup_ledger_db(db: &Database) -> Result<Vec<RecordType>, SetupError> {
    let mut seeded = Vec::new();
    let write_txn = db.begin_write()?;
    {
        println!("- Creating 'submission_ledger' table...");
        let mut table = write_txn.open_table(SUBMISSION_LEDGER)?;
        for record_type in RecordType::ALL {
            if table.get(record_type.key())?.is_none() {
                table.insert(record_type.key(), "[]")?;
                seeded.push(record_type);
                println!("  > Seeded empty '{}' collection", record_type);
            }
        }
    }
    write_txn.commit()?;
    Ok(seeded)
}
