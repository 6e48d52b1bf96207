pub mod content_store_operations;
pub mod ledger_db_operations;
