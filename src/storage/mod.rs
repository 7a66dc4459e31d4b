//! Storage layer for the expense ledger
//!
//! Provides the `LedgerStore` handle, the workbook file format it persists and
//! JSON file I/O with atomic writes.

pub mod file_io;
pub mod init;
pub mod store;
pub mod workbook;

pub use file_io::{read_json_required, write_json_atomic};
pub use init::{create_ledger, initialize_storage, list_ledgers};
pub use store::{load_ledger, save_ledger, LedgerStore};
pub use workbook::{Sheet, Workbook, EXPENSE_COLUMNS};
