//! Export module
//!
//! Flattens a ledger into comma-separated text for spreadsheets and other tools.

pub mod csv;

pub use self::csv::{export_csv, write_csv};
