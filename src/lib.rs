//! Expense Ledger - business expense tracking with derived summaries
//!
//! This library keeps an ordered ledger of expense records in a single file
//! and, on every save, regenerates three summaries next to it: total spend per
//! month, per category and per payment mode. The ledger can be exported as CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Home directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (money, expense records, the ledger)
//! - `storage`: Ledger files, atomic persistence and the workbook format
//! - `reports`: Monthly, category and payment-mode summaries
//! - `export`: CSV export
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expenses` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_ledger::models::{ExpenseRecord, Money};
//! use expense_ledger::reports::by_category;
//! use expense_ledger::storage::LedgerStore;
//!
//! # fn main() -> expense_ledger::ExpenseResult<()> {
//! let store = LedgerStore::open("expenses.json")?;
//! let date = ExpenseRecord::parse_date("2024-01-05")?;
//! store.append(ExpenseRecord::new(date, "Indigo", "Travel", Money::from_cents(450000), "UPI"))?;
//!
//! let totals = by_category(&store.all()?)?;
//! assert_eq!(totals.get("Travel"), Some(Money::from_cents(450000)));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
