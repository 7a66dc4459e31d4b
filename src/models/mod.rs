//! Core data models for the expense ledger
//!
//! This module contains the data structures of the ledger domain: money
//! amounts, expense records, their identifiers and the ledger itself.

pub mod expense;
pub mod ids;
pub mod ledger;
pub mod money;

pub use expense::{parse_date_with, ExpenseRecord, ExpenseValidationError, DATE_FORMAT};
pub use ids::ExpenseId;
pub use ledger::Ledger;
pub use money::{Money, MoneyParseError};
