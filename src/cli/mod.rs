//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod ledger;
pub mod summary;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs};
pub use ledger::{handle_ledger_command, LedgerCommands};
pub use summary::{handle_summary_command, SummaryCommands};
