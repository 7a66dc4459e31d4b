//! Reports module for the expense ledger
//!
//! Derived views over a ledger snapshot. Summaries are never stored as the
//! source of truth; they are recomputed from the records whenever needed.

pub mod summary;

pub use summary::{
    by_category, by_payment_mode, monthly, Summary, SummaryBundle, SummaryEntry, SummaryKind,
};
