//! Display formatting for terminal output
//!
//! Plain-text registers, record details and summary tables.

pub mod expense;
pub mod summary;

pub use expense::{format_expense_details, format_expense_register, NO_EXPENSES};
pub use summary::{format_summary, format_summary_bundle};

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to at most `max_len` characters, ending in "..." when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
