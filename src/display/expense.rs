//! Expense display formatting
//!
//! Register views and record details for the terminal. Every row shows the
//! record's ledger index, which is what `edit` and `delete` accept.

use super::{separator, truncate};
use crate::services::IndexedExpense;

/// Message shown for a ledger (or filter result) without records
pub const NO_EXPENSES: &str = "No expenses recorded yet!";

/// Format a single expense as a register row
pub fn format_expense_row(entry: &IndexedExpense, currency: &str, date_format: &str) -> String {
    let record = &entry.record;
    format!(
        "{:>4} {:10} {:24} {:16} {:>14} {:14} {}",
        entry.index,
        record.date.format(date_format),
        truncate(&record.vendor, 24),
        truncate(&record.category, 16),
        record.amount.format_with_symbol(currency),
        truncate(&record.payment_mode, 14),
        record.id.short()
    )
}

/// Format a list of expenses as a register
pub fn format_expense_register(
    entries: &[IndexedExpense],
    currency: &str,
    date_format: &str,
) -> String {
    if entries.is_empty() {
        return format!("{}\n", NO_EXPENSES);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4} {:10} {:24} {:16} {:>14} {:14} {}\n",
        "#", "Date", "Vendor", "Category", "Amount", "Payment", "ID"
    ));
    output.push_str(&separator(102));
    output.push('\n');

    for entry in entries {
        output.push_str(&format_expense_row(entry, currency, date_format));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(entry: &IndexedExpense, currency: &str, date_format: &str) -> String {
    let record = &entry.record;
    let mut output = String::new();

    output.push_str(&format!("Expense:      {}\n", record.id));
    output.push_str(&format!("Row:          {}\n", entry.index));
    output.push_str(&format!("Date:         {}\n", record.date.format(date_format)));
    output.push_str(&format!("Vendor:       {}\n", record.vendor));
    output.push_str(&format!("Category:     {}\n", record.category));
    output.push_str(&format!(
        "Amount:       {}\n",
        record.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Payment mode: {}\n", record.payment_mode));

    if !record.invoice_no.is_empty() {
        output.push_str(&format!("Invoice:      {}\n", record.invoice_no));
    }

    if !record.description.is_empty() {
        output.push_str(&format!("Description:  {}\n", record.description));
    }

    output
}
