//! Summary table formatting

use super::{separator, truncate};
use crate::reports::{Summary, SummaryBundle, SummaryKind};

use super::expense::NO_EXPENSES;

fn title(kind: SummaryKind) -> &'static str {
    match kind {
        SummaryKind::Monthly => "Monthly Spend",
        SummaryKind::Category => "Spend by Category",
        SummaryKind::PaymentMode => "Spend by Payment Mode",
    }
}

fn label_header(kind: SummaryKind) -> &'static str {
    match kind {
        SummaryKind::Monthly => "Month",
        SummaryKind::Category => "Category",
        SummaryKind::PaymentMode => "Payment Mode",
    }
}

/// Format one summary as a table with a total row
pub fn format_summary(summary: &Summary, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(title(summary.kind()));
    output.push('\n');

    if summary.is_empty() {
        output.push_str(NO_EXPENSES);
        output.push('\n');
        return output;
    }

    output.push_str(&format!(
        "{:24} {:>6} {:>16}\n",
        label_header(summary.kind()),
        "Count",
        "Amount"
    ));
    output.push_str(&separator(48));
    output.push('\n');

    for entry in summary.entries() {
        output.push_str(&format!(
            "{:24} {:>6} {:>16}\n",
            truncate(&entry.label, 24),
            entry.count,
            entry.total.format_with_symbol(currency)
        ));
    }

    output.push_str(&separator(48));
    output.push('\n');
    output.push_str(&format!(
        "{:24} {:>6} {:>16}\n",
        "Total",
        summary.entries().iter().map(|e| e.count).sum::<usize>(),
        summary.grand_total().format_with_symbol(currency)
    ));

    output
}

/// Format all three summaries, separated by blank lines
pub fn format_summary_bundle(bundle: &SummaryBundle, currency: &str) -> String {
    bundle
        .iter()
        .map(|summary| format_summary(summary, currency))
        .collect::<Vec<_>>()
        .join("\n")
}
