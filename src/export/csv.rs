//! CSV export
//!
//! Writes the ledger as comma-separated text: a header row of column names
//! followed by one row per record, in ledger order.

use std::io::Write;

use tracing::debug;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Ledger, DATE_FORMAT};
use crate::storage::workbook::EXPENSE_COLUMNS;

/// Export `ledger` to a CSV string
///
/// Returns `None` when the ledger has no records, so callers can tell
/// "nothing to export" apart from an export that happens to be short.
pub fn export_csv(ledger: &Ledger) -> ExpenseResult<Option<String>> {
    if ledger.is_empty() {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    write_csv(ledger, &mut buffer)?;

    let text = String::from_utf8(buffer)
        .map_err(|e| ExpenseError::Export(format!("Export is not valid UTF-8: {}", e)))?;
    Ok(Some(text))
}

/// Write `ledger` as CSV into `writer`, header row included
pub fn write_csv<W: Write>(ledger: &Ledger, writer: W) -> ExpenseResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(EXPENSE_COLUMNS)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    for record in ledger {
        let date = record.date.format(DATE_FORMAT).to_string();
        let amount = record.amount.to_string();
        wtr.write_record([
            date.as_str(),
            record.vendor.as_str(),
            record.category.as_str(),
            amount.as_str(),
            record.payment_mode.as_str(),
            record.invoice_no.as_str(),
            record.description.as_str(),
        ])
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    }

    wtr.flush()
        .map_err(|e| ExpenseError::Export(format!("Failed to flush export: {}", e)))?;

    debug!("Exported {} expenses as CSV", ledger.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseRecord, Money};
    use chrono::NaiveDate;

    fn record(day: u32, vendor: &str, amount: &str) -> ExpenseRecord {
        ExpenseRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            vendor,
            "Travel",
            Money::parse(amount).unwrap(),
            "Credit Card",
        )
    }

    #[test]
    fn test_empty_ledger_exports_nothing() {
        assert_eq!(export_csv(&Ledger::new()).unwrap(), None);
    }

    #[test]
    fn test_export_rows_in_ledger_order() {
        let ledger: Ledger = vec![
            record(5, "Indigo", "4500.75").with_invoice_no("INV-1"),
            record(20, "Uber", "1234567.125"),
        ]
        .into();

        let csv = export_csv(&ledger).unwrap().unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(
            lines,
            vec![
                "date,vendor,category,amount,payment_mode,invoice_no,description",
                "2024-01-05,Indigo,Travel,4500.75,Credit Card,INV-1,",
                "2024-01-20,Uber,Travel,1234567.125,Credit Card,,",
            ]
        );
    }

    #[test]
    fn test_export_quotes_special_characters() {
        let ledger: Ledger = vec![record(1, "Smith, Jones & Co", "10")
            .with_description("said \"thanks\"\nand left")]
        .into();

        let csv = export_csv(&ledger).unwrap().unwrap();

        assert!(csv.contains("\"Smith, Jones & Co\""));
        assert!(csv.contains("\"said \"\"thanks\"\"\nand left\""));

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[1], "Smith, Jones & Co");
        assert_eq!(&row[6], "said \"thanks\"\nand left");
    }

    #[test]
    fn test_write_csv_to_writer() {
        let ledger: Ledger = vec![record(3, "Cafe", "0")].into();
        let mut out = Vec::new();

        write_csv(&ledger, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("2024-01-03,Cafe,Travel,0,Credit Card,,\n"));
    }
}
