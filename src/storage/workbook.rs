//! Workbook file format
//!
//! A ledger file is a JSON document shaped like a spreadsheet workbook: a list
//! of named sheets, each a header row plus text rows. The `Expenses` sheet is
//! the source of truth; the three summary sheets are derived from it on every
//! save and ignored on load.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date_with, ExpenseId, ExpenseRecord, Ledger, Money, DATE_FORMAT};
use crate::reports::{Summary, SummaryBundle};

/// Newest workbook schema this build reads and the one it writes
pub const WORKBOOK_SCHEMA_VERSION: u32 = 1;

/// Name of the sheet holding the expense rows
pub const EXPENSES_SHEET: &str = "Expenses";

/// Column of each amount in the summary sheets
pub const AMOUNT_COLUMN: &str = "amount";

/// Record columns, in their fixed order
pub const EXPENSE_COLUMNS: [&str; 7] = [
    "date",
    "vendor",
    "category",
    "amount",
    "payment_mode",
    "invoice_no",
    "description",
];

/// Columns a ledger must have to be loadable
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "vendor", "category", "amount", "payment_mode"];

/// Column carrying the stable record id
pub const ID_COLUMN: &str = "id";

/// One named table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn from_summary(summary: &Summary) -> Self {
        let kind = summary.kind();
        let mut sheet = Self::new(kind.sheet_name(), &[kind.key_column(), AMOUNT_COLUMN]);
        sheet.rows = summary
            .entries()
            .iter()
            .map(|e| vec![e.label.clone(), e.total.to_string()])
            .collect();
        sheet
    }
}

/// The full persisted unit: expenses plus derived summary sheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    pub schema_version: u32,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Build the workbook for `ledger`, computing every summary sheet
    pub fn from_ledger(ledger: &Ledger) -> ExpenseResult<Self> {
        let mut columns: Vec<&str> = EXPENSE_COLUMNS.to_vec();
        columns.push(ID_COLUMN);

        let mut expenses = Sheet::new(EXPENSES_SHEET, &columns);
        expenses.rows = ledger.iter().map(record_to_row).collect();

        let summaries = SummaryBundle::compute(ledger)?;

        let mut sheets = vec![expenses];
        sheets.extend(summaries.iter().map(Sheet::from_summary));

        Ok(Self {
            schema_version: WORKBOOK_SCHEMA_VERSION,
            sheets,
        })
    }

    /// Look up a sheet by name
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Rebuild the ledger from the `Expenses` sheet
    pub fn to_ledger(&self) -> ExpenseResult<Ledger> {
        if self.schema_version > WORKBOOK_SCHEMA_VERSION {
            return Err(ExpenseError::StorageRead(format!(
                "Ledger schema version {} is newer than supported version {}",
                self.schema_version, WORKBOOK_SCHEMA_VERSION
            )));
        }

        let sheet = self.sheet(EXPENSES_SHEET).ok_or_else(|| {
            ExpenseError::StorageRead(format!("Missing '{}' sheet", EXPENSES_SHEET))
        })?;

        let layout = ColumnLayout::resolve(&sheet.columns)?;
        if layout.id.is_none() && !sheet.rows.is_empty() {
            warn!("Ledger has no id column; assigning new ids to {} rows", sheet.rows.len());
        }

        let ledger = sheet
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| layout.parse_row(i, row, sheet.columns.len()))
            .collect::<ExpenseResult<Ledger>>()?;

        if let Some((i, id)) = ledger.duplicate_id() {
            return Err(ExpenseError::StorageRead(format!(
                "Row {}: id {} is used by an earlier row",
                i, id
            )));
        }

        Ok(ledger)
    }
}

fn record_to_row(record: &ExpenseRecord) -> Vec<String> {
    vec![
        record.date.format(DATE_FORMAT).to_string(),
        record.vendor.clone(),
        record.category.clone(),
        record.amount.to_string(),
        record.payment_mode.clone(),
        record.invoice_no.clone(),
        record.description.clone(),
        record.id.to_string(),
    ]
}

/// Cell positions of each known column in a sheet
struct ColumnLayout {
    date: usize,
    vendor: usize,
    category: usize,
    amount: usize,
    payment_mode: usize,
    invoice_no: Option<usize>,
    description: Option<usize>,
    id: Option<usize>,
}

impl ColumnLayout {
    fn resolve(columns: &[String]) -> ExpenseResult<Self> {
        let positions: HashMap<&str, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.trim(), i))
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !positions.contains_key(c))
            .collect();
        if !missing.is_empty() {
            return Err(ExpenseError::StorageRead(format!(
                "Incompatible schema, missing column(s): {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            date: positions["date"],
            vendor: positions["vendor"],
            category: positions["category"],
            amount: positions["amount"],
            payment_mode: positions["payment_mode"],
            invoice_no: positions.get("invoice_no").copied(),
            description: positions.get("description").copied(),
            id: positions.get(ID_COLUMN).copied(),
        })
    }

    fn parse_row(
        &self,
        index: usize,
        row: &[String],
        width: usize,
    ) -> ExpenseResult<ExpenseRecord> {
        let corrupt = |what: String| ExpenseError::StorageRead(format!("Row {}: {}", index, what));

        if row.len() != width {
            return Err(corrupt(format!(
                "expected {} cells, found {}",
                width,
                row.len()
            )));
        }

        let optional = |i: Option<usize>| i.map(|i| row[i].clone()).unwrap_or_default();

        let date_cell = row[self.date].as_str();
        let date = parse_date_with(date_cell, DATE_FORMAT)
            .map_err(|_| corrupt(format!("invalid date '{}'", date_cell)))?;
        let amount = Money::parse(&row[self.amount]).map_err(|e| corrupt(e.to_string()))?;

        let id = match self.id.map(|i| row[i].trim()).filter(|s| !s.is_empty()) {
            Some(s) => s
                .parse::<ExpenseId>()
                .map_err(|_| corrupt(format!("invalid id '{}'", s)))?,
            None => ExpenseId::new(),
        };

        let record = ExpenseRecord {
            id,
            date,
            vendor: row[self.vendor].clone(),
            category: row[self.category].clone(),
            amount,
            payment_mode: row[self.payment_mode].clone(),
            invoice_no: optional(self.invoice_no),
            description: optional(self.description),
        };

        record.validate().map_err(|e| corrupt(e.to_string()))?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn expenses_only(columns: Vec<String>, rows: Vec<Vec<String>>) -> Workbook {
        Workbook {
            schema_version: WORKBOOK_SCHEMA_VERSION,
            sheets: vec![Sheet {
                name: EXPENSES_SHEET.to_string(),
                columns,
                rows,
            }],
        }
    }

    fn sample_ledger() -> Ledger {
        vec![
            ExpenseRecord::new(
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                "Indigo",
                "Travel",
                Money::parse("100").unwrap(),
                "UPI",
            )
            .with_invoice_no("INV-1"),
            ExpenseRecord::new(
                NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
                "Cafe, Ltd",
                "Meals",
                Money::parse("20.125").unwrap(),
                "Cash",
            )
            .with_description("Team lunch"),
        ]
        .into()
    }

    #[test]
    fn test_workbook_has_all_sheets_in_order() {
        let workbook = Workbook::from_ledger(&sample_ledger()).unwrap();
        let names: Vec<_> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Expenses",
                "Monthly Summary",
                "Category Summary",
                "Payment Summary"
            ]
        );

        let monthly = workbook.sheet("Monthly Summary").unwrap();
        assert_eq!(monthly.columns, columns(&["month", "amount"]));
        assert_eq!(
            monthly.rows,
            vec![row(&["2024-01", "100"]), row(&["2024-02", "20.125"])]
        );
    }

    #[test]
    fn test_empty_ledger_writes_header_only_summaries() {
        let workbook = Workbook::from_ledger(&Ledger::new()).unwrap();
        assert_eq!(workbook.sheets.len(), 4);
        assert!(workbook.sheets.iter().all(|s| s.rows.is_empty()));
        assert!(workbook.to_ledger().unwrap().is_empty());
    }

    #[test]
    fn test_ledger_round_trip() {
        let ledger = sample_ledger();
        let workbook = Workbook::from_ledger(&ledger).unwrap();
        assert_eq!(workbook.to_ledger().unwrap(), ledger);
    }

    #[test]
    fn test_columns_matched_by_name() {
        let workbook = expenses_only(
            columns(&["amount", "payment_mode", "date", "category", "vendor", "notes"]),
            vec![row(&["12.5", "Cash", "2024-05-01", "Meals", "Deli", "ignored"])],
        );

        let ledger = workbook.to_ledger().unwrap();
        let record = ledger.get(0).unwrap();
        assert_eq!(record.vendor, "Deli");
        assert_eq!(record.amount, Money::parse("12.50").unwrap());
        assert_eq!(record.invoice_no, "");
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_missing_required_column_is_incompatible() {
        let workbook = expenses_only(
            columns(&["date", "vendor", "category", "payment_mode"]),
            Vec::new(),
        );
        let err = workbook.to_ledger().unwrap_err();
        assert!(err.is_storage_read());
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_missing_expenses_sheet() {
        let workbook = Workbook {
            schema_version: WORKBOOK_SCHEMA_VERSION,
            sheets: Vec::new(),
        };
        assert!(workbook.to_ledger().unwrap_err().is_storage_read());
    }

    #[test]
    fn test_newer_schema_rejected() {
        let mut workbook = Workbook::from_ledger(&Ledger::new()).unwrap();
        workbook.schema_version = WORKBOOK_SCHEMA_VERSION + 1;
        assert!(workbook.to_ledger().unwrap_err().is_storage_read());
    }

    #[test]
    fn test_corrupt_cells_rejected() {
        let header = columns(&REQUIRED_COLUMNS);

        let bad_date = expenses_only(
            header.clone(),
            vec![row(&["someday", "V", "Meals", "1", "Cash"])],
        );
        assert!(bad_date.to_ledger().unwrap_err().is_storage_read());

        let bad_amount = expenses_only(
            header.clone(),
            vec![row(&["2024-01-01", "V", "Meals", "lots", "Cash"])],
        );
        assert!(bad_amount.to_ledger().unwrap_err().is_storage_read());

        let negative = expenses_only(
            header.clone(),
            vec![row(&["2024-01-01", "V", "Meals", "-4", "Cash"])],
        );
        assert!(negative.to_ledger().unwrap_err().is_storage_read());

        let ragged = expenses_only(header, vec![row(&["2024-01-01", "V"])]);
        let err = ragged.to_ledger().unwrap_err();
        assert!(err.to_string().contains("Row 0"));
    }

    #[test]
    fn test_repeated_id_rejected() {
        let mut header = columns(&REQUIRED_COLUMNS);
        header.push(ID_COLUMN.to_string());
        let id = "550e8400-e29b-41d4-a716-446655440000";

        let workbook = expenses_only(
            header,
            vec![
                row(&["2024-01-01", "A", "Meals", "1", "Cash", id]),
                row(&["2024-01-02", "B", "Meals", "2", "Cash", id]),
            ],
        );
        let err = workbook.to_ledger().unwrap_err();
        assert!(err.is_storage_read());
        assert!(err.to_string().contains("Row 1"));
    }

    #[test]
    fn test_overflowing_total_is_not_written() {
        let max = Money::parse("79228162514264337593543950335").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let ledger: Ledger = vec![
            ExpenseRecord::new(date, "A", "Travel", max, "UPI"),
            ExpenseRecord::new(date, "B", "Travel", max, "UPI"),
        ]
        .into();

        assert!(Workbook::from_ledger(&ledger).unwrap_err().is_validation());
    }

    #[test]
    fn test_missing_id_column_assigns_ids() {
        let workbook = expenses_only(
            columns(&REQUIRED_COLUMNS),
            vec![
                row(&["2024-01-01", "A", "Meals", "1", "Cash"]),
                row(&["2024-01-02", "B", "Meals", "2", "Cash"]),
            ],
        );
        let ledger = workbook.to_ledger().unwrap();
        assert_ne!(ledger.get(0).unwrap().id, ledger.get(1).unwrap().id);
    }
}
