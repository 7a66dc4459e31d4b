//! Expense summaries
//!
//! Pure aggregations over a ledger snapshot: totals per month, per category and
//! per payment mode. Nothing here holds state between calls; every summary is
//! recomputed in full from the records it is given.

use std::collections::HashMap;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseRecord, Ledger, Money};

/// Which field a summary groups by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryKind {
    /// Calendar year-month of the expense date, ascending
    Monthly,
    /// Category label, in order of first occurrence
    Category,
    /// Payment mode label, in order of first occurrence
    PaymentMode,
}

impl SummaryKind {
    /// Name of the sheet this summary is persisted as
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly Summary",
            Self::Category => "Category Summary",
            Self::PaymentMode => "Payment Summary",
        }
    }

    /// Header of the grouping column
    pub fn key_column(&self) -> &'static str {
        match self {
            Self::Monthly => "month",
            Self::Category => "category",
            Self::PaymentMode => "payment_mode",
        }
    }

    fn key_of(&self, record: &ExpenseRecord) -> String {
        match self {
            Self::Monthly => record.month_key(),
            Self::Category => record.category.clone(),
            Self::PaymentMode => record.payment_mode.clone(),
        }
    }
}

/// One group of a summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Group label (`YYYY-MM`, category or payment mode)
    pub label: String,
    /// Sum of amounts in the group
    pub total: Money,
    /// Number of records in the group
    pub count: usize,
}

/// Totals of a ledger grouped by one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    kind: SummaryKind,
    entries: Vec<SummaryEntry>,
    total: Money,
}

impl Summary {
    /// Aggregate `ledger` by `kind`
    ///
    /// Fails with a validation error if the amounts add up to more than a
    /// `Money` can hold.
    pub fn compute(kind: SummaryKind, ledger: &Ledger) -> ExpenseResult<Self> {
        let mut entries: Vec<SummaryEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut total = Money::zero();

        for record in ledger {
            total = total
                .checked_add(record.amount)
                .ok_or_else(|| overflow(kind, None))?;

            let label = kind.key_of(record);
            match positions.get(&label) {
                Some(&i) => {
                    let entry = &mut entries[i];
                    entry.total = entry
                        .total
                        .checked_add(record.amount)
                        .ok_or_else(|| overflow(kind, Some(&entry.label)))?;
                    entry.count += 1;
                }
                None => {
                    positions.insert(label.clone(), entries.len());
                    entries.push(SummaryEntry {
                        label,
                        total: record.amount,
                        count: 1,
                    });
                }
            }
        }

        if kind == SummaryKind::Monthly {
            entries.sort_by(|a, b| a.label.cmp(&b.label));
        }

        Ok(Self {
            kind,
            entries,
            total,
        })
    }

    /// What this summary groups by
    pub fn kind(&self) -> SummaryKind {
        self.kind
    }

    /// Groups in output order
    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    /// Total for a single group
    pub fn get(&self, label: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.total)
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no groups (the ledger was empty)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over every group
    pub fn grand_total(&self) -> Money {
        self.total
    }

    /// `(label, total)` pairs in output order
    pub fn to_pairs(&self) -> Vec<(String, Money)> {
        self.entries
            .iter()
            .map(|e| (e.label.clone(), e.total))
            .collect()
    }
}

fn overflow(kind: SummaryKind, label: Option<&str>) -> ExpenseError {
    let scope = match label {
        Some(label) => format!("{} '{}'", kind.key_column(), label),
        None => "the ledger".to_string(),
    };
    ExpenseError::Validation(format!("Total for {} is too large to represent", scope))
}

/// Totals per calendar month, ascending by `YYYY-MM`
pub fn monthly(ledger: &Ledger) -> ExpenseResult<Summary> {
    Summary::compute(SummaryKind::Monthly, ledger)
}

/// Totals per category
pub fn by_category(ledger: &Ledger) -> ExpenseResult<Summary> {
    Summary::compute(SummaryKind::Category, ledger)
}

/// Totals per payment mode
pub fn by_payment_mode(ledger: &Ledger) -> ExpenseResult<Summary> {
    Summary::compute(SummaryKind::PaymentMode, ledger)
}

/// All three summaries of one ledger snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryBundle {
    pub monthly: Summary,
    pub by_category: Summary,
    pub by_payment_mode: Summary,
}

impl SummaryBundle {
    /// Compute every summary for `ledger`
    pub fn compute(ledger: &Ledger) -> ExpenseResult<Self> {
        Ok(Self {
            monthly: monthly(ledger)?,
            by_category: by_category(ledger)?,
            by_payment_mode: by_payment_mode(ledger)?,
        })
    }

    /// Summaries in sheet order
    pub fn iter(&self) -> impl Iterator<Item = &Summary> {
        [&self.monthly, &self.by_category, &self.by_payment_mode].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: (i32, u32, u32), category: &str, amount: &str, mode: &str) -> ExpenseRecord {
        ExpenseRecord::new(
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            "Vendor",
            category,
            Money::parse(amount).unwrap(),
            mode,
        )
    }

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    #[test]
    fn test_by_category_sums_groups() {
        let ledger: Ledger = vec![
            record((2024, 1, 5), "Travel", "100", "UPI"),
            record((2024, 1, 6), "Travel", "50", "Cash"),
            record((2024, 1, 7), "Meals", "20", "UPI"),
        ]
        .into();

        let summary = by_category(&ledger).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.get("Travel"), Some(money("150")));
        assert_eq!(summary.get("Meals"), Some(money("20")));
        assert_eq!(summary.get("Utilities"), None);
    }

    #[test]
    fn test_category_order_is_first_occurrence() {
        let ledger: Ledger = vec![
            record((2024, 1, 5), "Meals", "1", "UPI"),
            record((2024, 1, 6), "Travel", "2", "UPI"),
            record((2024, 1, 7), "Meals", "3", "UPI"),
            record((2024, 1, 8), "Marketing", "4", "UPI"),
        ]
        .into();

        let labels: Vec<_> = by_category(&ledger)
            .unwrap()
            .entries()
            .iter()
            .map(|e| e.label.clone())
            .collect();
        assert_eq!(labels, vec!["Meals", "Travel", "Marketing"]);
    }

    #[test]
    fn test_monthly_groups_by_year_month() {
        let ledger: Ledger = vec![
            record((2024, 1, 5), "Travel", "10", "UPI"),
            record((2024, 1, 20), "Meals", "5", "Cash"),
        ]
        .into();

        let summary = monthly(&ledger).unwrap();
        assert_eq!(summary.to_pairs(), vec![("2024-01".to_string(), money("15"))]);
        assert_eq!(summary.entries()[0].count, 2);
    }

    #[test]
    fn test_monthly_is_ascending() {
        let ledger: Ledger = vec![
            record((2024, 3, 1), "Travel", "1", "UPI"),
            record((2023, 12, 31), "Travel", "2", "UPI"),
            record((2024, 1, 15), "Travel", "3", "UPI"),
            record((2024, 3, 9), "Travel", "4", "UPI"),
        ]
        .into();

        let pairs = monthly(&ledger).unwrap().to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("2023-12".to_string(), money("2")),
                ("2024-01".to_string(), money("3")),
                ("2024-03".to_string(), money("5")),
            ]
        );
    }

    #[test]
    fn test_by_payment_mode() {
        let ledger: Ledger = vec![
            record((2024, 1, 5), "Travel", "10.25", "UPI"),
            record((2024, 2, 5), "Meals", "4.75", "UPI"),
            record((2024, 2, 6), "Meals", "3", "Cash"),
        ]
        .into();

        let summary = by_payment_mode(&ledger).unwrap();
        assert_eq!(summary.get("UPI"), Some(money("15.00")));
        assert_eq!(summary.get("Cash"), Some(money("3")));
        assert_eq!(summary.grand_total(), money("18"));
    }

    #[test]
    fn test_empty_ledger_gives_empty_summaries() {
        let bundle = SummaryBundle::compute(&Ledger::new()).unwrap();
        for summary in bundle.iter() {
            assert!(summary.is_empty());
            assert_eq!(summary.grand_total(), Money::zero());
        }
    }

    #[test]
    fn test_summaries_are_idempotent() {
        let ledger: Ledger = vec![
            record((2024, 1, 5), "Travel", "100", "UPI"),
            record((2024, 2, 6), "Meals", "20", "Cash"),
        ]
        .into();

        assert_eq!(monthly(&ledger).unwrap(), monthly(&ledger).unwrap());
        assert_eq!(by_category(&ledger).unwrap(), by_category(&ledger).unwrap());
        assert_eq!(
            by_payment_mode(&ledger).unwrap(),
            by_payment_mode(&ledger).unwrap()
        );

        let bundle = SummaryBundle::compute(&ledger).unwrap();
        assert_eq!(bundle, SummaryBundle::compute(&ledger).unwrap());
    }

    #[test]
    fn test_total_overflow_is_a_validation_error() {
        let max = "79228162514264337593543950335";
        let ledger: Ledger = vec![
            record((2024, 1, 5), "Travel", max, "UPI"),
            record((2024, 2, 5), "Meals", max, "Cash"),
        ]
        .into();

        // every group fits on its own, the overall total does not
        let err = by_category(&ledger).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("too large"));

        let same_group: Ledger = vec![
            record((2024, 1, 5), "Travel", max, "UPI"),
            record((2024, 1, 6), "Travel", "1", "UPI"),
        ]
        .into();
        assert!(monthly(&same_group).unwrap_err().is_validation());
        assert!(SummaryBundle::compute(&same_group).is_err());
    }

    #[test]
    fn test_largest_amount_alone_is_fine() {
        let max = money("79228162514264337593543950335");
        let ledger: Ledger = vec![
            record((2024, 1, 5), "Travel", "79228162514264337593543950335", "UPI"),
            record((2024, 1, 6), "Meals", "0", "UPI"),
        ]
        .into();

        let summary = by_payment_mode(&ledger).unwrap();
        assert_eq!(summary.get("UPI"), Some(max));
        assert_eq!(summary.grand_total(), max);
    }

    #[test]
    fn test_sheet_metadata() {
        assert_eq!(SummaryKind::Monthly.sheet_name(), "Monthly Summary");
        assert_eq!(SummaryKind::Category.key_column(), "category");
        assert_eq!(SummaryKind::PaymentMode.sheet_name(), "Payment Summary");
    }
}
