//! Expense service
//!
//! Business logic on top of [`LedgerStore`]: filtered listing, lookup by row
//! index or id, and create/edit/remove from loosely typed inputs.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::warn;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::export_csv;
use crate::models::{ExpenseRecord, Ledger, Money};
use crate::reports::SummaryBundle;
use crate::storage::LedgerStore;

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a LedgerStore,
    settings: &'a Settings,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Earliest date, inclusive
    pub start_date: Option<NaiveDate>,
    /// Latest date, inclusive
    pub end_date: Option<NaiveDate>,
    /// Exact category (case-insensitive)
    pub category: Option<String>,
    /// Exact payment mode (case-insensitive)
    pub payment_mode: Option<String>,
    /// Substring of the vendor name (case-insensitive)
    pub vendor: Option<String>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Only expenses on or after `start`
    pub fn since(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Only expenses on or before `end`
    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by payment mode
    pub fn payment_mode(mut self, payment_mode: impl Into<String>) -> Self {
        self.payment_mode = Some(payment_mode.into());
        self
    }

    /// Filter by vendor name fragment
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Reject a range whose start lies after its end
    pub fn validate(&self) -> ExpenseResult<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ExpenseError::Validation(format!(
                    "Start date {} is after end date {}",
                    start, end
                )));
            }
        }
        Ok(())
    }

    /// Whether `record` passes every criterion that is set
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        if self.start_date.is_some_and(|start| record.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| record.date > end) {
            return false;
        }
        if let Some(category) = &self.category {
            if !record.category.trim().eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }
        if let Some(mode) = &self.payment_mode {
            if !record.payment_mode.trim().eq_ignore_ascii_case(mode.trim()) {
                return false;
            }
        }
        if let Some(vendor) = &self.vendor {
            let needle = vendor.trim().to_lowercase();
            if !record.vendor.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// A record together with its current ledger index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedExpense {
    pub index: usize,
    pub record: ExpenseRecord,
}

/// How a caller names a single record: by row index or by id
///
/// Text that parses as an integer is always a row index. An id prefix made
/// only of digits must carry the `exp-` prefix, as in the short form shown in
/// listings (`exp-12345678`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseTarget {
    /// Zero-based row index. Negative values are accepted and rejected later
    /// as out of range.
    Index(i64),
    /// Full id or a unique prefix of it, optionally with the `exp-` prefix
    Id(String),
}

impl FromStr for ExpenseTarget {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ExpenseError::Validation(
                "Expected a row index or an expense id".into(),
            ));
        }
        match s.parse::<i64>() {
            Ok(index) => Ok(Self::Index(index)),
            Err(_) => Ok(Self::Id(s.to_string())),
        }
    }
}

impl fmt::Display for ExpenseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{}", index),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub date: NaiveDate,
    pub vendor: String,
    pub category: String,
    pub amount: Money,
    pub payment_mode: String,
    pub invoice_no: Option<String>,
    pub description: Option<String>,
}

/// Fields to change on an existing expense. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub date: Option<NaiveDate>,
    pub vendor: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Money>,
    pub payment_mode: Option<String>,
    pub invoice_no: Option<String>,
    pub description: Option<String>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.vendor.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.payment_mode.is_none()
            && self.invoice_no.is_none()
            && self.description.is_none()
    }

    fn apply(self, record: &mut ExpenseRecord) {
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(vendor) = self.vendor {
            record.vendor = vendor.trim().to_string();
        }
        if let Some(category) = self.category {
            record.category = category.trim().to_string();
        }
        if let Some(amount) = self.amount {
            record.amount = amount;
        }
        if let Some(mode) = self.payment_mode {
            record.payment_mode = mode.trim().to_string();
        }
        if let Some(invoice_no) = self.invoice_no {
            record.invoice_no = invoice_no.trim().to_string();
        }
        if let Some(description) = self.description {
            record.description = description;
        }
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a LedgerStore, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// List expenses matching `filter`, in ledger order
    pub fn list(&self, filter: &ExpenseFilter) -> ExpenseResult<Vec<IndexedExpense>> {
        filter.validate()?;

        let ledger = self.store.all()?;
        Ok(ledger
            .into_iter()
            .enumerate()
            .filter(|(_, record)| filter.matches(record))
            .map(|(index, record)| IndexedExpense { index, record })
            .collect())
    }

    /// Resolve `target` against the current ledger
    pub fn get(&self, target: &ExpenseTarget) -> ExpenseResult<IndexedExpense> {
        let ledger = self.store.all()?;
        resolve(&ledger, target)
    }

    /// Create and append a new expense
    pub fn add(&self, input: CreateExpenseInput) -> ExpenseResult<IndexedExpense> {
        let mut record = ExpenseRecord::new(
            input.date,
            input.vendor.trim(),
            input.category.trim(),
            input.amount,
            input.payment_mode.trim(),
        );
        if let Some(invoice_no) = input.invoice_no {
            record.invoice_no = invoice_no.trim().to_string();
        }
        if let Some(description) = input.description {
            record.description = description;
        }

        self.check_vocabulary(&record);
        let index = self.store.append(record.clone())?;
        Ok(IndexedExpense { index, record })
    }

    /// Apply `patch` to the expense named by `target`, keeping its position
    pub fn edit(
        &self,
        target: &ExpenseTarget,
        patch: ExpensePatch,
    ) -> ExpenseResult<IndexedExpense> {
        if patch.is_empty() {
            return Err(ExpenseError::Validation("Nothing to change".into()));
        }

        let IndexedExpense { index, mut record } = self.get(target)?;
        patch.apply(&mut record);

        self.check_vocabulary(&record);
        match target {
            ExpenseTarget::Index(_) => {
                let record = self.store.update(index, record)?;
                Ok(IndexedExpense { index, record })
            }
            ExpenseTarget::Id(_) => {
                let index = self.store.update_by_id(record.id, record.clone())?;
                Ok(IndexedExpense { index, record })
            }
        }
    }

    /// Remove the expense named by `target`. Later rows move down by one.
    pub fn remove(&self, target: &ExpenseTarget) -> ExpenseResult<IndexedExpense> {
        let IndexedExpense { index, record } = self.get(target)?;
        let record = match target {
            ExpenseTarget::Index(_) => self.store.delete(index)?,
            ExpenseTarget::Id(_) => self.store.delete_by_id(record.id)?,
        };
        Ok(IndexedExpense { index, record })
    }

    /// All three summaries of the current ledger
    pub fn summaries(&self) -> ExpenseResult<SummaryBundle> {
        let ledger = self.store.all()?;
        SummaryBundle::compute(&ledger)
    }

    /// CSV export of the current ledger, `None` when it is empty
    pub fn export(&self) -> ExpenseResult<Option<String>> {
        let ledger = self.store.all()?;
        export_csv(&ledger)
    }

    fn check_vocabulary(&self, record: &ExpenseRecord) {
        if !record.category.trim().is_empty() && !self.settings.knows_category(&record.category) {
            warn!("Category '{}' is not in the configured list", record.category);
        }
        if !record.payment_mode.trim().is_empty()
            && !self.settings.knows_payment_mode(&record.payment_mode)
        {
            warn!(
                "Payment mode '{}' is not in the configured list",
                record.payment_mode
            );
        }
    }
}

/// Find the single record `target` names in `ledger`
pub fn resolve(ledger: &Ledger, target: &ExpenseTarget) -> ExpenseResult<IndexedExpense> {
    match target {
        ExpenseTarget::Index(index) => {
            let found = usize::try_from(*index)
                .ok()
                .and_then(|i| ledger.get(i).map(|record| (i, record)));
            match found {
                Some((index, record)) => Ok(IndexedExpense {
                    index,
                    record: record.clone(),
                }),
                None => Err(ExpenseError::index_out_of_range(*index, ledger.len())),
            }
        }
        ExpenseTarget::Id(id) => {
            let mut matches = ledger
                .iter()
                .enumerate()
                .filter(|(_, record)| record.id.matches(id));

            let (index, record) = matches
                .next()
                .ok_or_else(|| ExpenseError::expense_not_found(id.clone()))?;

            if matches.next().is_some() {
                return Err(ExpenseError::Validation(format!(
                    "Ambiguous expense id '{}', use more characters",
                    id
                )));
            }

            Ok(IndexedExpense {
                index,
                record: record.clone(),
            })
        }
    }
}
