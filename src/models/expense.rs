//! Expense record model
//!
//! One row of the ledger: a single business expense with its date, vendor,
//! category, amount and payment mode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;
use crate::error::{ExpenseError, ExpenseResult};

/// Canonical date format for stored and exported records
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date formats accepted when reading dates typed by a person or written by
/// another spreadsheet tool
const ACCEPTED_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d",
];

/// A single expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Stable identifier assigned at creation
    pub id: ExpenseId,

    /// Calendar date of the expense
    pub date: NaiveDate,

    /// Who was paid
    pub vendor: String,

    /// Category label, e.g. "Travel"
    pub category: String,

    /// Non-negative amount
    pub amount: Money,

    /// Payment mode label, e.g. "UPI"
    pub payment_mode: String,

    /// Invoice number, empty when not supplied
    #[serde(default)]
    pub invoice_no: String,

    /// Free-form notes, empty when not supplied
    #[serde(default)]
    pub description: String,
}

impl ExpenseRecord {
    /// Create a new record with a fresh id and empty optional fields
    pub fn new(
        date: NaiveDate,
        vendor: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
        payment_mode: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            date,
            vendor: vendor.into(),
            category: category.into(),
            amount,
            payment_mode: payment_mode.into(),
            invoice_no: String::new(),
            description: String::new(),
        }
    }

    /// Set the invoice number
    pub fn with_invoice_no(mut self, invoice_no: impl Into<String>) -> Self {
        self.invoice_no = invoice_no.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Year-month key (`YYYY-MM`) used by the monthly summary
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::MissingCategory);
        }

        if self.payment_mode.trim().is_empty() {
            return Err(ExpenseValidationError::MissingPaymentMode);
        }

        Ok(())
    }

    /// Parse a calendar date, reporting unparseable text as a validation error
    pub fn parse_date(s: &str) -> ExpenseResult<NaiveDate> {
        parse_date_with(s, DATE_FORMAT)
    }
}

/// Parse a date trying `primary_format` first, then the other accepted formats
pub fn parse_date_with(s: &str, primary_format: &str) -> ExpenseResult<NaiveDate> {
    let s = s.trim();

    std::iter::once(primary_format)
        .chain(ACCEPTED_DATE_FORMATS.iter().copied())
        .find_map(|format| {
            NaiveDate::parse_from_str(s, format).ok().or_else(|| {
                chrono::NaiveDateTime::parse_from_str(s, format)
                    .ok()
                    .map(|dt| dt.date())
            })
        })
        .ok_or_else(|| ExpenseError::Validation(format!("Unparseable date: '{}'", s)))
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}, {})",
            self.date.format(DATE_FORMAT),
            self.vendor,
            self.amount,
            self.category,
            self.payment_mode
        )
    }
}

/// Validation errors for expense records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(Money),
    MissingCategory,
    MissingPaymentMode,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount must not be negative, got {}", amount)
            }
            Self::MissingCategory => write!(f, "Category is required"),
            Self::MissingPaymentMode => write!(f, "Payment mode is required"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

impl From<ExpenseValidationError> for ExpenseError {
    fn from(err: ExpenseValidationError) -> Self {
        ExpenseError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExpenseRecord {
        ExpenseRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "Indigo",
            "Travel",
            Money::from_cents(1250000),
            "Credit Card",
        )
    }

    #[test]
    fn test_new_record_defaults() {
        let record = sample();
        assert_eq!(record.vendor, "Indigo");
        assert!(record.invoice_no.is_empty());
        assert!(record.description.is_empty());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let record = sample()
            .with_invoice_no("INV-42")
            .with_description("Client visit");
        assert_eq!(record.invoice_no, "INV-42");
        assert_eq!(record.description, "Client visit");
    }

    #[test]
    fn test_zero_amount_is_valid() {
        let mut record = sample();
        record.amount = Money::zero();
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut record = sample();
        record.amount = Money::from_cents(-1);
        assert!(matches!(
            record.validate(),
            Err(ExpenseValidationError::NegativeAmount(_))
        ));

        let err: ExpenseError = record.validate().unwrap_err().into();
        assert!(err.is_validation());
    }

    #[test]
    fn test_blank_labels_rejected() {
        let mut record = sample();
        record.category = "  ".into();
        assert_eq!(
            record.validate(),
            Err(ExpenseValidationError::MissingCategory)
        );

        let mut record = sample();
        record.payment_mode = String::new();
        assert_eq!(
            record.validate(),
            Err(ExpenseValidationError::MissingPaymentMode)
        );
    }

    #[test]
    fn test_month_key() {
        assert_eq!(sample().month_key(), "2024-01");
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert_eq!(ExpenseRecord::parse_date("2024-01-20").unwrap(), expected);
        assert_eq!(
            ExpenseRecord::parse_date("2024-01-20 00:00:00").unwrap(),
            expected
        );
        assert_eq!(ExpenseRecord::parse_date("2024/01/20").unwrap(), expected);

        let err = ExpenseRecord::parse_date("2024-13-45").unwrap_err();
        assert!(err.is_validation());
        assert!(ExpenseRecord::parse_date("yesterday").is_err());
    }

    #[test]
    fn test_parse_date_with_custom_format() {
        let date = parse_date_with("20/01/2024", "%d/%m/%Y").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
    }

    #[test]
    fn test_missing_optional_fields_deserialize_empty() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "date": "2024-01-05",
            "vendor": "Cafe",
            "category": "Meals",
            "amount": "20",
            "payment_mode": "Cash"
        }"#;
        let record: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.invoice_no, "");
        assert_eq!(record.description, "");
    }
}
