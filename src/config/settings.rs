//! User settings for the expense ledger
//!
//! Display preferences, the default ledger and the suggested category and
//! payment-mode vocabularies.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::ExpenseError;
use crate::storage::file_io::write_json_atomic;

/// Current settings schema
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in summary tables
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for CLI input and output (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Ledger used when no `--ledger` path is given
    #[serde(default = "default_ledger")]
    pub default_ledger: String,

    /// Known categories. Others are accepted with a warning.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Known payment modes. Others are accepted with a warning.
    #[serde(default = "default_payment_modes")]
    pub payment_modes: Vec<String>,
}

fn default_schema_version() -> u32 {
    SETTINGS_SCHEMA_VERSION
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_ledger() -> String {
    "expenses".to_string()
}

fn default_categories() -> Vec<String> {
    [
        "Travel",
        "Marketing",
        "Office Supplies",
        "Utilities",
        "Meals",
        "Other",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_payment_modes() -> Vec<String> {
    ["Cash", "UPI", "Bank Transfer", "Credit Card", "Other"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_ledger: default_ledger(),
            categories: default_categories(),
            payment_modes: default_payment_modes(),
        }
    }
}

impl Settings {
    /// Whether `category` is one of the configured categories (case-insensitive)
    pub fn knows_category(&self, category: &str) -> bool {
        contains_ignore_case(&self.categories, category)
    }

    /// Whether `mode` is one of the configured payment modes (case-insensitive)
    pub fn knows_payment_mode(&self, mode: &str) -> bool {
        contains_ignore_case(&self.payment_modes, mode)
    }

    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.schema_version > SETTINGS_SCHEMA_VERSION {
            return Err(ExpenseError::Config(format!(
                "Settings schema version {} is newer than supported version {}",
                settings.schema_version, SETTINGS_SCHEMA_VERSION
            )));
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the CLI could not work with
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.date_format.trim().is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(ExpenseError::Config(format!(
                "Invalid date format: '{}'",
                self.date_format
            )));
        }

        if self.default_ledger.trim().is_empty() {
            return Err(ExpenseError::Config("Default ledger name is empty".into()));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

fn contains_ignore_case(values: &[String], needle: &str) -> bool {
    let needle = needle.trim();
    values.iter().any(|v| v.eq_ignore_ascii_case(needle))
}
