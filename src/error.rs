//! Custom error types for the expense ledger
//!
//! Every failure the engine can report is a variant of [`ExpenseError`]. Callers
//! can match on the variant to decide how to present it; the `Display` output is
//! already suitable for a user-facing message.

use thiserror::Error;

/// The main error type for expense ledger operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors outside of ledger persistence
    #[error("I/O error: {0}")]
    Io(String),

    /// A record or filter failed validation; nothing was changed
    #[error("Validation error: {0}")]
    Validation(String),

    /// A positional index outside `[0, len)`; nothing was changed
    #[error("Index {index} is out of range for a ledger of {len} record(s)")]
    IndexOutOfRange { index: i64, len: usize },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The ledger file is missing, corrupt or has an incompatible schema
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// Writing the ledger failed. The previous file is left as it was.
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ExpenseError {
    /// Create an "index out of range" error
    pub fn index_out_of_range(index: i64, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for an expense id that is already stored
    pub fn duplicate_expense(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a "duplicate" error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an index error
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    /// Check if this is a storage read error
    pub fn is_storage_read(&self) -> bool {
        matches!(self, Self::StorageRead(_))
    }

    /// Check if this is a storage write error
    pub fn is_storage_write(&self) -> bool {
        matches!(self, Self::StorageWrite(_))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for expense ledger operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
