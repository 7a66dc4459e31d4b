//! Ledger store
//!
//! `LedgerStore` is the handle for one ledger file. It keeps no records in
//! memory: every call reads the file, and every mutation writes the whole
//! workbook back (read-modify-write). Two handles mutating the same file at
//! the same time race, and the later save wins.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseId, ExpenseRecord, Ledger};

use super::file_io::{read_json_required, write_json_atomic};
use super::workbook::Workbook;

/// Handle to a single ledger file
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Create a handle for the ledger at `path` without touching the disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a handle and make sure the ledger file exists
    pub fn open(path: impl Into<PathBuf>) -> ExpenseResult<Self> {
        let store = Self::new(path);
        store.initialize()?;
        Ok(store)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty ledger if none exists yet. Returns whether a file was
    /// created; an existing ledger is left as it is.
    pub fn initialize(&self) -> ExpenseResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        save_ledger(&self.path, &Ledger::new())?;
        info!("Created empty ledger at {}", self.path.display());
        Ok(true)
    }

    /// Read every record from disk, in file order
    pub fn load(&self) -> ExpenseResult<Ledger> {
        load_ledger(&self.path)
    }

    /// Alias of [`LedgerStore::load`]: the full, unfiltered record set
    pub fn all(&self) -> ExpenseResult<Ledger> {
        self.load()
    }

    /// Write `ledger` and all of its summaries as one unit. Nothing is
    /// written unless every record is valid and ids are unique.
    pub fn save(&self, ledger: &Ledger) -> ExpenseResult<()> {
        save_ledger(&self.path, ledger)
    }

    /// Append `record` at the end of the ledger. Returns its index.
    pub fn append(&self, record: ExpenseRecord) -> ExpenseResult<usize> {
        record.validate()?;

        let mut ledger = self.load()?;
        if ledger.position_of(record.id).is_some() {
            return Err(ExpenseError::duplicate_expense(record.id.to_string()));
        }
        let index = ledger.push(record);
        self.save(&ledger)?;

        info!("Added expense at index {}", index);
        Ok(index)
    }

    /// Replace the record at `index`, keeping its position and id
    pub fn update(&self, index: usize, record: ExpenseRecord) -> ExpenseResult<ExpenseRecord> {
        record.validate()?;

        let mut ledger = self.load()?;
        ledger.replace(index, record)?;
        self.save(&ledger)?;

        info!("Updated expense at index {}", index);
        Ok(ledger.records()[index].clone())
    }

    /// Remove the record at `index`; later records move down by one
    pub fn delete(&self, index: usize) -> ExpenseResult<ExpenseRecord> {
        let mut ledger = self.load()?;
        let removed = ledger.remove(index)?;
        self.save(&ledger)?;

        info!("Deleted expense at index {}", index);
        Ok(removed)
    }

    /// Replace the record with `id`, wherever it currently sits
    pub fn update_by_id(&self, id: ExpenseId, record: ExpenseRecord) -> ExpenseResult<usize> {
        record.validate()?;

        let mut ledger = self.load()?;
        let index = ledger
            .position_of(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        ledger.replace(index, record)?;
        self.save(&ledger)?;

        info!("Updated expense {} at index {}", id.short(), index);
        Ok(index)
    }

    /// Remove the record with `id`
    pub fn delete_by_id(&self, id: ExpenseId) -> ExpenseResult<ExpenseRecord> {
        let mut ledger = self.load()?;
        let index = ledger
            .position_of(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        let removed = ledger.remove(index)?;
        self.save(&ledger)?;

        info!("Deleted expense {} from index {}", id.short(), index);
        Ok(removed)
    }
}

/// Read the ledger stored at `path`
pub fn load_ledger(path: &Path) -> ExpenseResult<Ledger> {
    let workbook: Workbook = read_json_required(path)?;
    let ledger = workbook.to_ledger()?;
    debug!("Loaded {} expenses from {}", ledger.len(), path.display());
    Ok(ledger)
}

/// Write `ledger` plus freshly computed summaries to `path` atomically
///
/// Invalid records, repeated ids and totals too large to represent are
/// rejected before anything touches the disk.
pub fn save_ledger(path: &Path, ledger: &Ledger) -> ExpenseResult<()> {
    ledger.validate()?;
    let workbook = Workbook::from_ledger(ledger)?;
    write_json_atomic(path, &workbook)?;
    debug!("Saved {} expenses to {}", ledger.len(), path.display());
    Ok(())
}
