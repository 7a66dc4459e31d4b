//! Storage initialization
//!
//! Handles first-run setup and the discovery and creation of ledger files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::paths::LedgerPaths;
use crate::error::{ExpenseError, ExpenseResult};

use super::store::LedgerStore;

/// File extension of ledger files
pub const LEDGER_EXTENSION: &str = "json";

/// Initialize storage for a fresh installation
///
/// Creates the home directories and an empty default ledger if it doesn't
/// exist yet. Returns the default ledger's store.
pub fn initialize_storage(paths: &LedgerPaths, default_ledger: &str) -> ExpenseResult<LedgerStore> {
    paths.ensure_directories()?;
    LedgerStore::open(paths.ledger_file(default_ledger))
}

/// Ledger files in `dir`, sorted by name. A missing directory has none.
pub fn list_ledgers(dir: &Path) -> ExpenseResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| ExpenseError::Io(format!("Failed to read {}: {}", dir.display(), e)))?;

    let mut ledgers = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(LEDGER_EXTENSION) {
            ledgers.push(path);
        }
    }
    ledgers.sort();

    debug!("Found {} ledger(s) in {}", ledgers.len(), dir.display());
    Ok(ledgers)
}

/// File name for a ledger called `name`, adding the extension when missing
pub fn ledger_file_name(name: &str) -> String {
    let name = name.trim();
    let suffix = format!(".{}", LEDGER_EXTENSION);
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

/// Create a new, empty ledger called `name` inside `dir`
pub fn create_ledger(dir: &Path, name: &str) -> ExpenseResult<LedgerStore> {
    if name.trim().is_empty() {
        return Err(ExpenseError::Validation("Ledger name is required".into()));
    }

    let file_name = ledger_file_name(name);
    if file_name.contains(['/', '\\']) {
        return Err(ExpenseError::Validation(format!(
            "Ledger name must not contain path separators: '{}'",
            name
        )));
    }

    let path = dir.join(&file_name);
    if path.exists() {
        return Err(ExpenseError::Duplicate {
            entity_type: "Ledger",
            identifier: file_name,
        });
    }

    LedgerStore::open(path)
}
