//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::ExpenseError;

/// Read JSON from a file, returning an error if file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, ExpenseError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExpenseError::StorageRead(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path).map_err(|e| {
        ExpenseError::StorageRead(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        ExpenseError::StorageRead(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// Either the whole new content is in place afterwards or the previous file is
/// left untouched. Every call writes its own uniquely named temp file, so
/// concurrent writers never share one; the last rename wins.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ExpenseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| {
                ExpenseError::StorageWrite(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
            parent
        }
        None => Path::new("."),
    };

    // Same directory as the target so the rename stays on one filesystem
    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| ExpenseError::StorageWrite(format!("Failed to create temp file: {}", e)))?;

    write_temp(temp.as_file_mut(), data)?;

    // An unpersisted temp file is deleted when dropped
    temp.persist(path).map_err(|e| {
        ExpenseError::StorageWrite(format!(
            "Failed to replace {}: {}",
            path.display(),
            e.error
        ))
    })?;

    Ok(())
}

fn write_temp<T: Serialize>(file: &mut File, data: &T) -> Result<(), ExpenseError> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| ExpenseError::StorageWrite(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| ExpenseError::StorageWrite(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ExpenseError::StorageWrite(format!("Failed to sync data: {}", e)))
}
