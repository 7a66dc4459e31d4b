//! Ledger model
//!
//! The ordered sequence of expense records held in one ledger file. A record's
//! index is its row position; removing a row shifts every later row down by one.

use std::collections::HashSet;

use super::expense::ExpenseRecord;
use super::ids::ExpenseId;
use crate::error::{ExpenseError, ExpenseResult};

/// Ordered, positionally indexed collection of expense records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`, if any
    pub fn get(&self, index: usize) -> Option<&ExpenseRecord> {
        self.records.get(index)
    }

    /// Iterate over records in storage order
    pub fn iter(&self) -> std::slice::Iter<'_, ExpenseRecord> {
        self.records.iter()
    }

    /// All records as a slice
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Append a record at the end; its index is the previous length
    pub fn push(&mut self, record: ExpenseRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Replace the record at `index` in place, keeping the id already stored at
    /// that position. Returns the record that was replaced.
    pub fn replace(
        &mut self,
        index: usize,
        mut record: ExpenseRecord,
    ) -> ExpenseResult<ExpenseRecord> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, len))?;
        record.id = slot.id;
        Ok(std::mem::replace(slot, record))
    }

    /// Remove the record at `index`, shifting later records down by one
    pub fn remove(&mut self, index: usize) -> ExpenseResult<ExpenseRecord> {
        if index >= self.records.len() {
            return Err(out_of_range(index, self.records.len()));
        }
        Ok(self.records.remove(index))
    }

    /// Current index of the record with `id`
    pub fn position_of(&self, id: ExpenseId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// First row whose id was already used by an earlier row
    pub fn duplicate_id(&self) -> Option<(usize, ExpenseId)> {
        let mut seen = HashSet::with_capacity(self.records.len());
        self.records
            .iter()
            .enumerate()
            .find(|(_, r)| !seen.insert(r.id))
            .map(|(i, r)| (i, r.id))
    }

    /// Check every record and that no id appears twice
    pub fn validate(&self) -> ExpenseResult<()> {
        for (i, record) in self.records.iter().enumerate() {
            record
                .validate()
                .map_err(|e| ExpenseError::Validation(format!("Row {}: {}", i, e)))?;
        }

        match self.duplicate_id() {
            Some((_, id)) => Err(ExpenseError::duplicate_expense(id.to_string())),
            None => Ok(()),
        }
    }
}

fn out_of_range(index: usize, len: usize) -> ExpenseError {
    ExpenseError::index_out_of_range(i64::try_from(index).unwrap_or(i64::MAX), len)
}

impl From<Vec<ExpenseRecord>> for Ledger {
    fn from(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<ExpenseRecord> for Ledger {
    fn from_iter<I: IntoIterator<Item = ExpenseRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Ledger {
    type Item = ExpenseRecord;
    type IntoIter = std::vec::IntoIter<ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a ExpenseRecord;
    type IntoIter = std::slice::Iter<'a, ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
