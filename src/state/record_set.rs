//! Ordered, deduplicated record accumulator
//!
//! Records are kept in the order they were first seen. A hash index over the
//! same records answers membership so inserts stay O(1) on long crawls.

use crate::listing::ListingRecord;
use std::collections::HashSet;

/// Insertion-ordered set of listing records keyed on structural equality
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    /// Records in discovery order
    records: Vec<ListingRecord>,

    /// Membership index over `records`
    seen: HashSet<ListingRecord>,
}

impl RecordSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record unless an equal one is already present
    ///
    /// Returns true if the record was new.
    pub fn insert(&mut self, record: ListingRecord) -> bool {
        if self.seen.contains(&record) {
            return false;
        }
        self.seen.insert(record.clone());
        self.records.push(record);
        true
    }

    /// Returns true if an equal record is present
    pub fn contains(&self, record: &ListingRecord) -> bool {
        self.seen.contains(record)
    }

    /// Number of distinct records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records have been added
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, ListingRecord> {
        self.records.iter()
    }

    /// Records in discovery order, as a slice
    pub fn as_slice(&self) -> &[ListingRecord] {
        &self.records
    }

    /// Consumes the set, returning records in discovery order
    pub fn into_vec(self) -> Vec<ListingRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a ListingRecord;
    type IntoIter = std::slice::Iter<'a, ListingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<ListingRecord> for RecordSet {
    fn extend<T: IntoIterator<Item = ListingRecord>>(&mut self, iter: T) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<ListingRecord> for RecordSet {
    fn from_iter<T: IntoIterator<Item = ListingRecord>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
