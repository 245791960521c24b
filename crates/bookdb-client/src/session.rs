use crate::filter::{available_categories, FilterState};
use bookdb_core::types::BookRecord;

/// A client session: the latest fetched snapshot plus the filters that
/// outlive it.
///
/// One fetch produces one immutable snapshot. A later fetch replaces
/// the snapshot wholesale; the filter criteria persist across the
/// replacement and simply re-apply to whatever is current.
#[derive(Debug, Default)]
pub struct Session {
    snapshot: Vec<BookRecord>,
    filters: FilterState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the records of a fresh fetch, dropping the previous
    /// snapshot.
    pub fn replace_snapshot(&mut self, records: Vec<BookRecord>) {
        self.snapshot = records;
    }

    pub fn snapshot(&self) -> &[BookRecord] {
        &self.snapshot
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    /// The filtered view of the current snapshot.
    pub fn visible(&self) -> Vec<BookRecord> {
        self.filters.apply(&self.snapshot)
    }

    /// Category options for the picker, from the unfiltered snapshot.
    pub fn available_categories(&self) -> Vec<String> {
        available_categories(&self.snapshot)
    }
}
