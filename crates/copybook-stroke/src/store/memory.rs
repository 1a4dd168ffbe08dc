//! In-memory stroke store.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{StoreError, StrokeSet, StrokeStore, report_missing};
use crate::source::read_source;

type Table = HashMap<char, StrokeSet>;

/// A [`StrokeStore`] holding the whole table in memory.
///
/// The table sits behind an `Arc`; `load` builds a new table and replaces
/// the `Arc` under a short write lock.
#[derive(Debug, Default)]
pub struct MemoryStrokeStore {
    table: RwLock<Arc<Table>>,
}

impl MemoryStrokeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from already parsed records.
    #[must_use]
    pub fn from_table(table: BTreeMap<char, StrokeSet>) -> Self {
        Self {
            table: RwLock::new(Arc::new(table.into_iter().collect())),
        }
    }

    /// Create a store from a source file.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the source cannot be read or parsed.
    pub fn open(source: &Path) -> Result<Self, StoreError> {
        Ok(Self::from_table(read_source(source)?))
    }
}

impl StrokeStore for MemoryStrokeStore {
    fn load(&self, source: &Path) -> Result<usize, StoreError> {
        let table: Table = read_source(source)?.into_iter().collect();
        let len = table.len();
        *self.table.write() = Arc::new(table);
        Ok(len)
    }

    fn lookup(&self, character: char) -> StrokeSet {
        let table = Arc::clone(&self.table.read());
        table.get(&character).cloned().unwrap_or_else(|| {
            report_missing(character);
            StrokeSet::new()
        })
    }

    fn len(&self) -> usize {
        self.table.read().len()
    }
}
