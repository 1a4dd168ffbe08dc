//! Stroke lookup stores.
//!
//! A [`StrokeStore`] maps a character to its [`StrokeSet`]. Two backends are
//! provided and chosen by whoever constructs the store:
//!
//! - [`MemoryStrokeStore`] keeps the whole table in memory and re-reads the
//!   source on every [`load`](StrokeStore::load).
//! - [`IndexedStrokeStore`] writes an indexed file once and serves lookups
//!   from it, so later runs start without parsing the source again.
//!
//! Both behave identically. A `load` builds a complete new table first and
//! then swaps it in, so concurrent readers see either the old table or the
//! new one, never a mix. A failed `load` leaves the old table in place.

mod indexed;
mod memory;

use std::io;
use std::path::{Path, PathBuf};

pub use indexed::IndexedStrokeStore;
pub use memory::MemoryStrokeStore;

use copybook_common::warning::warn_once;

/// Stroke descriptions of one character, in writing order.
pub type StrokeSet = Vec<String>;

/// Errors raised while loading a stroke source or maintaining an index.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The stroke source (or an index file) could not be read.
    #[error("cannot read '{}': {source}", .path.display())]
    SourceLoadFailure {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line of the stroke source is not a valid record.
    #[error("{}:{line}: {reason}", .path.display())]
    InvalidRecord {
        /// Source file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// What is wrong with the line.
        reason: String,
    },
    /// The persistent index could not be written or is not usable.
    #[error("stroke index '{}': {reason}", .path.display())]
    Index {
        /// Index file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
}

/// Character → stroke lookup shared by every render pass.
///
/// Implementations are shared between threads, so all methods take `&self`.
pub trait StrokeStore: Send + Sync {
    /// Replace the whole table with the contents of `source`.
    ///
    /// Returns the number of characters now in the store.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the source cannot be read or parsed, in
    /// which case the previous contents are kept.
    fn load(&self, source: &Path) -> Result<usize, StoreError>;

    /// Strokes for `character`, or an empty set if it is not in the store.
    fn lookup(&self, character: char) -> StrokeSet;

    /// Number of characters in the store.
    fn len(&self) -> usize;

    /// Check if the store has no characters.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Log a lookup miss. Missing characters are expected, so once is enough.
fn report_missing(character: char) {
    let _ = warn_once(
        "stroke-store",
        &format!("no strokes for '{character}' (U+{:04X})", u32::from(character)),
    );
}
