//! Stroke source files.
//!
//! A source file holds one JSON object per line:
//!
//! ```text
//! {"character": "一", "strokes": ["M 100 400 L 900 400 L 900 360 L 100 360 Z"]}
//! ```
//!
//! `character` must be exactly one Unicode scalar and `strokes` lists the
//! stroke descriptions in writing order. Blank lines are skipped, unknown
//! fields are ignored, and when a character appears twice the later record
//! wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::store::{StoreError, StrokeSet};

/// One line of a stroke source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeRecord {
    /// The character, as a one-scalar string.
    pub character: String,
    /// Stroke descriptions in writing order.
    pub strokes: Vec<String>,
}

impl StrokeRecord {
    /// The record's key, if `character` is exactly one scalar.
    #[must_use]
    pub fn key(&self) -> Option<char> {
        let mut chars = self.character.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}

/// Read and validate a whole source file.
///
/// The result is keyed by character with duplicates already resolved, so a
/// store can swap it in as-is.
///
/// # Errors
///
/// Returns [`StoreError::SourceLoadFailure`] if the file cannot be read and
/// [`StoreError::InvalidRecord`] for the first malformed line.
pub fn read_source(path: &Path) -> Result<BTreeMap<char, StrokeSet>, StoreError> {
    let text = fs::read_to_string(path).map_err(|source| StoreError::SourceLoadFailure {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(&text, path)
}

/// Parse source text. `origin` is only used in error messages.
///
/// # Errors
///
/// Returns [`StoreError::InvalidRecord`] for the first malformed line.
pub fn parse_source(text: &str, origin: &Path) -> Result<BTreeMap<char, StrokeSet>, StoreError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut table = BTreeMap::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let invalid = |reason: String| StoreError::InvalidRecord {
            path: origin.to_path_buf(),
            line: number + 1,
            reason,
        };

        let record: StrokeRecord = serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;
        let Some(key) = record.key() else {
            return Err(invalid(format!(
                "character {:?} is not exactly one code point",
                record.character
            )));
        };

        if table.insert(key, record.strokes).is_some() {
            log::debug!("{}:{}: duplicate record for '{key}' replaces the earlier one", origin.display(), number + 1);
        }
    }

    log::info!("read {} stroke records from {}", table.len(), origin.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> &'static Path {
        Path::new("test.jsonl")
    }

    #[test]
    fn test_blank_lines_and_bom_are_skipped() {
        let text = "\u{feff}{\"character\":\"一\",\"strokes\":[\"M 0 0 Z\"]}\n\n   \n";
        let table = parse_source(text, origin()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[&'一'], vec!["M 0 0 Z".to_string()]);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let text = "{\"character\":\"一\",\"strokes\":[\"M 0 0 Z\"]}\n{\"character\":\"一\",\"strokes\":[\"M 1 1 Z\",\"M 2 2 Z\"]}";
        let table = parse_source(text, origin()).unwrap();
        assert_eq!(table[&'一'].len(), 2);
    }

    #[test]
    fn test_multi_scalar_character_is_rejected() {
        let text = "{\"character\":\"一\",\"strokes\":[]}\n{\"character\":\"ab\",\"strokes\":[]}";
        match parse_source(text, origin()) {
            Err(StoreError::InvalidRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let text = "{\"character\":\"二\",\"strokes\":[\"M 0 0 Z\"],\"medians\":[[1,2]]}";
        assert!(parse_source(text, origin()).is_ok());
    }
}
