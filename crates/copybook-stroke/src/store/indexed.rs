//! Persistent indexed stroke store.
//!
//! # File layout
//!
//! ```text
//! {"version":1,"source_len":123456,"entries":{"一":[0,42],"二":[43,97]}}\n
//! ["M 100 400 L 900 400 Z"]\n
//! ["M 200 300 L 800 300 Z","M 100 600 L 900 600 Z"]\n
//! ...
//! ```
//!
//! The first line is the header: a map from character to `[offset, length]`
//! of its JSON-encoded stroke array, offsets counted from the first byte
//! after the header line. A lookup seeks straight to the record, so opening
//! an existing index costs one header read regardless of the source size.
//!
//! Rebuilding writes the complete new index to a temporary sibling file,
//! syncs it, and renames it over the old one. Readers holding the previous
//! snapshot keep their open file handle and finish undisturbed.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use super::{StoreError, StrokeSet, StrokeStore, report_missing};
use crate::source::read_source;

/// Format version written into every header.
const INDEX_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct IndexHeader {
    version: u32,
    /// Byte length of the source the index was built from.
    source_len: u64,
    entries: BTreeMap<String, [u64; 2]>,
}

/// An opened index: the decoded header plus a handle to read records.
#[derive(Debug, Default)]
struct Snapshot {
    entries: HashMap<char, (u64, u64)>,
    /// Byte offset of the first record.
    body_start: u64,
    /// `None` for the empty store.
    file: Option<Mutex<File>>,
}

impl Snapshot {
    fn read_record(&self, offset: u64, len: u64) -> std::io::Result<StrokeSet> {
        let Some(file) = &self.file else {
            return Ok(StrokeSet::new());
        };
        let mut buf = Vec::new();
        {
            let mut file = file.lock();
            let _ = file.seek(SeekFrom::Start(self.body_start + offset))?;
            let _ = Read::by_ref(&mut *file).take(len).read_to_end(&mut buf)?;
        }
        if buf.len() as u64 != len {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("record ends after {} of {len} bytes", buf.len()),
            ));
        }
        serde_json::from_slice(&buf).map_err(std::io::Error::other)
    }
}

/// A [`StrokeStore`] backed by an indexed file on disk.
#[derive(Debug)]
pub struct IndexedStrokeStore {
    index_path: PathBuf,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl IndexedStrokeStore {
    /// Create an empty store that will write its index to `index_path` on
    /// the first [`load`](StrokeStore::load).
    #[must_use]
    pub fn new(index_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        }
    }

    /// Open an existing index without touching the stroke source.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the index is missing, unreadable, or was
    /// written by an incompatible version.
    pub fn open(index_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let index_path = index_path.into();
        let (snapshot, _) = open_snapshot(&index_path)?;
        Ok(Self {
            index_path,
            snapshot: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Open the index at `index_path`, rebuilding it from `source` first if
    /// it is missing, outdated, or unreadable.
    ///
    /// An index counts as outdated when the recorded source length differs
    /// from the current length of `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if a rebuild was needed and failed.
    pub fn open_or_build(index_path: impl Into<PathBuf>, source: &Path) -> Result<Self, StoreError> {
        let index_path = index_path.into();
        let source_len = fs::metadata(source).map(|m| m.len()).ok();

        match open_snapshot(&index_path) {
            Ok((snapshot, recorded_len)) if source_len.is_none_or(|len| len == recorded_len) => {
                log::debug!("reusing stroke index {}", index_path.display());
                return Ok(Self {
                    index_path,
                    snapshot: RwLock::new(Arc::new(snapshot)),
                });
            }
            Ok(_) => log::info!("stroke index {} is outdated, rebuilding", index_path.display()),
            Err(e) => log::info!("rebuilding stroke index: {e}"),
        }

        let store = Self::new(index_path);
        let _ = store.load(source)?;
        Ok(store)
    }

    /// Path of the index file.
    #[must_use]
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }
}

impl StrokeStore for IndexedStrokeStore {
    fn load(&self, source: &Path) -> Result<usize, StoreError> {
        let table = read_source(source)?;
        let source_len = fs::metadata(source)
            .map_err(|e| StoreError::SourceLoadFailure {
                path: source.to_path_buf(),
                source: e,
            })?
            .len();

        write_index(&self.index_path, &table, source_len)?;
        let (snapshot, _) = open_snapshot(&self.index_path)?;
        let len = snapshot.entries.len();
        *self.snapshot.write() = Arc::new(snapshot);

        log::info!("stroke index {} holds {len} characters", self.index_path.display());
        Ok(len)
    }

    fn lookup(&self, character: char) -> StrokeSet {
        let snapshot = Arc::clone(&self.snapshot.read());
        let Some(&(offset, len)) = snapshot.entries.get(&character) else {
            report_missing(character);
            return StrokeSet::new();
        };

        snapshot.read_record(offset, len).unwrap_or_else(|e| {
            log::warn!(
                "stroke index {}: cannot read record for '{character}': {e}",
                self.index_path.display()
            );
            StrokeSet::new()
        })
    }

    fn len(&self) -> usize {
        self.snapshot.read().entries.len()
    }
}

/// Write a complete index for `table` and atomically move it into place.
fn write_index(index_path: &Path, table: &BTreeMap<char, StrokeSet>, source_len: u64) -> Result<(), StoreError> {
    let index_error = |reason: String| StoreError::Index {
        path: index_path.to_path_buf(),
        reason,
    };

    let mut body = Vec::new();
    let mut entries = BTreeMap::new();
    for (character, strokes) in table {
        let record = serde_json::to_vec(strokes).map_err(|e| index_error(e.to_string()))?;
        let _ = entries.insert(character.to_string(), [body.len() as u64, record.len() as u64]);
        body.extend_from_slice(&record);
        body.push(b'\n');
    }

    let header = IndexHeader {
        version: INDEX_VERSION,
        source_len,
        entries,
    };
    let header = serde_json::to_vec(&header).map_err(|e| index_error(e.to_string()))?;

    let mut tmp_name = index_path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = index_path.with_file_name(tmp_name);

    let write = || -> std::io::Result<()> {
        if let Some(parent) = index_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&tmp_path)?;
        file.write_all(&header)?;
        file.write_all(b"\n")?;
        file.write_all(&body)?;
        file.sync_all()?;
        fs::rename(&tmp_path, index_path)
    };

    write().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        index_error(format!("cannot write index: {e}"))
    })
}

/// Open and decode an index file. Also returns the recorded source length.
fn open_snapshot(index_path: &Path) -> Result<(Snapshot, u64), StoreError> {
    let index_error = |reason: String| StoreError::Index {
        path: index_path.to_path_buf(),
        reason,
    };

    let file = File::open(index_path).map_err(|source| StoreError::SourceLoadFailure {
        path: index_path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    let header_len = reader
        .read_line(&mut line)
        .map_err(|e| index_error(format!("cannot read header: {e}")))?;

    let header: IndexHeader =
        serde_json::from_str(&line).map_err(|e| index_error(format!("malformed header: {e}")))?;
    if header.version != INDEX_VERSION {
        return Err(index_error(format!(
            "unsupported version {} (expected {INDEX_VERSION})",
            header.version
        )));
    }

    let file_len = reader
        .get_ref()
        .metadata()
        .map_err(|e| index_error(format!("cannot stat index: {e}")))?
        .len();
    let body_len = file_len.saturating_sub(header_len as u64);

    let mut entries = HashMap::with_capacity(header.entries.len());
    for (key, [offset, len]) in header.entries {
        let mut chars = key.chars();
        let (Some(character), None) = (chars.next(), chars.next()) else {
            return Err(index_error(format!("bad key {key:?}")));
        };
        if offset.checked_add(len).is_none_or(|end| end > body_len) {
            return Err(index_error(format!(
                "record for {key:?} at [{offset}, {len}] runs past the end of the index"
            )));
        }
        let _ = entries.insert(character, (offset, len));
    }

    let snapshot = Snapshot {
        entries,
        body_start: header_len as u64,
        file: Some(Mutex::new(reader.into_inner())),
    };
    Ok((snapshot, header.source_len))
}
