//! Deduplicated warnings.
//!
//! A missing character or a broken stroke tends to show up once per cell,
//! which on a full sheet means dozens of identical messages.
//!
//! - [`warn_once`] emits a message a single time for the life of the
//!   process. It suits facts that do not change between paint passes, such
//!   as "no font available".
//! - [`WarningSet`] deduplicates within one scope. The painter owns one per
//!   paint pass, so concurrent passes never reset each other.

use std::collections::HashSet;

use parking_lot::Mutex;

/// Global set of warnings we've already emitted.
static WARNED: Mutex<Option<HashSet<String>>> = parking_lot::const_mutex(None);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Emit a warning through `log` once per unique `(component, message)` pair.
///
/// Returns `true` if the warning was emitted, `false` if it was suppressed
/// as a duplicate.
///
/// # Example
/// ```
/// use copybook_common::warning::warn_once;
///
/// let _ = warn_once("store", "no strokes for '永'");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = key(component, message);
    let should_emit = WARNED.lock().get_or_insert_with(HashSet::new).insert(key.clone());

    if should_emit {
        log::warn!(target: "copybook", "{key}");
    }
    should_emit
}

/// Warnings deduplicated within one scope, such as a single paint pass.
///
/// # Example
/// ```
/// use copybook_common::warning::WarningSet;
///
/// let mut warnings = WarningSet::new();
/// assert!(warnings.warn("painter", "no strokes for '永'"));
/// assert!(!warnings.warn("painter", "no strokes for '永'"));
/// ```
#[derive(Debug, Default)]
pub struct WarningSet {
    seen: HashSet<String>,
}

impl WarningSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a warning through `log` unless this set has already emitted it.
    ///
    /// Returns `true` if the warning was emitted.
    pub fn warn(&mut self, component: &str, message: &str) -> bool {
        let key = key(component, message);
        if self.seen.contains(&key) {
            return false;
        }
        log::warn!(target: "copybook", "{key}");
        self.seen.insert(key)
    }

    /// Number of distinct warnings emitted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
