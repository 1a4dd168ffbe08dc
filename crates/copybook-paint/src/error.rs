//! Paint errors.

use copybook_stroke::PathError;

/// Errors raised while laying out or painting a sheet.
///
/// Only [`InvalidDimension`](PaintError::InvalidDimension) raised by the
/// layout and [`InvalidConfig`](PaintError::InvalidConfig) abort a paint
/// call. The others are scoped to one character or one stroke: they are
/// logged, counted in the summary, and painting moves on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaintError {
    /// Page or grid geometry that cannot be laid out, or a cell whose
    /// projective mapping is singular.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),
    /// A stroke description could not be parsed.
    #[error("malformed stroke {index} of '{character}': {source}")]
    MalformedPath {
        /// Character the stroke belongs to.
        character: String,
        /// Zero-based stroke index in writing order.
        index: usize,
        /// Parser error.
        #[source]
        source: PathError,
    },
    /// The stroke store has nothing for the character.
    #[error("no stroke data for '{0}'")]
    MissingStrokeData(String),
    /// The sheet configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
