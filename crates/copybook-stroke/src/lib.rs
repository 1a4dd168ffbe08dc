//! Stroke data for the Copybook renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **Path micro-language** ([`path`]) - parses a compact stroke description
//!   such as `"M 10 20 L 30 40 Q 50 60 70 80 Z"` into a [`Path`]
//! - **Stroke source** ([`source`]) - reads the newline-delimited JSON file
//!   mapping each character to its strokes in writing order
//! - **Stroke stores** ([`store`]) - the [`StrokeStore`] capability with an
//!   in-memory backend and a persistent indexed backend
//!
//! Stroke coordinates live in a fixed design frame: x from 0 to 1024 and
//! y from 900 (top) down to -124 (bottom), see [`DESIGN_FRAME`].

pub mod path;
pub mod source;
pub mod store;

pub use path::{Path, PathError, PathSegment, parse};
pub use source::StrokeRecord;
pub use store::{IndexedStrokeStore, MemoryStrokeStore, StoreError, StrokeSet, StrokeStore};

use copybook_common::{Point, Quad};

/// The normalized frame every stroke outline is defined in.
///
/// Corners in top-left, top-right, bottom-right, bottom-left order. The y
/// axis points up, the opposite of page space.
pub const DESIGN_FRAME: Quad = Quad::new(
    Point::new(0.0, 900.0),
    Point::new(1024.0, 900.0),
    Point::new(1024.0, -124.0),
    Point::new(0.0, -124.0),
);
