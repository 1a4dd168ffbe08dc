//! Common utilities for the Copybook renderer.
//!
//! This crate provides shared infrastructure used by all copybook components:
//! - **Geometry** - points, rectangles and quadrilaterals in page space
//! - **Warning System** - deduplicated warnings routed through `log`

pub mod geometry;
pub mod warning;

pub use geometry::{Point, Quad, Rect};
