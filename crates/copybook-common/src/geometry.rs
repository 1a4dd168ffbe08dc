//! Page-space geometry.
//!
//! All coordinates are `f32` device-independent units (points) with the
//! origin at the top-left of the paint area and y growing downward.

use serde::{Deserialize, Serialize};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle positioned in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrink the rectangle by `inset` on every side.
    ///
    /// The size never goes negative: an inset larger than half an edge
    /// collapses that edge onto the center.
    #[must_use]
    pub fn deflate(&self, inset: f32) -> Self {
        let dx = inset.min(self.width / 2.0);
        let dy = inset.min(self.height / 2.0);
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - 2.0 * dx,
            height: self.height - 2.0 * dy,
        }
    }

    /// The four corners in page order: top-left, top-right, bottom-right,
    /// bottom-left.
    #[must_use]
    pub fn to_quad(&self) -> Quad {
        Quad::new(
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        )
    }
}

/// A general quadrilateral given by its four corners.
///
/// Corner order is top-left, top-right, bottom-right, bottom-left, which is
/// also the order used when solving quad-to-quad mappings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    /// Corners in TL, TR, BR, BL order.
    pub corners: [Point; 4],
}

impl Quad {
    /// Create a quad from its corners.
    #[must_use]
    pub const fn new(top_left: Point, top_right: Point, bottom_right: Point, bottom_left: Point) -> Self {
        Self {
            corners: [top_left, top_right, bottom_right, bottom_left],
        }
    }

    /// Twice the signed area (shoelace formula). Zero for degenerate quads.
    #[must_use]
    pub fn signed_area2(&self) -> f32 {
        let c = &self.corners;
        (0..4)
            .map(|i| {
                let (a, b) = (c[i], c[(i + 1) % 4]);
                a.x * b.y - b.x * a.y
            })
            .sum()
    }
}
