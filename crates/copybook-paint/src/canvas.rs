//! The host canvas interface.
//!
//! The engine never rasterizes anything itself. It issues drawing calls on a
//! [`Canvas`], which may record them ([`RecordingCanvas`](crate::RecordingCanvas)),
//! rasterize them, or forward them to a print device.

use std::ops::{Deref, DerefMut};

use copybook_common::{Point, Rect};
use copybook_stroke::Path;
use serde::Serialize;

use crate::color::ColorValue;
use crate::transform::Transform;

/// Stroke settings for lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pen {
    /// Line width in page units.
    pub width: f32,
    /// Line color.
    pub color: ColorValue,
    /// Dash length for dashed lines (gaps are the same length); `None` for
    /// a solid line.
    pub dash: Option<f32>,
}

impl Pen {
    /// A solid pen.
    #[must_use]
    pub const fn solid(width: f32, color: ColorValue) -> Self {
        Self {
            width,
            color,
            dash: None,
        }
    }

    /// A dashed pen with equal dash and gap lengths.
    #[must_use]
    pub const fn dashed(width: f32, color: ColorValue, dash: f32) -> Self {
        Self {
            width,
            color,
            dash: Some(dash),
        }
    }
}

/// A page-structured 2D drawing surface.
///
/// Geometry passed to the drawing methods is in user space and goes through
/// the current transform. Pen widths and font sizes are not scaled.
pub trait Canvas {
    /// Draw a straight line.
    fn draw_line(&mut self, from: Point, to: Point, pen: &Pen);

    /// Fill a path as one closed region (non-zero winding).
    fn fill_path(&mut self, path: &Path, color: ColorValue);

    /// Draw `text` centered in `rect`.
    fn draw_text(&mut self, rect: Rect, text: &str, font_size: f32, color: ColorValue);

    /// Push the current transform onto the state stack.
    fn save(&mut self);

    /// Pop the state stack, restoring the transform active at the matching
    /// [`save`](Canvas::save). Unbalanced calls are ignored.
    fn restore(&mut self);

    /// Replace the current transform.
    fn set_transform(&mut self, transform: Transform);

    /// The current transform.
    fn transform(&self) -> Transform;

    /// Finish the current page and start a new one.
    fn new_page(&mut self);
}

/// Scoped canvas state.
///
/// Saves the canvas state on creation and restores it when dropped, on every
/// exit path. Drawing goes through the guard, which dereferences to the
/// canvas.
///
/// ```
/// use copybook_paint::{Canvas, CanvasState, RecordingCanvas, Transform};
///
/// let mut canvas = RecordingCanvas::new(100.0, 100.0);
/// {
///     let mut state = CanvasState::new(&mut canvas);
///     state.set_transform(Transform::scale_translate(2.0, 2.0, 0.0, 0.0));
/// }
/// assert_eq!(canvas.transform(), Transform::IDENTITY);
/// ```
pub struct CanvasState<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
}

impl<'a, C: Canvas + ?Sized> CanvasState<'a, C> {
    /// Save the state of `canvas` until the guard is dropped.
    pub fn new(canvas: &'a mut C) -> Self {
        canvas.save();
        Self { canvas }
    }
}

impl<C: Canvas + ?Sized> Deref for CanvasState<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for CanvasState<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for CanvasState<'_, C> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}
