//! Grid ruling.
//!
//! Two styles share the same row loop and solid frame:
//!
//! ```text
//!   Tian (田)                 FourLine (四线三格)
//!   ┏━━━━┯━━━━┳━━━━┯━━━━┓     ┏━━━━━━━━━┳━━━━━━━━━┓
//!   ┃    ┆    ┃    ┆    ┃     ┃- - - - -┃- - - - -┃
//!   ┠╌╌╌╌┼╌╌╌╌╂╌╌╌╌┼╌╌╌╌┨     ┃         ┃         ┃
//!   ┃    ┆    ┃    ┆    ┃     ┃- - - - -┃- - - - -┃
//!   ┗━━━━┷━━━━┻━━━━┷━━━━┛     ┗━━━━━━━━━┻━━━━━━━━━┛
//! ```
//!
//! Dashed guides are drawn first so the solid frame covers their ends.

use copybook_common::Point;
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, CanvasState, Pen};
use crate::color::ColorValue;
use crate::layout::LayoutResult;

/// Width of the solid cell frame.
pub const BORDER_WIDTH: f32 = 2.0;

/// Width of the dashed guide lines.
pub const GUIDE_WIDTH: f32 = 1.0;

/// Dashes per cell edge: a guide's dash length is `cell_size / 13`.
pub const DASHES_PER_CELL: f32 = 13.0;

/// How cells are ruled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridStyle {
    /// Crosshair through every cell, dividing it into quadrants.
    #[default]
    Tian,
    /// Four horizontal lines enclosing three equal spaces.
    FourLine,
}

/// Rule every row of the grid.
pub fn draw_grid<C: Canvas + ?Sized>(canvas: &mut C, layout: &LayoutResult, style: GridStyle, color: ColorValue) {
    for row in 0..layout.rows {
        draw_row_grid(canvas, layout, row, style, color);
    }
}

/// Rule one row: dashed guides first, then the solid frame and dividers.
///
/// The canvas state is saved on entry and restored on return.
pub fn draw_row_grid<C: Canvas + ?Sized>(
    canvas: &mut C,
    layout: &LayoutResult,
    row: usize,
    style: GridStyle,
    color: ColorValue,
) {
    let mut canvas = CanvasState::new(canvas);

    let size = layout.cell_size;
    let top = layout.row_top(row);
    let bottom = top + size;
    let guide = Pen::dashed(GUIDE_WIDTH, color, size / DASHES_PER_CELL);
    let border = Pen::solid(BORDER_WIDTH, color);

    match style {
        GridStyle::Tian => {
            let half = size / 2.0;
            for col in 0..layout.cols {
                let left = size * col as f32;
                canvas.draw_line(Point::new(left + half, top), Point::new(left + half, bottom), &guide);
                canvas.draw_line(Point::new(left, top + half), Point::new(left + size, top + half), &guide);
            }
        }
        GridStyle::FourLine => {
            for third in [1.0, 2.0] {
                let y = top + size * third / 3.0;
                canvas.draw_line(Point::new(0.0, y), Point::new(layout.total_width, y), &guide);
            }
        }
    }

    canvas.draw_line(Point::new(0.0, top), Point::new(layout.total_width, top), &border);
    canvas.draw_line(Point::new(0.0, bottom), Point::new(layout.total_width, bottom), &border);
    for col in 0..=layout.cols {
        let x = size * col as f32;
        canvas.draw_line(Point::new(x, top), Point::new(x, bottom), &border);
    }
}
