//! Cell content.
//!
//! **Text mode** repeats one guide character across a row: the first cell
//! is the solid exemplar, the rest are muted for tracing.
//!
//! **Stroke mode** fills a whole page with one character drawn from its
//! stroke outlines. Column `k` shows strokes `0..=k` solid and the rest
//! muted, so reading a row left to right reveals the stroke order.

use copybook_stroke::{DESIGN_FRAME, Path};
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, CanvasState};
use crate::color::ColorValue;
use crate::error::PaintError;
use crate::layout::LayoutResult;
use crate::transform::Transform;

/// Colors used for cell content and grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Exemplar glyphs and already-written strokes.
    pub solid: ColorValue,
    /// Tracing glyphs and strokes not yet written.
    pub muted: ColorValue,
    /// Grid lines.
    pub grid: ColorValue,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            solid: ColorValue::BLACK,
            muted: ColorValue::MUTED_GRAY,
            grid: ColorValue::BLACK,
        }
    }
}

/// Draw `character` in every cell of `row`.
///
/// Column 0 uses the solid color, every other column the muted one.
pub fn draw_text_row<C: Canvas + ?Sized>(
    canvas: &mut C,
    layout: &LayoutResult,
    row: usize,
    character: &str,
    palette: &Palette,
) {
    for col in 0..layout.cols {
        let color = if col == 0 { palette.solid } else { palette.muted };
        canvas.draw_text(layout.cell_rect(row, col), character, layout.font_size, color);
    }
}

/// Fill every cell of the page with the strokes of one character.
///
/// `strokes` are in writing order and defined in [`DESIGN_FRAME`]. Returns
/// the number of cells drawn; an empty `strokes` draws nothing.
///
/// # Errors
///
/// Returns [`PaintError::InvalidDimension`] if a cell's projective mapping
/// is singular. Every cell is solved before the first one is drawn, so
/// nothing has been drawn in that case.
pub fn draw_stroke_character_page<C: Canvas + ?Sized>(
    canvas: &mut C,
    layout: &LayoutResult,
    strokes: &[Path],
    palette: &Palette,
) -> Result<usize, PaintError> {
    if strokes.is_empty() {
        return Ok(0);
    }
    let transforms = cell_transforms(layout)?;
    Ok(draw_stroke_cells(canvas, layout, &transforms, strokes, palette))
}

/// Solve the mapping from [`DESIGN_FRAME`] onto every cell, row-major.
///
/// The result depends on the layout alone, so a painter solves it once per
/// pass and reuses it for every stroke page.
///
/// # Errors
///
/// Returns [`PaintError::InvalidDimension`] for the first cell whose
/// content rectangle cannot be mapped onto.
pub fn cell_transforms(layout: &LayoutResult) -> Result<Vec<Transform>, PaintError> {
    let mut transforms = Vec::with_capacity(layout.rows * layout.cols);
    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let target = layout.cell_rect(row, col).to_quad();
            let transform = Transform::quad_to_quad(&DESIGN_FRAME, &target).ok_or_else(|| {
                PaintError::InvalidDimension(format!("cell ({row}, {col}) has a degenerate target {target:?}"))
            })?;
            transforms.push(transform);
        }
    }
    Ok(transforms)
}

/// Draw `strokes` into the cells whose mappings are `transforms`, as
/// returned by [`cell_transforms`]. Returns the number of cells drawn.
///
/// Strokes are filled from last to first so that, where strokes overlap,
/// the solid (already written) ones end up on top of the muted ones.
pub fn draw_stroke_cells<C: Canvas + ?Sized>(
    canvas: &mut C,
    layout: &LayoutResult,
    transforms: &[Transform],
    strokes: &[Path],
    palette: &Palette,
) -> usize {
    for (cell, transform) in transforms.iter().enumerate() {
        let col = cell % layout.cols.max(1);

        let mut canvas = CanvasState::new(&mut *canvas);
        let base = canvas.transform();
        canvas.set_transform(transform.then(&base));

        for (index, stroke) in strokes.iter().enumerate().rev() {
            let color = if index <= col { palette.solid } else { palette.muted };
            canvas.fill_path(stroke, color);
        }
    }
    transforms.len()
}
