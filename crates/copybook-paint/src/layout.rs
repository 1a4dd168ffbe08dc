//! Sheet layout.
//!
//! Cells are always square. The cell edge is the largest square that fits
//! both the column width and the row height; leftover vertical room is
//! spread between rows so the last row ends exactly at the bottom of the
//! paint area.
//!
//! ```text
//!   x = cell_size * col                      total_width = cell_size * cols
//!   ├──────┬──────┬──────┬──────┤ ─┬─ y = row_height * row
//!   │      │      │      │      │  │ cell_size
//!   ├──────┴──────┴──────┴──────┤ ─┴─
//!                                  │ spacing
//!   ├──────┬──────┬──────┬──────┤ ─┴─
//! ```

use copybook_common::Rect;

use crate::error::PaintError;

/// Smallest accepted fill scale; smaller (or negative) values are clamped
/// up to it so cells never collapse to a point.
pub const MIN_FILL_SCALE: f32 = 0.01;

/// Geometry of one paint pass. Derived fresh on every paint call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutResult {
    /// Edge of a (square) cell.
    pub cell_size: f32,
    /// Vertical gap between consecutive rows.
    pub spacing: f32,
    /// Distance from the top of one row to the top of the next.
    pub row_height: f32,
    /// Width of a full row of cells.
    pub total_width: f32,
    /// Inset applied on every side of a cell before drawing its content.
    pub margin: f32,
    /// Font size for guide characters.
    pub font_size: f32,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

/// Compute the layout of a `rows` × `cols` grid on a paint area.
///
/// `fill_scale` is the fraction of a cell edge occupied by content. It is
/// clamped into [`MIN_FILL_SCALE`]`..=1.0` rather than rejected; a non-finite
/// value counts as 1.
///
/// # Errors
///
/// Returns [`PaintError::InvalidDimension`] if `rows` or `cols` is zero or
/// the paint area is not a positive finite size.
pub fn compute_layout(
    page_width: f32,
    page_height: f32,
    rows: usize,
    cols: usize,
    fill_scale: f32,
) -> Result<LayoutResult, PaintError> {
    if rows < 1 || cols < 1 {
        return Err(PaintError::InvalidDimension(format!(
            "grid must have at least one row and one column, got {rows}×{cols}"
        )));
    }
    if !(page_width.is_finite() && page_width > 0.0 && page_height.is_finite() && page_height > 0.0) {
        return Err(PaintError::InvalidDimension(format!(
            "paint area must be positive, got {page_width}×{page_height}"
        )));
    }

    let rows_f = rows as f32;
    let cols_f = cols as f32;

    // STEP 1: Raw cell extents.
    let raw_width = page_width / cols_f;
    let raw_height = page_height / rows_f;

    // STEP 2: Square cells.
    let cell_size = raw_width.min(raw_height);
    let total_width = cell_size * cols_f;

    // STEP 3: Spread the leftover height over the gaps between rows.
    // A single row has no gap.
    let spacing = if rows > 1 {
        (raw_height - cell_size) * rows_f / (rows_f - 1.0)
    } else {
        0.0
    };

    // STEP 4: Content inset.
    let fill_scale = if fill_scale.is_finite() {
        fill_scale.clamp(MIN_FILL_SCALE, 1.0)
    } else {
        1.0
    };
    let margin = cell_size * (1.0 - fill_scale) / 2.0;

    Ok(LayoutResult {
        cell_size,
        spacing,
        row_height: cell_size + spacing,
        total_width,
        margin,
        font_size: (cell_size * fill_scale).round(),
        rows,
        cols,
    })
}

impl LayoutResult {
    /// Replace the derived margin with an explicit one.
    ///
    /// The margin is clamped so content keeps at least a sliver of the
    /// cell. The font size is not changed.
    #[must_use]
    pub fn with_margin(self, margin: f32) -> Self {
        let max = self.cell_size * (1.0 - MIN_FILL_SCALE) / 2.0;
        let margin = if margin.is_finite() { margin.clamp(0.0, max) } else { self.margin };
        Self { margin, ..self }
    }

    /// Y coordinate of the top of `row`.
    #[must_use]
    pub fn row_top(&self, row: usize) -> f32 {
        self.row_height * row as f32
    }

    /// The band covered by one row of cells (without spacing).
    #[must_use]
    pub fn row_rect(&self, row: usize) -> Rect {
        Rect::new(0.0, self.row_top(row), self.total_width, self.cell_size)
    }

    /// The full cell at `(row, col)`, before the margin is applied.
    #[must_use]
    pub fn cell_bounds(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.cell_size * col as f32,
            self.row_top(row),
            self.cell_size,
            self.cell_size,
        )
    }

    /// The content rectangle of the cell at `(row, col)`.
    #[must_use]
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        self.cell_bounds(row, col).deflate(self.margin)
    }
}
