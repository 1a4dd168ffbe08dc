//! Sheet configuration.
//!
//! A [`SheetConfig`] is plain data: it deserializes from JSON with every
//! field optional, and a command line can overwrite individual fields
//! before calling [`SheetConfig::validate`].
//!
//! Page geometry is kept in PostScript points (1/72 inch) internally; margins
//! are given in a [`Unit`] of the user's choosing.

use std::path::PathBuf;

use copybook_common::Rect;
use serde::{Deserialize, Serialize};

use crate::cell::Palette;
use crate::error::PaintError;
use crate::grid::GridStyle;

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Points per millimetre.
pub const POINTS_PER_MM: f32 = POINTS_PER_INCH / 25.4;

/// What the sheet is filled with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// One character per row, cycling through the sequence.
    #[default]
    LinePerCharacter,
    /// One character per page, repeated in every row.
    PagePerCharacter,
    /// One character per page, drawn from its strokes with progressive reveal.
    Stroke,
}

/// Length unit for page margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Millimetres.
    #[default]
    Mm,
    /// Inches.
    Inch,
    /// Points (1/72 inch).
    Point,
}

impl Unit {
    /// Convert `value` in this unit to points.
    #[must_use]
    pub const fn to_points(self, value: f32) -> f32 {
        match self {
            Self::Mm => value * POINTS_PER_MM,
            Self::Inch => value * POINTS_PER_INCH,
            Self::Point => value,
        }
    }
}

/// Paper size. Named sizes are portrait, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageSize {
    /// 297 × 420 mm.
    A3,
    /// 210 × 297 mm.
    #[default]
    A4,
    /// 148 × 210 mm.
    A5,
    /// 8.5 × 11 in.
    Letter,
    /// 8.5 × 14 in.
    Legal,
    /// Any size, in points.
    Custom {
        /// Width in points.
        width: f32,
        /// Height in points.
        height: f32,
    },
}

impl PageSize {
    /// Portrait `(width, height)` in points.
    #[must_use]
    pub const fn dimensions(self) -> (f32, f32) {
        match self {
            Self::A3 => (841.89, 1190.55),
            Self::A4 => (595.28, 841.89),
            Self::A5 => (419.53, 595.28),
            Self::Letter => (612.0, 792.0),
            Self::Legal => (612.0, 1008.0),
            Self::Custom { width, height } => (width, height),
        }
    }
}

/// Paper orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide.
    #[default]
    Portrait,
    /// Wider than tall.
    Landscape,
}

/// Page margins, in [`PageSetup::unit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Left margin.
    pub left: f32,
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin.
    pub bottom: f32,
}

impl Margins {
    /// The same margin on every side.
    #[must_use]
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(15.0)
    }
}

/// Paper, orientation and margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    /// Paper size.
    pub size: PageSize,
    /// Paper orientation.
    pub orientation: Orientation,
    /// Margins around the paint area.
    pub margins: Margins,
    /// Unit of `margins`.
    pub unit: Unit,
}

impl PageSetup {
    /// Page `(width, height)` in points, after orientation.
    #[must_use]
    pub fn page_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.size.dimensions();
        match self.orientation {
            Orientation::Portrait => (w.min(h), w.max(h)),
            Orientation::Landscape => (w.max(h), w.min(h)),
        }
    }

    /// The paint area in page coordinates: the page minus its margins.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::InvalidDimension`] if the margins leave no room.
    pub fn paint_area(&self) -> Result<Rect, PaintError> {
        let (width, height) = self.page_dimensions();
        let m = self.margins;
        let left = self.unit.to_points(m.left);
        let top = self.unit.to_points(m.top);
        let area = Rect::new(
            left,
            top,
            width - left - self.unit.to_points(m.right),
            height - top - self.unit.to_points(m.bottom),
        );
        if area.width > 0.0 && area.height > 0.0 && area.width.is_finite() && area.height.is_finite() {
            Ok(area)
        } else {
            Err(PaintError::InvalidDimension(format!(
                "margins leave no paint area on a {width}×{height}pt page"
            )))
        }
    }
}

/// Everything needed to paint a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Rows per page.
    pub rows: usize,
    /// Cells per row.
    pub columns: usize,
    /// The characters to practise, in order.
    pub characters: String,
    /// What the sheet is filled with.
    pub mode: Mode,
    /// How cells are ruled.
    pub grid_style: GridStyle,
    /// Fraction of a cell edge used by content.
    pub fill_scale: f32,
    /// Explicit cell content inset, overriding the one derived from
    /// `fill_scale`.
    pub cell_margin: Option<f32>,
    /// Font file used when rasterizing text.
    pub font: Option<PathBuf>,
    /// Paper setup.
    pub page: PageSetup,
    /// Colors.
    pub colors: Palette,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 8,
            characters: String::new(),
            mode: Mode::default(),
            grid_style: GridStyle::default(),
            fill_scale: 0.9,
            cell_margin: None,
            font: None,
            page: PageSetup::default(),
            colors: Palette::default(),
        }
    }
}

impl SheetConfig {
    /// Check the configuration can be painted.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::InvalidConfig`] for a zero row or column count
    /// or an empty character sequence, and [`PaintError::InvalidDimension`]
    /// if the page has no paint area. Out-of-range fill scales and cell
    /// margins are clamped by the layout instead.
    pub fn validate(&self) -> Result<(), PaintError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(PaintError::InvalidConfig(format!(
                "rows and columns must be at least 1, got {}×{}",
                self.rows, self.columns
            )));
        }
        if self.characters.trim().is_empty() {
            return Err(PaintError::InvalidConfig("no characters to practise".to_string()));
        }
        self.page.paint_area().map(|_| ())
    }
}
