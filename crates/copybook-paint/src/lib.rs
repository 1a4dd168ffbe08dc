//! Layout and painting for copybook practice sheets.
//!
//! # Architecture
//!
//! ```text
//! SheetConfig → Layout → Grid + Cells → Canvas
//!                                         ↓
//!                               DisplayList (per page)
//! ```
//!
//! - [`layout`] turns the paint area and grid size into cell geometry.
//! - [`grid`] rules the cells (Tian crosshair or four-line ruling).
//! - [`cell`] draws cell content: faded guide characters in text mode, or
//!   stroke outlines revealed one stroke per column in stroke mode.
//! - [`sequencer`] decides which character goes on which page and row.
//! - [`painter`] ties it together behind [`CopybookPainter::paint`].
//!
//! Everything draws through the [`Canvas`] trait. [`RecordingCanvas`]
//! implements it by recording a [`DisplayList`] per page, which a renderer
//! can then execute.

pub mod canvas;
pub mod cell;
pub mod color;
pub mod config;
pub mod display_list;
pub mod error;
pub mod grid;
pub mod layout;
pub mod painter;
pub mod sequencer;
pub mod transform;

pub use canvas::{Canvas, CanvasState, Pen};
pub use cell::{Palette, cell_transforms, draw_stroke_cells, draw_stroke_character_page, draw_text_row};
pub use color::ColorValue;
pub use config::{Margins, Mode, Orientation, PageSetup, PageSize, SheetConfig, Unit};
pub use display_list::{DisplayCommand, DisplayList, Document, RecordingCanvas};
pub use error::PaintError;
pub use grid::{GridStyle, draw_grid, draw_row_grid};
pub use layout::{LayoutResult, MIN_FILL_SCALE, compute_layout};
pub use painter::{CopybookPainter, PaintSummary};
pub use sequencer::{PageBreaker, PageContent, PageSequencer, split_characters};
pub use transform::Transform;
