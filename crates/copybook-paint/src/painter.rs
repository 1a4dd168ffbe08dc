//! Painter - drives a whole sheet onto a canvas.
//!
//! [`CopybookPainter::paint`] is the entry point. Each call starts from the
//! configuration alone (layout, page plan and warning state are rebuilt), so
//! the same painter can serve a preview and then a print job, or both at
//! once from different threads.
//!
//! Painting order per page: grid first, then cell content on top.

use std::sync::Arc;

use copybook_common::warning::WarningSet;
use copybook_stroke::{Path, StrokeStore, parse};
use serde::Serialize;

use crate::canvas::Canvas;
use crate::cell::{cell_transforms, draw_stroke_cells, draw_text_row};
use crate::config::{Mode, SheetConfig};
use crate::error::PaintError;
use crate::grid::draw_grid;
use crate::layout::{LayoutResult, compute_layout};
use crate::sequencer::{PageBreaker, PageContent, PageSequencer, split_characters};

/// What a paint call produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaintSummary {
    /// Pages actually drawn.
    pub pages: usize,
    /// Characters whose page was skipped, in sequence order.
    pub skipped_characters: Vec<String>,
    /// Stroke descriptions that failed to parse and were left out.
    pub skipped_strokes: usize,
}

/// Paints copybook sheets described by a [`SheetConfig`].
pub struct CopybookPainter {
    config: SheetConfig,
    store: Option<Arc<dyn StrokeStore>>,
}

impl CopybookPainter {
    /// Create a painter without a stroke store. Only text modes can paint.
    #[must_use]
    pub fn new(config: SheetConfig) -> Self {
        Self { config, store: None }
    }

    /// Attach the stroke store used in stroke mode.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn StrokeStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The configuration being painted.
    #[must_use]
    pub const fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Lay out the configured grid on a paint area of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::InvalidDimension`] if the grid cannot be laid out.
    pub fn layout(&self, width: f32, height: f32) -> Result<LayoutResult, PaintError> {
        let layout = compute_layout(width, height, self.config.rows, self.config.columns, self.config.fill_scale)?;
        Ok(match self.config.cell_margin {
            Some(margin) => layout.with_margin(margin),
            None => layout,
        })
    }

    /// Paint the sheet on the paint area of the configured page.
    ///
    /// The canvas origin is the top-left corner of the paint area.
    ///
    /// # Errors
    ///
    /// See [`paint_area`](Self::paint_area).
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<PaintSummary, PaintError> {
        let area = self.config.page.paint_area()?;
        self.paint_area(canvas, area.width, area.height)
    }

    /// Paint the sheet on a paint area of `width` × `height`.
    ///
    /// Per-character problems (no strokes, unparsable strokes, a degenerate
    /// cell) are logged and reported in the summary; painting continues
    /// with the next character. A skipped character takes no page.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::InvalidDimension`] if the layout fails, and
    /// [`PaintError::InvalidConfig`] for stroke mode without a store. Nothing
    /// has been drawn in either case.
    pub fn paint_area<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        width: f32,
        height: f32,
    ) -> Result<PaintSummary, PaintError> {
        let layout = self.layout(width, height)?;
        let store = match (self.config.mode, &self.store) {
            (Mode::Stroke, None) => {
                return Err(PaintError::InvalidConfig("stroke mode needs a stroke store".to_string()));
            }
            (_, store) => store.as_deref(),
        };

        let characters = split_characters(&self.config.characters);
        let plan = PageSequencer::new(self.config.mode, &characters, layout.rows);
        log::debug!(
            "painting {} characters as {} pages of {}×{} cells ({}pt)",
            characters.len(),
            plan.len(),
            layout.rows,
            layout.cols,
            layout.cell_size
        );

        // Every stroke page shares the same cells; solve them before any
        // page is started so a degenerate cell cannot leave a half page.
        let cells = if self.config.mode == Mode::Stroke {
            cell_transforms(&layout)
        } else {
            Ok(Vec::new())
        };

        let mut warnings = WarningSet::new();
        let mut breaker = PageBreaker::new();
        let mut summary = PaintSummary::default();

        for page in plan.pages() {
            match page {
                PageContent::TextRows(rows) => {
                    breaker.begin_page(canvas);
                    draw_grid(canvas, &layout, self.config.grid_style, self.config.colors.grid);
                    for (row, character) in rows.iter().enumerate() {
                        draw_text_row(canvas, &layout, row, character, &self.config.colors);
                    }
                }
                PageContent::Strokes(character) => {
                    let strokes = match store {
                        Some(store) => strokes_for(store, character, &mut summary, &mut warnings),
                        None => Vec::new(),
                    };
                    if strokes.is_empty() {
                        let err = PaintError::MissingStrokeData(character.clone());
                        let _ = warnings.warn("painter", &format!("{err}; page skipped"));
                        summary.skipped_characters.push(character.clone());
                        continue;
                    }

                    let transforms = match &cells {
                        Ok(transforms) => transforms,
                        Err(err) => {
                            let _ = warnings.warn("painter", &format!("'{character}': {err}; page skipped"));
                            summary.skipped_characters.push(character.clone());
                            continue;
                        }
                    };

                    breaker.begin_page(canvas);
                    draw_grid(canvas, &layout, self.config.grid_style, self.config.colors.grid);
                    let _ = draw_stroke_cells(canvas, &layout, transforms, &strokes, &self.config.colors);
                }
            }
        }

        summary.pages = breaker.pages();
        log::debug!("painted {} pages", summary.pages);
        Ok(summary)
    }
}

impl std::fmt::Debug for CopybookPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopybookPainter")
            .field("config", &self.config)
            .field("store_len", &self.store.as_ref().map(|store| store.len()))
            .finish()
    }
}

/// Look up and parse the strokes of `character`, dropping malformed ones.
fn strokes_for(
    store: &dyn StrokeStore,
    character: &str,
    summary: &mut PaintSummary,
    warnings: &mut WarningSet,
) -> Vec<Path> {
    let Some(base) = character.chars().next() else {
        return Vec::new();
    };

    store
        .lookup(base)
        .iter()
        .enumerate()
        .filter_map(|(index, description)| match parse(description) {
            Ok(path) => Some(path),
            Err(source) => {
                let err = PaintError::MalformedPath {
                    character: character.to_string(),
                    index,
                    source,
                };
                let _ = warnings.warn("painter", &err.to_string());
                summary.skipped_strokes += 1;
                None
            }
        })
        .collect()
}
