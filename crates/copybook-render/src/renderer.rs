//! Software renderer for sheet previews and print images.
//!
//! Executes a [`DisplayList`] into a pixel buffer: tiny-skia for lines and
//! outlines, fontdue for guide characters.
//!
//! ```text
//! Layout → Paint → Render
//!            ↓        ↓
//!      DisplayList → Pixels
//! ```
//!
//! The renderer knows nothing about grids or strokes. Display lists are in
//! paint-area units; a [`PageFrame`] places the paint area on the page and
//! the scale converts page units to pixels.

use std::path::Path;

use copybook_common::Point;
use copybook_common::warning::warn_once;
use copybook_paint::{ColorValue, DisplayCommand, DisplayList, Document, Pen};
use copybook_stroke::PathSegment;
use fontdue::Font;
use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke, StrokeDash, Transform,
};

use crate::RenderError;

/// Where the paint area sits on the rendered page, in page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    /// Top-left corner of the paint area on the page.
    pub origin: Point,
}

impl PageFrame {
    /// A frame exactly the size of the document's paint area.
    #[must_use]
    pub const fn from_document(document: &Document) -> Self {
        Self {
            width: document.width,
            height: document.height,
            origin: Point::new(0.0, 0.0),
        }
    }
}

/// Software renderer that executes display lists to a pixel buffer.
pub struct Renderer {
    pixmap: Pixmap,
    /// Page units → pixels.
    transform: Transform,
    scale: f32,
    origin: Point,
    font: Option<Font>,
}

impl Renderer {
    /// Create a renderer for `frame` at `scale` pixels per page unit.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSize`] if the pixel size is empty or
    /// too large to allocate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(frame: PageFrame, scale: f32) -> Result<Self, RenderError> {
        let width = (frame.width * scale).ceil();
        let height = (frame.height * scale).ceil();
        let invalid = || RenderError::InvalidSize {
            width: frame.width,
            height: frame.height,
            scale,
        };
        if !(width.is_finite() && height.is_finite() && width >= 1.0 && height >= 1.0 && scale > 0.0) {
            return Err(invalid());
        }
        let mut pixmap = Pixmap::new(width as u32, height as u32).ok_or_else(invalid)?;
        pixmap.fill(Color::WHITE);

        Ok(Self {
            pixmap,
            transform: Transform::from_row(scale, 0.0, 0.0, scale, frame.origin.x * scale, frame.origin.y * scale),
            scale,
            origin: frame.origin,
            font: None,
        })
    }

    /// Use `font` for text commands. Without a font, text is skipped.
    #[must_use]
    pub fn with_font(mut self, font: Option<Font>) -> Self {
        self.font = font;
        self
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The rendered pixels.
    #[must_use]
    pub const fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Reset to a blank white page.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::WHITE);
    }

    /// Execute a display list, drawing all commands in order (back to front).
    pub fn render(&mut self, display_list: &DisplayList) {
        for command in display_list.commands() {
            self.execute_command(command);
        }
    }

    fn execute_command(&mut self, command: &DisplayCommand) {
        match command {
            DisplayCommand::DrawLine { from, to, pen } => self.draw_line(*from, *to, pen),
            DisplayCommand::FillPath { path, color } => self.fill_path(path, *color),
            DisplayCommand::DrawText {
                rect,
                text,
                font_size,
                color,
            } => self.draw_text(rect.center(), text, *font_size, *color),
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, pen: &Pen) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        let Some(path) = builder.finish() else {
            return;
        };

        let stroke = Stroke {
            width: pen.width,
            dash: pen.dash.and_then(|dash| StrokeDash::new(vec![dash, dash], 0.0)),
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint_for(pen.color), &stroke, self.transform, None);
    }

    fn fill_path(&mut self, path: &copybook_stroke::Path, color: ColorValue) {
        let mut builder = PathBuilder::new();
        for segment in path.segments() {
            match *segment {
                PathSegment::MoveTo(p) => builder.move_to(p.x, p.y),
                PathSegment::LineTo(p) => builder.line_to(p.x, p.y),
                PathSegment::QuadTo { ctrl, end } => builder.quad_to(ctrl.x, ctrl.y, end.x, end.y),
                PathSegment::CubicTo { ctrl1, ctrl2, end } => {
                    builder.cubic_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, end.x, end.y);
                }
                PathSegment::Close => builder.close(),
            }
        }
        // Empty or zero-area outlines have nothing to fill.
        let Some(path) = builder.finish() else {
            return;
        };
        self.pixmap
            .fill_path(&path, &paint_for(color), FillRule::Winding, self.transform, None);
    }

    /// Draw `text` centered on `center` (paint-area units).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn draw_text(&mut self, center: Point, text: &str, font_size: f32, color: ColorValue) {
        let Some(font) = &self.font else {
            let _ = warn_once("renderer", "no font available; guide characters are not drawn");
            return;
        };

        let px = font_size * self.scale;
        let center_x = (center.x + self.origin.x) * self.scale;
        let center_y = (center.y + self.origin.y) * self.scale;

        let glyphs: Vec<char> = text.chars().filter(|ch| !ch.is_control()).collect();
        let advance: f32 = glyphs.iter().map(|&ch| font.metrics(ch, px).advance_width).sum();
        let baseline = match font.horizontal_line_metrics(px) {
            Some(line) => center_y + (line.ascent + line.descent) / 2.0,
            None => center_y + px * 0.35,
        };

        let (width, height) = (self.pixmap.width() as i32, self.pixmap.height() as i32);
        let pixels = self.pixmap.pixels_mut();
        let mut cursor_x = center_x - advance / 2.0;

        for ch in glyphs {
            let (metrics, bitmap) = font.rasterize(ch, px);
            let glyph_x = cursor_x.round() as i32 + metrics.xmin;
            let glyph_y = baseline.round() as i32 - metrics.ymin - metrics.height as i32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    let (x, y) = (glyph_x + gx as i32, glyph_y + gy as i32);
                    if coverage == 0 || x < 0 || y < 0 || x >= width || y >= height {
                        continue;
                    }
                    let index = y as usize * width as usize + x as usize;
                    pixels[index] = blend(pixels[index], color, coverage);
                }
            }
            cursor_x += metrics.advance_width;
        }
    }

    /// Encode the current pixels as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Encode`] if encoding fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap.encode_png().map_err(|err| RenderError::Encode {
            reason: err.to_string(),
        })
    }

    /// Save the current pixels as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the file cannot be written.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let data = self.encode_png()?;
        std::fs::write(path, data).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("scale", &self.scale)
            .field("has_font", &self.font.is_some())
            .finish_non_exhaustive()
    }
}

fn paint_for(color: ColorValue) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Source-over blend of `color` at `coverage` onto a premultiplied pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend(dst: PremultipliedColorU8, color: ColorValue, coverage: u8) -> PremultipliedColorU8 {
    let a = f32::from(coverage) / 255.0 * f32::from(color.a) / 255.0;
    let inv = 1.0 - a;
    let channel = |src: u8, dst: u8| f32::from(src).mul_add(a, f32::from(dst) * inv).round() as u8;

    let alpha = channel(255, dst.alpha());
    PremultipliedColorU8::from_rgba(
        channel(color.r, dst.red()).min(alpha),
        channel(color.g, dst.green()).min(alpha),
        channel(color.b, dst.blue()).min(alpha),
        alpha,
    )
    .unwrap_or(dst)
}
