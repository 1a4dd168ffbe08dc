//! Display lists - recorded drawing commands.
//!
//! A [`RecordingCanvas`] turns canvas calls into [`DisplayCommand`]s with all
//! geometry already mapped to page space, one [`DisplayList`] per page. The
//! lists can be executed by any renderer or dumped as JSON for inspection.

use copybook_common::{Point, Rect};
use copybook_stroke::{Path, PathSegment};
use serde::{Serialize, Serializer};

use crate::canvas::{Canvas, Pen};
use crate::color::ColorValue;
use crate::transform::Transform;

/// Line segments per curve when a path is drawn under a projective
/// transform.
pub const CURVE_STEPS: usize = 16;

/// A single drawing command, in page space.
///
/// Commands are stored in painting order (back to front).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DisplayCommand {
    /// Draw a straight line.
    DrawLine {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Pen the line is drawn with.
        pen: Pen,
    },
    /// Fill a closed outline.
    FillPath {
        /// The outline, in page space.
        #[serde(serialize_with = "serialize_path")]
        path: Path,
        /// Fill color.
        color: ColorValue,
    },
    /// Draw text centered in a rectangle.
    DrawText {
        /// Rectangle the text is centered in.
        rect: Rect,
        /// The text to draw.
        text: String,
        /// Font size in page units.
        font_size: f32,
        /// Text color.
        color: ColorValue,
    },
}

fn serialize_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(path)
}

/// The commands of one page in painting order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// A recorded multi-page document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Width of the paint area.
    pub width: f32,
    /// Height of the paint area.
    pub height: f32,
    /// Pages in order. Always holds at least the first page.
    pub pages: Vec<DisplayList>,
}

/// A [`Canvas`] that records display lists.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    document: Document,
    transform: Transform,
    saved: Vec<Transform>,
}

impl RecordingCanvas {
    /// Create a canvas with a single empty page of the given paint area.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            document: Document {
                width,
                height,
                pages: vec![DisplayList::new()],
            },
            transform: Transform::IDENTITY,
            saved: Vec::new(),
        }
    }

    /// The pages recorded so far.
    #[must_use]
    pub fn pages(&self) -> &[DisplayList] {
        &self.document.pages
    }

    /// Depth of the save stack; zero when every `save` has been restored.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Finish recording.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    fn current_page(&mut self) -> &mut DisplayList {
        if self.document.pages.is_empty() {
            self.document.pages.push(DisplayList::new());
        }
        let last = self.document.pages.len() - 1;
        &mut self.document.pages[last]
    }
}

impl Canvas for RecordingCanvas {
    fn draw_line(&mut self, from: Point, to: Point, pen: &Pen) {
        let command = DisplayCommand::DrawLine {
            from: self.transform.map_point(from),
            to: self.transform.map_point(to),
            pen: *pen,
        };
        self.current_page().push(command);
    }

    fn fill_path(&mut self, path: &Path, color: ColorValue) {
        let transform = self.transform;
        let path = if transform == Transform::IDENTITY {
            path.clone()
        } else if transform.is_affine() {
            path.map_points(|p| transform.map_point(p))
        } else {
            // Control points do not survive a projective map; map the curve
            // itself.
            path.flatten(CURVE_STEPS).map_points(|p| transform.map_point(p))
        };
        self.current_page().push(DisplayCommand::FillPath { path, color });
    }

    fn draw_text(&mut self, rect: Rect, text: &str, font_size: f32, color: ColorValue) {
        let (rect, font_size) = if self.transform == Transform::IDENTITY {
            (rect, font_size)
        } else {
            // Bounding box of the mapped rectangle; the font follows its
            // vertical scale.
            let mapped = Path::from_segments(
                self.transform
                    .map_quad(&rect.to_quad())
                    .corners
                    .iter()
                    .map(|&p| PathSegment::LineTo(p))
                    .collect(),
            );
            let bounds = mapped.bounds().unwrap_or(rect);
            let scale = if rect.height > 0.0 { bounds.height / rect.height } else { 1.0 };
            (bounds, font_size * scale)
        };
        self.current_page().push(DisplayCommand::DrawText {
            rect,
            text: text.to_string(),
            font_size,
            color,
        });
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn new_page(&mut self) {
        self.document.pages.push(DisplayList::new());
    }
}
