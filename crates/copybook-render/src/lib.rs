//! Rasterization of copybook display lists.
//!
//! This crate provides:
//! - **Software rendering** - [`Renderer`] executes a page's display list
//!   into a tiny-skia pixmap and writes PNG files
//! - **Font lookup** - [`font`] finds a face for guide characters

pub mod font;
pub mod renderer;

use std::io;
use std::path::PathBuf;

pub use font::{load_font, load_system_font, resolve_font};
pub use renderer::{PageFrame, Renderer};

/// Errors raised while rasterizing or writing images.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The requested image has no pixels or is too large.
    #[error("cannot render a {width}×{height} page at scale {scale}")]
    InvalidSize {
        /// Page width in page units.
        width: f32,
        /// Page height in page units.
        height: f32,
        /// Pixels per page unit.
        scale: f32,
    },
    /// A font file is not usable.
    #[error("font '{}': {reason}", .path.display())]
    Font {
        /// Font file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
    /// Image encoding failed.
    #[error("PNG encoding failed: {reason}")]
    Encode {
        /// Encoder message.
        reason: String,
    },
    /// A file could not be read or written.
    #[error("'{}': {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
