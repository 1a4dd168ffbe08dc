//! Guide-character fonts.
//!
//! Text is only used for the guide characters in text mode, so one face is
//! enough. A configured font file wins; otherwise the first readable entry
//! of [`FONT_SEARCH_PATHS`] is used. CJK faces come first so that Han
//! characters do not fall back to tofu.

use std::path::Path;

use fontdue::{Font, FontSettings};

use crate::RenderError;

/// System font paths searched, in order, when no font is configured.
pub const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    // Linux
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/arphic/ukai.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simsun.ttc",
    "C:\\Windows\\Fonts\\simkai.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Load a font file.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if the file cannot be read and
/// [`RenderError::Font`] if it is not a usable font.
pub fn load_font(path: &Path) -> Result<Font, RenderError> {
    let data = std::fs::read(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Font::from_bytes(data, FontSettings::default()).map_err(|reason| RenderError::Font {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    })
}

/// Load the first usable font from [`FONT_SEARCH_PATHS`].
#[must_use]
pub fn load_system_font() -> Option<Font> {
    FONT_SEARCH_PATHS.iter().find_map(|path| match load_font(Path::new(path)) {
        Ok(font) => {
            log::info!("using font {path}");
            Some(font)
        }
        Err(RenderError::Io { .. }) => None,
        Err(err) => {
            log::debug!("{err}");
            None
        }
    })
}

/// The configured font, or a system font if none is configured.
///
/// # Errors
///
/// Fails only when a configured font cannot be loaded. A missing system
/// font is not an error: text is then skipped at render time.
pub fn resolve_font(configured: Option<&Path>) -> Result<Option<Font>, RenderError> {
    match configured {
        Some(path) => load_font(path).map(Some),
        None => Ok(load_system_font()),
    }
}
