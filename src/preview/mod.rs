//! Placeholder preview for quick layout checks in a browser.
//!
//! Parses the preview query string (`width`, `height`, `margin`, `border`,
//! `corner`), clamps the values into their valid ranges and, with the `image`
//! feature, renders the placeholder collage and encodes it as PNG. Serving
//! it over HTTP is left to the caller.
//!
//! # Example
//!
//! ```
//! use collage_layout::preview;
//!
//! let result = preview::parse("?width=10&height=900&corner=9999&t=1712");
//! assert!(result.warnings.is_empty());
//!
//! let p = result.params.clamped();
//! assert_eq!((p.width, p.height), (50, 900));
//! assert_eq!(p.corner, 25); // half of the short side
//! ```

mod parse;
#[cfg(feature = "image")]
mod render;

#[cfg(feature = "image")]
pub use render::{encode_png, render_preview};

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Smallest accepted preview width or height.
pub const MIN_SIDE: i32 = 50;
/// Largest accepted preview width or height.
pub const MAX_SIDE: i32 = 4000;

/// Preview parameters, possibly out of range until [`clamped`](Self::clamped).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreviewParams {
    pub width: i32,
    pub height: i32,
    /// Inset of the rounded rectangle from the image edge.
    pub margin: i32,
    /// Outline width.
    pub border: i32,
    /// Corner radius.
    pub corner: i32,
}

impl Default for PreviewParams {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            margin: 10,
            border: 4,
            corner: 70,
        }
    }
}

impl PreviewParams {
    /// Clamp width and height to `[50, 4000]`, then margin, border and corner
    /// to `[0, min(width, height) / 2]`.
    pub fn clamped(self) -> Self {
        let width = self.width.clamp(MIN_SIDE, MAX_SIDE);
        let height = self.height.clamp(MIN_SIDE, MAX_SIDE);
        let limit = width.min(height) / 2;
        Self {
            width,
            height,
            margin: self.margin.clamp(0, limit),
            border: self.border.clamp(0, limit),
            corner: self.corner.clamp(0, limit),
        }
    }

    /// Caption describing the clamped parameters, for callers that draw text.
    pub fn caption(&self) -> String {
        let p = self.clamped();
        format!(
            "{}×{} px | margin {}px | border {}px",
            p.width, p.height, p.margin, p.border
        )
    }
}

/// Result of parsing a preview query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed parameters. Keys that were missing or invalid keep their defaults.
    pub params: PreviewParams,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (first value wins).
    DuplicateKey { key: String, value: String },
    /// A key is not a preview parameter.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value is not an integer.
    ValueInvalid { key: &'static str, value: String },
}

/// Parse a preview query string (with or without leading `?`).
///
/// Values are not clamped here; call [`PreviewParams::clamped`].
pub fn parse(query: &str) -> ParseResult {
    let (params, warnings) = parse::parse_query(query);
    ParseResult { params, warnings }
}
