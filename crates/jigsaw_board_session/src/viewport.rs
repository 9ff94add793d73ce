// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pan/zoom extraction from the canvas's CSS-style transform string.

use jigsaw_board_graph::Point;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TRANSLATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"translate\(\s*([^\s,]+)px\s*,\s*([^\s,]+)px\s*\)").unwrap());
static SCALE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"scale\(\s*([^\s,()]+)\s*(?:,\s*[^\s,()]+)?\s*\)").unwrap());

/// The canvas viewport's pan offset and zoom factor.
///
/// The canvas reports its state as a CSS-style string of the form
/// `translate(Xpx, Ypx) scale(S)`; parsing never fails, malformed components
/// fall back to the identity transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    /// Horizontal pan in screen pixels
    pub x: f32,
    /// Vertical pan in screen pixels
    pub y: f32,
    /// Zoom factor
    pub scale: f32,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl ViewportTransform {
    /// Parse a `translate(Xpx, Ypx) scale(S)` transform string
    pub fn parse(transform: &str) -> Self {
        let mut parsed = Self::default();

        if let Some(captures) = TRANSLATE_RE.captures(transform) {
            if let (Ok(x), Ok(y)) = (captures[1].parse(), captures[2].parse()) {
                parsed.x = x;
                parsed.y = y;
            }
        }

        if let Some(captures) = SCALE_RE.captures(transform) {
            if let Ok(scale) = captures[1].parse::<f32>() {
                if scale.is_finite() && scale > 0.0 {
                    parsed.scale = scale;
                }
            }
        }

        parsed
    }

    /// Map a raw pointer position into canvas-local space.
    ///
    /// `grab_offset` is where inside the dragged piece the pointer grabbed
    /// it, so the placed node's top-left corner lands under the piece rather
    /// than under the cursor.
    pub fn to_canvas(&self, pointer: Point, grab_offset: Point) -> Point {
        Point::new(
            (pointer.x - grab_offset.x - self.x) / self.scale,
            (pointer.y - grab_offset.y - self.y) / self.scale,
        )
    }
}
