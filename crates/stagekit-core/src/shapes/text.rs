//! Text shape.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Approximate glyph advance as a fraction of the font size.
const GLYPH_WIDTH_FACTOR: f64 = 0.6;

/// A single-style text label. Its shape position is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub fill: String,
}

impl Text {
    pub const DEFAULT_CONTENT: &'static str = "Hello";
    pub const DEFAULT_FONT_SIZE: f64 = 30.0;
    pub const DEFAULT_FONT_FAMILY: &'static str = "Calibri";
    pub const DEFAULT_FILL: &'static str = "#ffff00";

    pub fn new(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_family: Self::DEFAULT_FONT_FAMILY.to_string(),
            fill: Self::DEFAULT_FILL.to_string(),
        }
    }

    /// Estimated text box, anchored at the local origin.
    ///
    /// Without a font engine the width is estimated from the longest line.
    pub fn extent(&self) -> Rect {
        let lines: Vec<&str> = self.text.lines().collect();
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let line_count = lines.len().max(1);
        let width = longest as f64 * self.font_size * GLYPH_WIDTH_FACTOR;
        let height = line_count as f64 * self.font_size;
        Rect::new(0.0, 0.0, width, height)
    }

    pub fn bake_scale(&mut self, scale_x: f64, scale_y: f64, min: f64) {
        self.font_size = (self.font_size * ((scale_x + scale_y) / 2.0).abs()).max(min);
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CONTENT, Self::DEFAULT_FONT_SIZE)
    }
}
