//! Location marker shape.

use super::{centered_extent, scaled_size};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

fn default_stroke_width() -> f64 {
    Location::DEFAULT_STROKE_WIDTH
}

/// An outlined marker rectangle. The fill color is used as its stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub width: f64,
    pub height: f64,
    pub fill: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl Location {
    pub const DEFAULT_SIZE: f64 = 100.0;
    pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
    pub const DEFAULT_FILL: &'static str = "#0000ff";

    pub fn new(width: f64, height: f64, fill: impl Into<String>) -> Self {
        Self {
            width,
            height,
            fill: fill.into(),
            stroke_width: Self::DEFAULT_STROKE_WIDTH,
        }
    }

    pub fn extent(&self) -> Rect {
        centered_extent(self.width, self.height)
    }

    pub fn bake_scale(&mut self, scale_x: f64, scale_y: f64, min: f64) {
        self.width = scaled_size(self.width, scale_x, min);
        self.height = scaled_size(self.height, scale_y, min);
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE, Self::DEFAULT_FILL)
    }
}
