//! Rectangle shape.

use super::{centered_extent, scaled_size};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A filled rectangle centered on its shape position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
    pub fill: String,
}

impl Rectangle {
    pub const DEFAULT_SIZE: f64 = 100.0;
    pub const DEFAULT_FILL: &'static str = "#0000ff";

    /// Create a new rectangle.
    pub fn new(width: f64, height: f64, fill: impl Into<String>) -> Self {
        Self {
            width,
            height,
            fill: fill.into(),
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

impl Default for Rectangle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE, Self::DEFAULT_FILL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_extent() {
        let rect = Rectangle::new(100.0, 50.0, "#000");
        let extent = rect.extent();
        assert!((extent.x0 + 50.0).abs() < f64::EPSILON);
        assert!((extent.y1 - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bake_scale_clamps() {
        let mut rect = Rectangle::default();
        rect.bake_scale(-2.0, 0.0, 5.0);
        assert!((rect.width - 200.0).abs() < f64::EPSILON);
        assert!((rect.height - 5.0).abs() < f64::EPSILON);
    }
}
