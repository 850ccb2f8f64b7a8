//! Circle shape.

use super::centered_extent;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A filled circle centered on its shape position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
    pub fill: String,
}

impl Circle {
    pub const DEFAULT_RADIUS: f64 = 50.0;
    pub const DEFAULT_FILL: &'static str = "#ff0000";

    pub fn new(radius: f64, fill: impl Into<String>) -> Self {
        Self {
            radius,
            fill: fill.into(),
        }
    }

    pub fn extent(&self) -> Rect {
        centered_extent(self.radius * 2.0, self.radius * 2.0)
    }

    /// Radius scales by the mean of the absolute scale factors.
    pub fn bake_scale(&mut self, scale_x: f64, scale_y: f64, min: f64) {
        let factor = (scale_x.abs() + scale_y.abs()) / 2.0;
        self.radius = (self.radius * factor).max(min);
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RADIUS, Self::DEFAULT_FILL)
    }
}
