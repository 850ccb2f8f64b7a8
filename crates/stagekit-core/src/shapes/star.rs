//! Star shape.

use super::centered_extent;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A star with alternating outer and inner vertices.
///
/// The outer radius is serialized as `radius`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    pub num_points: u32,
    pub inner_radius: f64,
    #[serde(rename = "radius")]
    pub outer_radius: f64,
    pub fill: String,
}

impl Star {
    pub const DEFAULT_POINTS: u32 = 5;
    pub const DEFAULT_INNER_RADIUS: f64 = 20.0;
    pub const DEFAULT_OUTER_RADIUS: f64 = 40.0;
    pub const DEFAULT_FILL: &'static str = "#ffd700";

    pub fn new(num_points: u32, inner_radius: f64, outer_radius: f64, fill: impl Into<String>) -> Self {
        Self {
            num_points,
            inner_radius,
            outer_radius,
            fill: fill.into(),
        }
    }

    pub fn extent(&self) -> Rect {
        centered_extent(self.outer_radius * 2.0, self.outer_radius * 2.0)
    }

    pub fn bake_scale(&mut self, scale_x: f64, scale_y: f64, min: f64) {
        let factor = (scale_x.abs() + scale_y.abs()) / 2.0;
        self.inner_radius = (self.inner_radius * factor).max(min);
        self.outer_radius = (self.outer_radius * factor).max(min);
    }
}

impl Default for Star {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_POINTS,
            Self::DEFAULT_INNER_RADIUS,
            Self::DEFAULT_OUTER_RADIUS,
            Self::DEFAULT_FILL,
        )
    }
}
