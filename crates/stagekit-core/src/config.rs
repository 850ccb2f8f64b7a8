//! Editor configuration.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Clamp ranges applied to numeric property edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyLimits {
    /// Inclusive range for x / y edits.
    pub position: (f64, f64),
    /// Inclusive range for width / height edits.
    pub size: (f64, f64),
    /// Inclusive range for radius / inner radius edits.
    pub radius: (f64, f64),
    /// Inclusive range for star point counts.
    pub num_points: (u32, u32),
}

impl Default for PropertyLimits {
    fn default() -> Self {
        Self {
            position: (50.0, 3950.0),
            size: (5.0, 500.0),
            radius: (5.0, 100.0),
            num_points: (2, 100),
        }
    }
}

/// Tunable constants of the editing engine.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas width in world units.
    pub canvas_width: f64,
    /// Canvas height in world units.
    pub canvas_height: f64,
    /// Grid size used for drag snapping.
    pub grid_size: f64,
    /// Whether drag-end positions snap to the grid.
    pub snap_enabled: bool,
    /// Maximum number of undo snapshots.
    pub history_limit: usize,
    /// Quiescence window for history pushes, in milliseconds.
    pub history_debounce_ms: u64,
    /// Exclusive lower zoom bound.
    pub min_zoom: f64,
    /// Exclusive upper zoom bound.
    pub max_zoom: f64,
    /// Zoom factor per wheel step.
    pub zoom_step: f64,
    /// Arrow-key nudge distance.
    pub nudge_step: f64,
    /// Horizontal offset from the colliding shape after a rejected drag.
    pub collision_offset: f64,
    /// Distance from the canvas edge used when a paste overshoots.
    pub paste_margin: f64,
    /// Minimum width / height / radius / font size after a transform.
    pub min_shape_size: f64,
    /// Whether location markers take part in collision tests.
    pub location_collides: bool,
    /// Property edit clamp ranges.
    pub property_limits: PropertyLimits,
    /// Profile name written to exported documents.
    pub profile_name: String,
    /// Background image source written to the background layer.
    pub background_source: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 5000.0,
            canvas_height: 5000.0,
            grid_size: crate::snap::GRID_SIZE,
            snap_enabled: true,
            history_limit: crate::history::MAX_HISTORY,
            history_debounce_ms: 50,
            min_zoom: crate::camera::MIN_ZOOM,
            max_zoom: crate::camera::MAX_ZOOM,
            zoom_step: crate::camera::ZOOM_STEP,
            nudge_step: 10.0,
            collision_offset: 100.0,
            paste_margin: 50.0,
            min_shape_size: crate::shapes::MIN_SHAPE_SIZE,
            location_collides: false,
            property_limits: PropertyLimits::default(),
            profile_name: "default report template".to_string(),
            background_source: "./background.svg".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Canvas size in world units.
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Debounce window for history pushes.
    pub fn history_debounce(&self) -> Duration {
        Duration::from_millis(self.history_debounce_ms)
    }

    /// Collision policy derived from this configuration.
    pub fn collision_policy(&self) -> crate::collision::CollisionPolicy {
        crate::collision::CollisionPolicy {
            include_location: self.location_collides,
        }
    }
}
