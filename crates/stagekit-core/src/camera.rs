//! Camera module for pan/zoom transforms.
//!
//! Three frames are involved: *screen* (host window pixels), *stage*
//! (relative to the canvas container's top-left corner) and *world* (shape
//! coordinates). The camera stores the pan offset in stage pixels and the
//! zoom factor.

use kurbo::{Affine, Point, Size, Vec2};
use log::debug;
use serde::{Deserialize, Serialize};

/// Exclusive lower zoom bound.
pub const MIN_ZOOM: f64 = 0.18;
/// Exclusive upper zoom bound.
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom factor applied per wheel step.
pub const ZOOM_STEP: f64 = 1.5;

/// Camera manages the view transform for the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current pan offset in stage pixels.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    /// Screen position of the container's top-left corner.
    pub origin: Point,
    /// Size of the visible container.
    pub container: Size,
    /// Size of the world canvas.
    pub canvas: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            origin: Point::ZERO,
            container: Size::new(1280.0, 800.0),
            canvas: Size::new(5000.0, 5000.0),
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera using the zoom bounds and canvas size of a configuration.
    pub fn from_config(config: &crate::EditorConfig) -> Self {
        Self {
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
            canvas: config.canvas_size(),
            ..Self::default()
        }
    }

    /// Place the container on screen.
    pub fn set_viewport(&mut self, origin: Point, container: Size) {
        self.origin = origin;
        self.container = container;
    }

    /// Offset used for coordinate conversion.
    ///
    /// A positive component is treated as zero. The pan clamp keeps offsets
    /// non-positive, so this only matters for offsets set directly.
    pub fn effective_offset(&self) -> Vec2 {
        Vec2::new(self.offset.x.min(0.0), self.offset.y.min(0.0))
    }

    /// World-to-stage transform for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.effective_offset()) * Affine::scale(self.zoom)
    }

    pub fn screen_to_stage(&self, screen_point: Point) -> Point {
        screen_point - self.origin.to_vec2()
    }

    pub fn stage_to_screen(&self, stage_point: Point) -> Point {
        stage_point + self.origin.to_vec2()
    }

    pub fn stage_to_world(&self, stage_point: Point) -> Point {
        let offset = self.effective_offset();
        Point::new(
            (stage_point.x - offset.x) / self.zoom,
            (stage_point.y - offset.y) / self.zoom,
        )
    }

    pub fn world_to_stage(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.stage_to_world(self.screen_to_stage(screen_point))
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.stage_to_screen(self.world_to_stage(world_point))
    }

    /// Whether a screen point lies inside the container.
    pub fn contains_screen(&self, screen_point: Point) -> bool {
        let p = self.screen_to_stage(screen_point);
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.container.width && p.y <= self.container.height
    }

    /// Zoom one step around a stage point, keeping the world point beneath it fixed.
    ///
    /// A negative `delta_y` zooms in. Returns `false` and leaves the camera
    /// untouched when the new zoom would leave the open `(min_zoom, max_zoom)`
    /// interval.
    pub fn zoom_at(&mut self, stage_point: Point, delta_y: f64) -> bool {
        let old_zoom = self.zoom;
        let new_zoom = if delta_y < 0.0 {
            old_zoom * self.zoom_step
        } else {
            old_zoom / self.zoom_step
        };
        if !(new_zoom > self.min_zoom && new_zoom < self.max_zoom) {
            debug!("Zoom {new_zoom:.3} rejected, outside ({}, {})", self.min_zoom, self.max_zoom);
            return false;
        }

        let anchor = Point::new(
            (stage_point.x - self.offset.x) / old_zoom,
            (stage_point.y - self.offset.y) / old_zoom,
        );
        self.zoom = new_zoom;
        self.offset = Vec2::new(
            (stage_point.x - anchor.x * new_zoom).min(0.0),
            (stage_point.y - anchor.y * new_zoom).min(0.0),
        );
        true
    }

    /// World point under the pointer at the start of a pan.
    pub fn begin_pan(&self, stage_point: Point) -> Point {
        self.stage_to_world(stage_point)
    }

    /// Move the camera so `anchor` stays under `stage_point`.
    pub fn pan_to(&mut self, stage_point: Point, anchor: Point) {
        let offset = Vec2::new(
            stage_point.x - anchor.x * self.zoom,
            stage_point.y - anchor.y * self.zoom,
        );
        self.offset = self.clamp_pan(offset);
    }

    /// Keep the canvas covering the container: each component is at most 0
    /// and at least `container - canvas * zoom`.
    pub fn clamp_pan(&self, offset: Vec2) -> Vec2 {
        let min_x = self.container.width - self.canvas.width * self.zoom;
        let min_y = self.container.height - self.canvas.height * self.zoom;
        Vec2::new(offset.x.min(0.0).max(min_x), offset.y.min(0.0).max(min_y))
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}
