//! Drag, group translation and arrow-key nudging.

use super::selected;
use crate::collision::first_collision;
use crate::config::EditorConfig;
use crate::shapes::{Shape, ShapeId, ShapeKind};
use crate::snap::snap_point;
use kurbo::{Point, Vec2};
use log::debug;

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl NudgeDirection {
    pub fn delta(self, step: f64) -> Vec2 {
        match self {
            NudgeDirection::Left => Vec2::new(-step, 0.0),
            NudgeDirection::Right => Vec2::new(step, 0.0),
            NudgeDirection::Up => Vec2::new(0.0, -step),
            NudgeDirection::Down => Vec2::new(0.0, step),
        }
    }
}

/// Final position of a single dragged shape.
///
/// The target is snapped to the grid when snapping is on. If the shape then
/// overlaps another one it lands beside the collider instead, offset to the
/// left by `collision_offset`.
pub fn drag_end(shape: &Shape, target: Point, shapes: &[Shape], config: &EditorConfig) -> Shape {
    let target = if config.snap_enabled {
        snap_point(target, config.grid_size)
    } else {
        target
    };
    let moved = shape.moved_to(target);
    match first_collision(&moved, shapes, config.collision_policy()) {
        Some(collider) => {
            debug!("Drag of {} collided with {}", shape.id, collider.id);
            shape.moved_to(Point::new(collider.x - config.collision_offset, collider.y))
        }
        None => moved,
    }
}

/// Move every listed shape by the same delta. No collision checks.
pub fn translate(shapes: &[Shape], ids: &[ShapeId], delta: Vec2) -> Vec<Shape> {
    selected(shapes, ids)
        .map(|shape| shape.moved_to(shape.position() + delta))
        .collect()
}

/// Keep a shape inside the canvas by its own margins.
fn clamp_to_canvas(shape: &Shape, position: Point, config: &EditorConfig) -> Point {
    let (half_w, half_h) = match &shape.kind {
        ShapeKind::Rectangle(r) => (r.width / 2.0, r.height / 2.0),
        ShapeKind::Image(i) => (i.width / 2.0, i.height / 2.0),
        ShapeKind::Circle(c) => (c.radius, c.radius),
        ShapeKind::Star(s) => (s.outer_radius, s.outer_radius),
        ShapeKind::Text(_) | ShapeKind::Location(_) => return position,
    };
    // Oversized shapes pin to their lower margin.
    Point::new(
        position.x.min(config.canvas_width - half_w).max(half_w),
        position.y.min(config.canvas_height - half_h).max(half_h),
    )
}

/// Shift every selected shape one step.
///
/// A shape whose moved footprint overlaps a shape outside the selection stays
/// where it is.
pub fn nudge(
    shapes: &[Shape],
    ids: &[ShapeId],
    direction: NudgeDirection,
    config: &EditorConfig,
) -> Vec<Shape> {
    let delta = direction.delta(config.nudge_step);
    let policy = config.collision_policy();
    let others: Vec<&Shape> = shapes.iter().filter(|s| !ids.contains(&s.id)).collect();
    selected(shapes, ids)
        .filter_map(|shape| {
            let target = clamp_to_canvas(shape, shape.position() + delta, config);
            let moved = shape.moved_to(target);
            if first_collision(&moved, others.iter().copied(), policy).is_some() {
                None
            } else {
                Some(moved)
            }
        })
        .collect()
}
