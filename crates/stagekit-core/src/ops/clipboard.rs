//! Cut and paste.
//!
//! Cutting does not remove anything: it marks shapes as pending and records
//! an anchor. Pasting moves the pending shapes so the anchor lands on the
//! paste point.

use super::selected;
use crate::collision::first_collision;
use crate::config::EditorConfig;
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Vec2};

/// Cut buffer state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CutState {
    #[default]
    Idle,
    Pending {
        /// Minimum x and minimum y over the cut shapes at cut time.
        anchor: Point,
        ids: Vec<ShapeId>,
    },
}

impl CutState {
    pub fn is_pending(&self) -> bool {
        matches!(self, CutState::Pending { .. })
    }

    pub fn contains(&self, id: &str) -> bool {
        match self {
            CutState::Pending { ids, .. } => ids.iter().any(|i| i == id),
            CutState::Idle => false,
        }
    }

    pub fn clear(&mut self) {
        *self = CutState::Idle;
    }

    /// Forget ids that are no longer in the scene. Becomes idle when none remain.
    pub fn retain(&mut self, mut keep: impl FnMut(&ShapeId) -> bool) {
        if let CutState::Pending { ids, .. } = self {
            ids.retain(|id| keep(id));
            if ids.is_empty() {
                *self = CutState::Idle;
            }
        }
    }
}

/// Mark the listed shapes as cut. An empty selection leaves nothing pending.
pub fn cut(shapes: &[Shape], ids: &[ShapeId]) -> CutState {
    let picked: Vec<&Shape> = selected(shapes, ids).collect();
    if picked.is_empty() {
        return CutState::Idle;
    }
    let anchor = Point::new(
        picked.iter().map(|s| s.x).fold(f64::INFINITY, f64::min),
        picked.iter().map(|s| s.y).fold(f64::INFINITY, f64::min),
    );
    CutState::Pending {
        anchor,
        ids: picked.iter().map(|s| s.id.clone()).collect(),
    }
}

/// Move pending shapes by `target - anchor`.
///
/// A coordinate that would pass the canvas edge is pulled back to
/// `canvas - paste_margin`. A shape that would overlap a shape outside the cut
/// set stays put. Returns nothing when no cut is pending.
pub fn paste(shapes: &[Shape], state: &CutState, target: Point, config: &EditorConfig) -> Vec<Shape> {
    let CutState::Pending { anchor, ids } = state else {
        return Vec::new();
    };
    let delta: Vec2 = target - *anchor;
    let policy = config.collision_policy();
    let others: Vec<&Shape> = shapes.iter().filter(|s| !ids.contains(&s.id)).collect();

    selected(shapes, ids)
        .filter_map(|shape| {
            let mut x = shape.x + delta.x;
            let mut y = shape.y + delta.y;
            if x > config.canvas_width {
                x = config.canvas_width - config.paste_margin;
            }
            if y > config.canvas_height {
                y = config.canvas_height - config.paste_margin;
            }
            let moved = shape.moved_to(Point::new(x, y));
            if first_collision(&moved, others.iter().copied(), policy).is_some() {
                None
            } else {
                Some(moved)
            }
        })
        .collect()
}
