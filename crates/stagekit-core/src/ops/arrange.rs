//! Align and distribute by rendered extents.

use super::selected;
use crate::shapes::{Shape, ShapeId};
use kurbo::{Rect, Vec2};
use log::warn;
use serde::{Deserialize, Serialize};

/// Edge to align on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Axis to distribute along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributeAxis {
    Horizontal,
    Vertical,
}

/// Move every listed shape so its chosen edge matches the same edge of the
/// union of their rendered extents.
pub fn align(shapes: &[Shape], ids: &[ShapeId], edge: AlignEdge) -> Vec<Shape> {
    let Some(union) = selected(shapes, ids).map(Shape::bounds).reduce(|a, b| a.union(b)) else {
        return Vec::new();
    };
    selected(shapes, ids)
        .map(|shape| {
            let bounds = shape.bounds();
            let delta = match edge {
                AlignEdge::Left => Vec2::new(union.x0 - bounds.x0, 0.0),
                AlignEdge::Right => Vec2::new(union.x1 - bounds.x1, 0.0),
                AlignEdge::Top => Vec2::new(0.0, union.y0 - bounds.y0),
                AlignEdge::Bottom => Vec2::new(0.0, union.y1 - bounds.y1),
            };
            shape.moved_to(shape.position() + delta)
        })
        .collect()
}

fn leading(rect: &Rect, axis: DistributeAxis) -> f64 {
    match axis {
        DistributeAxis::Horizontal => rect.x0,
        DistributeAxis::Vertical => rect.y0,
    }
}

fn trailing(rect: &Rect, axis: DistributeAxis) -> f64 {
    match axis {
        DistributeAxis::Horizontal => rect.x1,
        DistributeAxis::Vertical => rect.y1,
    }
}

/// Spread the listed shapes so the gaps between their rendered extents are
/// equal, keeping the outermost edges in place.
///
/// Needs at least two shapes; otherwise nothing moves.
pub fn distribute(shapes: &[Shape], ids: &[ShapeId], axis: DistributeAxis) -> Vec<Shape> {
    let mut items: Vec<(&Shape, Rect)> = selected(shapes, ids).map(|s| (s, s.bounds())).collect();
    if items.len() < 2 {
        warn!("Select at least two shapes to distribute");
        return Vec::new();
    }
    items.sort_by(|a, b| leading(&a.1, axis).total_cmp(&leading(&b.1, axis)));

    let start = items
        .iter()
        .map(|(_, r)| leading(r, axis))
        .fold(f64::INFINITY, f64::min);
    let end = items
        .iter()
        .map(|(_, r)| trailing(r, axis))
        .fold(f64::NEG_INFINITY, f64::max);
    let total_size: f64 = items
        .iter()
        .map(|(_, r)| trailing(r, axis) - leading(r, axis))
        .sum();
    let gap = (end - start - total_size) / (items.len() - 1) as f64;

    let mut cursor = start;
    items
        .into_iter()
        .map(|(shape, rect)| {
            let delta = cursor - leading(&rect, axis);
            cursor += trailing(&rect, axis) - leading(&rect, axis) + gap;
            let offset = match axis {
                DistributeAxis::Horizontal => Vec2::new(delta, 0.0),
                DistributeAxis::Vertical => Vec2::new(0.0, delta),
            };
            shape.moved_to(shape.position() + offset)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Rectangle, Text};
    use kurbo::Point;

    /// Rectangle spanning `[x0, x1]` horizontally.
    fn span(id: &str, x0: f64, x1: f64) -> Shape {
        let width = x1 - x0;
        Shape::new(id, Point::new(x0 + width / 2.0, 100.0), Rectangle::new(width, 20.0, "#000"))
    }

    fn ids(names: &[&str]) -> Vec<ShapeId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_align_left() {
        let shapes = vec![span("a", 0.0, 10.0), span("b", 20.0, 40.0), span("c", 50.0, 55.0)];
        let out = align(&shapes, &ids(&["a", "b", "c"]), AlignEdge::Left);
        for shape in &out {
            assert!(shape.bounds().x0.abs() < 1e-9, "{}", shape.id);
        }
    }

    #[test]
    fn test_align_right_mixed_kinds() {
        let shapes = vec![
            span("a", 0.0, 10.0),
            Shape::new("c", Point::new(100.0, 100.0), Circle::new(10.0, "#f00")),
            Shape::new("t", Point::new(0.0, 0.0), Text::new("ab", 10.0)),
        ];
        let out = align(&shapes, &ids(&["a", "c", "t"]), AlignEdge::Right);
        for shape in &out {
            assert!((shape.bounds().x1 - 110.0).abs() < 1e-9, "{}", shape.id);
        }
    }

    #[test]
    fn test_align_bottom_rotated() {
        let shapes = vec![
            span("a", 0.0, 100.0).with_rotation(90.0),
            span("b", 200.0, 220.0),
        ];
        let out = align(&shapes, &ids(&["a", "b"]), AlignEdge::Bottom);
        assert!((out[0].bounds().y1 - out[1].bounds().y1).abs() < 1e-9);
    }

    #[test]
    fn test_distribute_horizontal() {
        let shapes = vec![span("a", 0.0, 100.0), span("c", 200.0, 300.0), span("b", 150.0, 250.0)];
        let out = distribute(&shapes, &ids(&["a", "b", "c"]), DistributeAxis::Horizontal);
        let middle = out.iter().find(|s| s.id == "b").unwrap();
        assert!((middle.x - 150.0).abs() < 1e-9);
        let left = out.iter().find(|s| s.id == "a").unwrap();
        assert!((left.x - 50.0).abs() < 1e-9);
        let right = out.iter().find(|s| s.id == "c").unwrap();
        assert!((right.x - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribute_equal_gaps() {
        let shapes = vec![
            span("a", 0.0, 20.0),
            Shape::new("c", Point::new(30.0, 100.0), Circle::new(10.0, "#f00")),
            span("b", 200.0, 260.0),
        ];
        let mut out = distribute(&shapes, &ids(&["a", "b", "c"]), DistributeAxis::Horizontal);
        out.sort_by(|a, b| a.bounds().x0.total_cmp(&b.bounds().x0));
        let gap1 = out[1].bounds().x0 - out[0].bounds().x1;
        let gap2 = out[2].bounds().x0 - out[1].bounds().x1;
        assert!((gap1 - gap2).abs() < 1e-9);
        assert!((gap1 - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribute_needs_two() {
        let shapes = vec![span("a", 0.0, 10.0)];
        assert!(distribute(&shapes, &ids(&["a"]), DistributeAxis::Vertical).is_empty());
    }
}
