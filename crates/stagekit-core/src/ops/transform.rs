//! Resize/rotate completion, rotation reset and flipping.

use super::selected;
use crate::shapes::{Shape, ShapeId};
use serde::{Deserialize, Serialize};

/// End state of an interactive transform for one shape, as reported by the
/// host's transform handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformEnd {
    pub id: ShapeId,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Bake transient transform scales into the shapes' sizes.
///
/// Position and rotation are taken from the end state. The shape's own
/// `scale_x`/`scale_y` (its flip state) is kept as-is. Sizes never drop
/// below `min_size`.
pub fn apply_transform_end(shapes: &[Shape], ends: &[TransformEnd], min_size: f64) -> Vec<Shape> {
    ends.iter()
        .filter_map(|end| {
            let mut shape = shapes.iter().find(|s| s.id == end.id)?.clone();
            shape.x = end.x;
            shape.y = end.y;
            shape.rotation = end.rotation;
            shape.kind.bake_scale(end.scale_x, end.scale_y, min_size);
            Some(shape)
        })
        .collect()
}

/// Set rotation of the listed shapes back to zero.
pub fn reset_rotation(shapes: &[Shape], ids: &[ShapeId]) -> Vec<Shape> {
    selected(shapes, ids)
        .map(|shape| shape.clone().with_rotation(0.0))
        .collect()
}

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

/// Negate the scale factor of the listed shapes along an axis.
pub fn flip(shapes: &[Shape], ids: &[ShapeId], axis: FlipAxis) -> Vec<Shape> {
    selected(shapes, ids)
        .map(|shape| {
            let mut shape = shape.clone();
            match axis {
                FlipAxis::Horizontal => shape.scale_x = -shape.scale_x,
                FlipAxis::Vertical => shape.scale_y = -shape.scale_y,
            }
            shape
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Image, Location, MIN_SHAPE_SIZE, Rectangle, ShapeKind, Star, Text};
    use kurbo::Point;

    fn end(id: &str, sx: f64, sy: f64) -> TransformEnd {
        TransformEnd {
            id: id.to_string(),
            x: 10.0,
            y: 20.0,
            rotation: 45.0,
            scale_x: sx,
            scale_y: sy,
        }
    }

    fn every_kind() -> Vec<Shape> {
        vec![
            Shape::new("r", Point::ZERO, Rectangle::default()),
            Shape::new("c", Point::ZERO, Circle::default()),
            Shape::new("s", Point::ZERO, Star::default()),
            Shape::new("i", Point::ZERO, Image::default()),
            Shape::new("t", Point::ZERO, Text::default()),
            Shape::new("l", Point::ZERO, Location::new(50.0, 50.0, "#f00")),
        ]
    }

    fn sizes(shape: &Shape) -> Vec<f64> {
        match &shape.kind {
            ShapeKind::Rectangle(r) => vec![r.width, r.height],
            ShapeKind::Circle(c) => vec![c.radius],
            ShapeKind::Star(s) => vec![s.inner_radius, s.outer_radius],
            ShapeKind::Image(i) => vec![i.width, i.height],
            ShapeKind::Text(t) => vec![t.font_size],
            ShapeKind::Location(l) => vec![l.width, l.height],
        }
    }

    #[test]
    fn test_transform_end_sets_pose() {
        let shapes = every_kind();
        let mut flipped = shapes.clone();
        flipped[0].scale_x = -1.0;
        let out = apply_transform_end(&flipped, &[end("r", 2.0, 0.5)], MIN_SHAPE_SIZE);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position(), Point::new(10.0, 20.0));
        assert!((out[0].rotation - 45.0).abs() < f64::EPSILON);
        assert!((out[0].scale_x + 1.0).abs() < f64::EPSILON);
        assert_eq!(sizes(&out[0]), vec![200.0, 50.0]);
    }

    #[test]
    fn test_transform_never_below_minimum() {
        let shapes = every_kind();
        for (sx, sy) in [(0.0, 0.0), (-0.001, 0.001), (1e-9, -1e-9), (-3.0, 0.0)] {
            let ends: Vec<TransformEnd> = shapes.iter().map(|s| end(&s.id, sx, sy)).collect();
            for shape in apply_transform_end(&shapes, &ends, MIN_SHAPE_SIZE) {
                for size in sizes(&shape) {
                    assert!(size >= MIN_SHAPE_SIZE, "{} got {size} for ({sx}, {sy})", shape.id);
                }
            }
        }
    }

    #[test]
    fn test_unknown_id_ignored() {
        let out = apply_transform_end(&every_kind(), &[end("nope", 1.0, 1.0)], MIN_SHAPE_SIZE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_reset_rotation_and_flip() {
        let shapes = vec![Shape::new("r", Point::ZERO, Rectangle::default()).with_rotation(30.0)];
        let ids = vec!["r".to_string()];
        assert!((reset_rotation(&shapes, &ids)[0].rotation).abs() < f64::EPSILON);

        let flipped = flip(&shapes, &ids, FlipAxis::Horizontal);
        assert!((flipped[0].scale_x + 1.0).abs() < f64::EPSILON);
        let back = flip(&flipped, &ids, FlipAxis::Horizontal);
        assert!((back[0].scale_x - 1.0).abs() < f64::EPSILON);
        let vertical = flip(&shapes, &ids, FlipAxis::Vertical);
        assert!((vertical[0].scale_y + 1.0).abs() < f64::EPSILON);
    }
}
