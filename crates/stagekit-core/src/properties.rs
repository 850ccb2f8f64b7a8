//! Property panel reads and edits over the selection.

use crate::config::PropertyLimits;
use crate::ops::selected;
use crate::shapes::{Shape, ShapeId, ShapeKind};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Editable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKey {
    X,
    Y,
    Width,
    Height,
    Radius,
    InnerRadius,
    NumPoints,
    Rotation,
    FontSize,
    FontFamily,
    StrokeWidth,
    Fill,
    Text,
}

impl PropertyKey {
    fn is_textual(self) -> bool {
        matches!(self, PropertyKey::Fill | PropertyKey::Text | PropertyKey::FontFamily)
    }
}

/// Value shown in or entered into the property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl PropertyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            PropertyValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            PropertyValue::Number(n) => n.to_string(),
            PropertyValue::Text(s) => s.clone(),
        }
    }
}

/// Axis of the selection origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OriginAxis {
    X,
    Y,
}

/// Current value of a property, or `None` if the shape's kind lacks it.
pub fn get_property(shape: &Shape, key: PropertyKey) -> Option<PropertyValue> {
    use PropertyValue::{Number, Text};
    let value = match (key, &shape.kind) {
        (PropertyKey::X, _) => Number(shape.x),
        (PropertyKey::Y, _) => Number(shape.y),
        (PropertyKey::Rotation, _) => Number(shape.rotation),
        (PropertyKey::Width, ShapeKind::Rectangle(r)) => Number(r.width),
        (PropertyKey::Width, ShapeKind::Image(i)) => Number(i.width),
        (PropertyKey::Width, ShapeKind::Location(l)) => Number(l.width),
        (PropertyKey::Height, ShapeKind::Rectangle(r)) => Number(r.height),
        (PropertyKey::Height, ShapeKind::Image(i)) => Number(i.height),
        (PropertyKey::Height, ShapeKind::Location(l)) => Number(l.height),
        (PropertyKey::Radius, ShapeKind::Circle(c)) => Number(c.radius),
        (PropertyKey::Radius, ShapeKind::Star(s)) => Number(s.outer_radius),
        (PropertyKey::InnerRadius, ShapeKind::Star(s)) => Number(s.inner_radius),
        (PropertyKey::NumPoints, ShapeKind::Star(s)) => Number(f64::from(s.num_points)),
        (PropertyKey::FontSize, ShapeKind::Text(t)) => Number(t.font_size),
        (PropertyKey::FontFamily, ShapeKind::Text(t)) => Text(t.font_family.clone()),
        (PropertyKey::StrokeWidth, ShapeKind::Location(l)) => Number(l.stroke_width),
        (PropertyKey::Text, ShapeKind::Text(t)) => Text(t.text.clone()),
        (PropertyKey::Fill, kind) => Text(kind.fill()?.to_string()),
        _ => return None,
    };
    Some(value)
}

/// The value shared by every listed shape that has the property.
///
/// Numbers are rounded before comparing and are returned rounded; text is
/// compared verbatim. `None` when no shape has the property or values differ.
pub fn common_property<'a>(
    shapes: impl IntoIterator<Item = &'a Shape>,
    key: PropertyKey,
) -> Option<PropertyValue> {
    let mut values = shapes.into_iter().filter_map(|shape| {
        get_property(shape, key).map(|value| match value {
            PropertyValue::Number(n) => PropertyValue::Number(n.round()),
            text => text,
        })
    });
    let first = values.next()?;
    values.all(|v| v == first).then_some(first)
}

fn clamp_range(value: f64, (min, max): (f64, f64)) -> f64 {
    value.max(min).min(max)
}

/// Set one property on a copy of the shape, clamping numeric input.
///
/// Returns `None` when the kind lacks the property or the value does not parse.
pub fn apply_property(
    shape: &Shape,
    key: PropertyKey,
    value: &PropertyValue,
    limits: &PropertyLimits,
) -> Option<Shape> {
    get_property(shape, key)?;
    let mut shape = shape.clone();

    if key.is_textual() {
        let text = value.as_text();
        match (key, &mut shape.kind) {
            (PropertyKey::Text, ShapeKind::Text(t)) => t.text = text,
            (PropertyKey::FontFamily, ShapeKind::Text(t)) => t.font_family = text,
            (PropertyKey::Fill, kind) => *kind.fill_mut()? = text,
            _ => return None,
        }
        return Some(shape);
    }

    let n = value.as_number().filter(|n| n.is_finite())?;
    match (key, &mut shape.kind) {
        (PropertyKey::X, _) => shape.x = clamp_range(n, limits.position),
        (PropertyKey::Y, _) => shape.y = clamp_range(n, limits.position),
        (PropertyKey::Rotation, _) => shape.rotation = n,
        (PropertyKey::Width, ShapeKind::Rectangle(r)) => r.width = clamp_range(n, limits.size),
        (PropertyKey::Width, ShapeKind::Image(i)) => i.width = clamp_range(n, limits.size),
        (PropertyKey::Width, ShapeKind::Location(l)) => l.width = clamp_range(n, limits.size),
        (PropertyKey::Height, ShapeKind::Rectangle(r)) => r.height = clamp_range(n, limits.size),
        (PropertyKey::Height, ShapeKind::Image(i)) => i.height = clamp_range(n, limits.size),
        (PropertyKey::Height, ShapeKind::Location(l)) => l.height = clamp_range(n, limits.size),
        (PropertyKey::Radius, ShapeKind::Circle(c)) => c.radius = clamp_range(n, limits.radius),
        (PropertyKey::Radius, ShapeKind::Star(s)) => s.outer_radius = clamp_range(n, limits.radius),
        (PropertyKey::InnerRadius, ShapeKind::Star(s)) => {
            s.inner_radius = clamp_range(n, limits.radius)
        }
        (PropertyKey::NumPoints, ShapeKind::Star(s)) => {
            let (min, max) = limits.num_points;
            s.num_points = clamp_range(n.round(), (f64::from(min), f64::from(max))) as u32;
        }
        (PropertyKey::FontSize, ShapeKind::Text(t)) => t.font_size = n.max(limits.size.0),
        (PropertyKey::StrokeWidth, ShapeKind::Location(l)) => l.stroke_width = n.max(0.0),
        _ => return None,
    }
    Some(shape)
}

/// Set a property on every listed shape that has it.
pub fn set_property(
    shapes: &[Shape],
    ids: &[ShapeId],
    key: PropertyKey,
    value: &PropertyValue,
    limits: &PropertyLimits,
) -> Vec<Shape> {
    selected(shapes, ids)
        .filter_map(|shape| apply_property(shape, key, value, limits))
        .collect()
}

/// Minimum x and minimum y over the listed shapes.
pub fn selection_origin(shapes: &[Shape], ids: &[ShapeId]) -> Option<Point> {
    selected(shapes, ids)
        .map(Shape::position)
        .reduce(|a, b| Point::new(a.x.min(b.x), a.y.min(b.y)))
}

/// Move the selection so its origin takes `value` on one axis. Each resulting
/// coordinate is clamped to the position limits.
pub fn set_selection_origin(
    shapes: &[Shape],
    ids: &[ShapeId],
    axis: OriginAxis,
    value: f64,
    limits: &PropertyLimits,
) -> Vec<Shape> {
    let Some(origin) = selection_origin(shapes, ids) else {
        return Vec::new();
    };
    let delta = match axis {
        OriginAxis::X => Vec2::new(value - origin.x, 0.0),
        OriginAxis::Y => Vec2::new(0.0, value - origin.y),
    };
    selected(shapes, ids)
        .map(|shape| {
            let target = shape.position() + delta;
            shape.moved_to(Point::new(
                clamp_range(target.x, limits.position),
                clamp_range(target.y, limits.position),
            ))
        })
        .collect()
}
