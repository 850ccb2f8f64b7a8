//! Shape definitions for the layout canvas.

mod circle;
mod image;
mod location;
mod rectangle;
mod star;
mod text;

pub use circle::Circle;
pub use image::{Image, ImageData, ImageFormat, ImageHandle};
pub use location::Location;
pub use rectangle::Rectangle;
pub use star::Star;
pub use text::Text;

use kurbo::{Affine, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Unique identifier for shapes.
pub type ShapeId = String;

/// Identifier shared by every member of a group.
pub type GroupId = String;

/// Minimum width, height, radius or font size after a transform.
pub const MIN_SHAPE_SIZE: f64 = 5.0;

fn default_scale() -> f64 {
    1.0
}

/// A placeable, editable object on the canvas.
///
/// The attributes every kind shares live here; the kind-specific ones live in
/// [`ShapeKind`]. For rectangles, images and location markers `(x, y)` is the
/// center. For circles and stars it is the center as well, and for text it is
/// the top-left corner of the text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale_x: f64,
    #[serde(default = "default_scale")]
    pub scale_y: f64,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

/// Kind-specific attributes, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeKind {
    #[serde(rename = "rectangle")]
    Rectangle(Rectangle),
    #[serde(rename = "circle")]
    Circle(Circle),
    #[serde(rename = "star")]
    Star(Star),
    #[serde(rename = "SVG")]
    Image(Image),
    #[serde(rename = "text")]
    Text(Text),
    #[serde(rename = "location")]
    Location(Location),
}

impl From<Rectangle> for ShapeKind {
    fn from(value: Rectangle) -> Self {
        ShapeKind::Rectangle(value)
    }
}

impl From<Circle> for ShapeKind {
    fn from(value: Circle) -> Self {
        ShapeKind::Circle(value)
    }
}

impl From<Star> for ShapeKind {
    fn from(value: Star) -> Self {
        ShapeKind::Star(value)
    }
}

impl From<Image> for ShapeKind {
    fn from(value: Image) -> Self {
        ShapeKind::Image(value)
    }
}

impl From<Text> for ShapeKind {
    fn from(value: Text) -> Self {
        ShapeKind::Text(value)
    }
}

impl From<Location> for ShapeKind {
    fn from(value: Location) -> Self {
        ShapeKind::Location(value)
    }
}

impl ShapeKind {
    /// The JSON discriminant for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle(_) => "rectangle",
            ShapeKind::Circle(_) => "circle",
            ShapeKind::Star(_) => "star",
            ShapeKind::Image(_) => "SVG",
            ShapeKind::Text(_) => "text",
            ShapeKind::Location(_) => "location",
        }
    }

    /// Extent in local (unrotated, unscaled) coordinates around the stored position.
    pub fn local_extent(&self) -> Rect {
        match self {
            ShapeKind::Rectangle(r) => r.extent(),
            ShapeKind::Circle(c) => c.extent(),
            ShapeKind::Star(s) => s.extent(),
            ShapeKind::Image(i) => i.extent(),
            ShapeKind::Text(t) => t.extent(),
            ShapeKind::Location(l) => l.extent(),
        }
    }

    /// Fold a transient scale into the kind's size fields, never going below `min`.
    pub fn bake_scale(&mut self, scale_x: f64, scale_y: f64, min: f64) {
        match self {
            ShapeKind::Rectangle(r) => r.bake_scale(scale_x, scale_y, min),
            ShapeKind::Circle(c) => c.bake_scale(scale_x, scale_y, min),
            ShapeKind::Star(s) => s.bake_scale(scale_x, scale_y, min),
            ShapeKind::Image(i) => i.bake_scale(scale_x, scale_y, min),
            ShapeKind::Text(t) => t.bake_scale(scale_x, scale_y, min),
            ShapeKind::Location(l) => l.bake_scale(scale_x, scale_y, min),
        }
    }

    /// Fill color string, if the kind has one.
    pub fn fill(&self) -> Option<&str> {
        match self {
            ShapeKind::Rectangle(r) => Some(&r.fill),
            ShapeKind::Circle(c) => Some(&c.fill),
            ShapeKind::Star(s) => Some(&s.fill),
            ShapeKind::Text(t) => Some(&t.fill),
            ShapeKind::Location(l) => Some(&l.fill),
            ShapeKind::Image(_) => None,
        }
    }

    /// Mutable fill color string, if the kind has one.
    pub fn fill_mut(&mut self) -> Option<&mut String> {
        match self {
            ShapeKind::Rectangle(r) => Some(&mut r.fill),
            ShapeKind::Circle(c) => Some(&mut c.fill),
            ShapeKind::Star(s) => Some(&mut s.fill),
            ShapeKind::Text(t) => Some(&mut t.fill),
            ShapeKind::Location(l) => Some(&mut l.fill),
            ShapeKind::Image(_) => None,
        }
    }
}

impl Shape {
    /// Create a shape at a position with default rotation, scale and no group.
    pub fn new(id: impl Into<ShapeId>, position: Point, kind: impl Into<ShapeKind>) -> Self {
        Self {
            id: id.into(),
            x: position.x,
            y: position.y,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            group_id: None,
            kind: kind.into(),
        }
    }

    /// Builder-style group assignment.
    pub fn with_group(mut self, group_id: impl Into<GroupId>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Builder-style rotation in degrees.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Return a copy moved to `position`.
    pub fn moved_to(&self, position: Point) -> Self {
        let mut shape = self.clone();
        shape.set_position(position);
        shape
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn is_grouped(&self) -> bool {
        self.group_id.is_some()
    }

    /// Local-to-world transform: translate, then rotate, then scale.
    pub fn transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.x, self.y))
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }

    /// Rendered extent in world coordinates (rotation and scale included).
    pub fn bounds(&self) -> Rect {
        self.transform().transform_rect_bbox(self.kind.local_extent())
    }

    /// Whether a world point lies within the rendered extent.
    pub fn contains_point(&self, point: Point) -> bool {
        let bounds = self.bounds();
        point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
    }

    pub fn fill(&self) -> Option<&str> {
        self.kind.fill()
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into a color.
pub fn parse_hex_color(color: &str) -> Option<Color> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1])? * 17;
            let g = channel(&hex[1..2])? * 17;
            let b = channel(&hex[2..3])? * 17;
            Some(Color::from_rgba8(r, g, b, 255))
        }
        6 => Some(Color::from_rgba8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        )),
        8 => Some(Color::from_rgba8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => None,
    }
}

/// Rectangle of the given size centered on the local origin.
pub(crate) fn centered_extent(width: f64, height: f64) -> Rect {
    Rect::new(-width / 2.0, -height / 2.0, width / 2.0, height / 2.0)
}

/// `|value * scale|`, clamped to at least `min`.
pub(crate) fn scaled_size(value: f64, scale: f64, min: f64) -> f64 {
    (value * scale).abs().max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(id: &str, x: f64, y: f64) -> Shape {
        Shape::new(id, Point::new(x, y), Rectangle::new(100.0, 50.0, "#0000ff"))
    }

    #[test]
    fn test_bounds_centered() {
        let shape = rect("r", 200.0, 100.0);
        let bounds = shape.bounds();
        assert!((bounds.x0 - 150.0).abs() < 1e-9);
        assert!((bounds.y0 - 75.0).abs() < 1e-9);
        assert!((bounds.x1 - 250.0).abs() < 1e-9);
        assert!((bounds.y1 - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_rotated() {
        let shape = rect("r", 0.0, 0.0).with_rotation(90.0);
        let bounds = shape.bounds();
        assert!((bounds.width() - 50.0).abs() < 1e-9);
        assert!((bounds.height() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_flipped_keeps_extent() {
        let mut shape = rect("r", 10.0, 10.0);
        shape.scale_x = -1.0;
        let bounds = shape.bounds();
        assert!((bounds.x0 + 40.0).abs() < 1e-9);
        assert!((bounds.x1 - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_contains_point() {
        let shape = Shape::new("c", Point::new(0.0, 0.0), Circle::new(10.0, "#ff0000"));
        assert!(shape.contains_point(Point::new(10.0, 0.0)));
        assert!(!shape.contains_point(Point::new(10.5, 0.0)));
    }

    #[test]
    fn test_parse_hex_color() {
        let c = parse_hex_color("#0000ff").unwrap().to_rgba8();
        assert_eq!((c.r, c.g, c.b, c.a), (0, 0, 255, 255));
        let c = parse_hex_color("#fff").unwrap().to_rgba8();
        assert_eq!((c.r, c.g, c.b), (255, 255, 255));
        let c = parse_hex_color("#11223380").unwrap().to_rgba8();
        assert_eq!(c.a, 0x80);
        assert!(parse_hex_color("blue").is_none());
        assert!(parse_hex_color("#12").is_none());
        assert!(parse_hex_color("#éa").is_none());
        assert!(parse_hex_color("#ffé0").is_none());
        assert!(parse_hex_color("#gggggg").is_none());
    }

    #[test]
    fn test_json_shape_layout() {
        let shape = rect("rectangle_1", 10.0, 20.0).with_group("group-a");
        let value = serde_json::to_value(&shape).unwrap();
        assert_eq!(value["type"], "rectangle");
        assert_eq!(value["scaleX"], 1.0);
        assert_eq!(value["groupId"], "group-a");
        assert_eq!(value["width"], 100.0);

        let back: Shape = serde_json::from_value(value).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn test_json_defaults() {
        let shape: Shape = serde_json::from_str(
            r##"{ "id": "c1", "type": "circle", "x": 5, "y": 6, "radius": 20, "fill": "#f00" }"##,
        )
        .unwrap();
        assert!((shape.scale_x - 1.0).abs() < f64::EPSILON);
        assert!((shape.rotation).abs() < f64::EPSILON);
        assert!(shape.group_id.is_none());
        assert!(matches!(shape.kind, ShapeKind::Circle(_)));
    }
}
