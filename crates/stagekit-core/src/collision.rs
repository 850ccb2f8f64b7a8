//! Overlap and point-in-shape tests used for placement and drag rejection.
//!
//! Collision works on stored geometry only: rectangles and images are centered
//! boxes of their width and height, circles and stars are discs (stars use
//! their outer radius). Rotation and scale do not participate.

use crate::shapes::{Shape, ShapeKind};
use kurbo::{Point, Rect};

/// Which kinds take part in collision tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionPolicy {
    /// Treat location markers as rect-like colliders.
    pub include_location: bool,
}

/// Collision footprint of a shape.
enum Footprint {
    Rect(Rect),
    Round { center: Point, radius: f64 },
    None,
}

fn centered(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(x - width / 2.0, y - height / 2.0, x + width / 2.0, y + height / 2.0)
}

fn footprint(shape: &Shape, policy: CollisionPolicy) -> Footprint {
    match &shape.kind {
        ShapeKind::Rectangle(r) => Footprint::Rect(centered(shape.x, shape.y, r.width, r.height)),
        ShapeKind::Image(i) => Footprint::Rect(centered(shape.x, shape.y, i.width, i.height)),
        ShapeKind::Location(l) if policy.include_location => {
            Footprint::Rect(centered(shape.x, shape.y, l.width, l.height))
        }
        ShapeKind::Circle(c) => Footprint::Round {
            center: shape.position(),
            radius: c.radius,
        },
        ShapeKind::Star(s) => Footprint::Round {
            center: shape.position(),
            radius: s.outer_radius,
        },
        ShapeKind::Location(_) | ShapeKind::Text(_) => Footprint::None,
    }
}

/// Boxes overlap unless they are disjoint on an axis. Touching edges are disjoint.
fn rect_rect(a: Rect, b: Rect) -> bool {
    !(a.x1 <= b.x0 || b.x1 <= a.x0 || a.y1 <= b.y0 || b.y1 <= a.y0)
}

fn round_round(c1: Point, r1: f64, c2: Point, r2: f64) -> bool {
    c1.distance(c2) < r1 + r2
}

/// Clamp the disc center into the box and compare squared distances.
fn round_rect(center: Point, radius: f64, rect: Rect) -> bool {
    let nearest = Point::new(center.x.clamp(rect.x0, rect.x1), center.y.clamp(rect.y0, rect.y1));
    let dx = center.x - nearest.x;
    let dy = center.y - nearest.y;
    dx * dx + dy * dy < radius * radius
}

/// Whether two shapes overlap under the default policy.
pub fn overlaps(a: &Shape, b: &Shape) -> bool {
    overlaps_with(a, b, CollisionPolicy::default())
}

/// Whether two shapes overlap. Symmetric in its arguments.
pub fn overlaps_with(a: &Shape, b: &Shape, policy: CollisionPolicy) -> bool {
    match (footprint(a, policy), footprint(b, policy)) {
        (Footprint::Rect(ra), Footprint::Rect(rb)) => rect_rect(ra, rb),
        (Footprint::Round { center: c1, radius: r1 }, Footprint::Round { center: c2, radius: r2 }) => {
            round_round(c1, r1, c2, r2)
        }
        (Footprint::Round { center, radius }, Footprint::Rect(rect)) => round_rect(center, radius, rect),
        (Footprint::Rect(_), Footprint::Round { .. }) => overlaps_with(b, a, policy),
        (Footprint::None, _) | (_, Footprint::None) => false,
    }
}

/// Whether a world point is inside a shape for drop placement purposes.
///
/// Rectangles and images use a half-open box, circles include their rim,
/// stars use an inclusive box of their outer radius. Text and location
/// markers never contain a point.
pub fn point_in_shape(point: Point, shape: &Shape) -> bool {
    let (x, y) = (point.x, point.y);
    match &shape.kind {
        ShapeKind::Rectangle(r) => half_open(centered(shape.x, shape.y, r.width, r.height), x, y),
        ShapeKind::Image(i) => half_open(centered(shape.x, shape.y, i.width, i.height), x, y),
        ShapeKind::Circle(c) => point.distance(shape.position()) <= c.radius,
        ShapeKind::Star(s) => {
            (x - shape.x).abs() <= s.outer_radius && (y - shape.y).abs() <= s.outer_radius
        }
        ShapeKind::Text(_) | ShapeKind::Location(_) => false,
    }
}

fn half_open(rect: Rect, x: f64, y: f64) -> bool {
    x >= rect.x0 && x < rect.x1 && y >= rect.y0 && y < rect.y1
}

/// First shape containing `point`, if any.
pub fn placement_conflict(point: Point, shapes: &[Shape]) -> Option<&Shape> {
    shapes.iter().find(|shape| point_in_shape(point, shape))
}

/// Whether a point is blocked by any shape.
pub fn blocks_placement(point: Point, shapes: &[Shape]) -> bool {
    placement_conflict(point, shapes).is_some()
}

/// First shape in `others` that overlaps `shape`, skipping `shape` itself by id.
pub fn first_collision<'a>(
    shape: &Shape,
    others: impl IntoIterator<Item = &'a Shape>,
    policy: CollisionPolicy,
) -> Option<&'a Shape> {
    others
        .into_iter()
        .find(|other| other.id != shape.id && overlaps_with(shape, other, policy))
}

/// Inclusive box intersection: touching boxes intersect.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}
