//! Grid snapping for dragged shapes.

use kurbo::Point;

/// Grid size for snapping.
pub const GRID_SIZE: f64 = 10.0;

/// Round a value to the nearest multiple of `grid`.
///
/// A non-positive grid disables snapping.
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return value;
    }
    (value / grid).round() * grid
}

/// Snap both coordinates of a point.
pub fn snap_point(point: Point, grid: f64) -> Point {
    Point::new(snap_to_grid(point.x, grid), snap_to_grid(point.y, grid))
}
