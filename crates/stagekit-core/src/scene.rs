//! Ordered shape list with unique ids.

use crate::error::{EditorError, EditorResult};
use crate::history::Snapshot;
use crate::shapes::{GroupId, Shape, ShapeId};
use kurbo::{Point, Rect};

/// The live shape list.
///
/// Insertion order is kept; [`Scene::render_order`] yields grouped shapes
/// before ungrouped ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene, failing on the first repeated id.
    pub fn from_shapes(shapes: Vec<Shape>) -> EditorResult<Self> {
        let mut scene = Self::new();
        for shape in shapes {
            scene.insert(shape)?;
        }
        Ok(scene)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.shapes.iter().any(|s| s.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ShapeId> {
        self.shapes.iter().map(|s| &s.id)
    }

    /// Append a shape. Rejects an id that is already present.
    pub fn insert(&mut self, shape: Shape) -> EditorResult<()> {
        if self.contains(&shape.id) {
            return Err(EditorError::DuplicateId(shape.id));
        }
        self.shapes.push(shape);
        Ok(())
    }

    /// Remove every shape whose id is listed. Returns how many were removed.
    pub fn remove_ids(&mut self, ids: &[ShapeId]) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| !ids.contains(&s.id));
        before - self.shapes.len()
    }

    /// Replace shapes by id with updated copies. Unknown ids are ignored.
    pub fn apply(&mut self, updated: Vec<Shape>) {
        for shape in updated {
            if let Some(slot) = self.get_mut(&shape.id) {
                *slot = shape;
            }
        }
    }

    /// Replace the whole list.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Ids of every shape in `group_id`.
    pub fn group_members(&self, group_id: &str) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|s| s.group_id.as_deref() == Some(group_id))
            .map(|s| s.id.clone())
            .collect()
    }

    /// Distinct group ids in first-appearance order.
    pub fn group_ids(&self) -> Vec<GroupId> {
        let mut groups: Vec<GroupId> = Vec::new();
        for group in self.shapes.iter().filter_map(|s| s.group_id.as_ref()) {
            if !groups.contains(group) {
                groups.push(group.clone());
            }
        }
        groups
    }

    /// Expand ids so that every grouped shape brings its whole group.
    pub fn expand_groups(&self, ids: &[ShapeId]) -> Vec<ShapeId> {
        let mut expanded: Vec<ShapeId> = Vec::new();
        for id in ids {
            let members = match self.get(id).and_then(|s| s.group_id.as_deref()) {
                Some(group) => self.group_members(group),
                None if self.contains(id) => vec![id.clone()],
                None => Vec::new(),
            };
            for member in members {
                if !expanded.contains(&member) {
                    expanded.push(member);
                }
            }
        }
        expanded
    }

    /// Union of the rendered extents of the listed shapes.
    pub fn bounds_of(&self, ids: &[ShapeId]) -> Option<Rect> {
        self.shapes
            .iter()
            .filter(|s| ids.contains(&s.id))
            .map(Shape::bounds)
            .reduce(|a, b| a.union(b))
    }

    /// Union of the rendered extents of a group's members.
    pub fn group_bounds(&self, group_id: &str) -> Option<Rect> {
        self.shapes
            .iter()
            .filter(|s| s.group_id.as_deref() == Some(group_id))
            .map(Shape::bounds)
            .reduce(|a, b| a.union(b))
    }

    /// Topmost shape (last in render order) whose rendered extent contains `point`.
    pub fn topmost_at(&self, point: Point) -> Option<&Shape> {
        self.render_order()
            .into_iter()
            .rev()
            .find(|shape| shape.contains_point(point))
    }

    /// Grouped shapes first, then ungrouped, each in insertion order.
    pub fn render_order(&self) -> Vec<&Shape> {
        let (grouped, ungrouped): (Vec<&Shape>, Vec<&Shape>) =
            self.shapes.iter().partition(|s| s.is_grouped());
        grouped.into_iter().chain(ungrouped).collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.shapes.clone())
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.shapes = snapshot.shapes.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Rectangle};

    fn rect(id: &str, x: f64) -> Shape {
        Shape::new(id, Point::new(x, 100.0), Rectangle::new(20.0, 20.0, "#000"))
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut scene = Scene::new();
        scene.insert(rect("a", 0.0)).unwrap();
        let err = scene.insert(rect("a", 50.0)).unwrap_err();
        assert!(matches!(err, EditorError::DuplicateId(id) if id == "a"));
        assert_eq!(scene.len(), 1);
        assert!(Scene::from_shapes(vec![rect("x", 0.0), rect("x", 1.0)]).is_err());
    }

    #[test]
    fn test_render_order_grouped_first() {
        let scene = Scene::from_shapes(vec![
            rect("a", 0.0),
            rect("b", 50.0).with_group("g"),
            rect("c", 100.0),
            rect("d", 150.0).with_group("g"),
        ])
        .unwrap();
        let order: Vec<&str> = scene.render_order().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_topmost_at() {
        let scene = Scene::from_shapes(vec![
            rect("under", 100.0).with_group("g"),
            Shape::new("over", Point::new(100.0, 100.0), Circle::new(5.0, "#f00")),
        ])
        .unwrap();
        assert_eq!(scene.topmost_at(Point::new(100.0, 100.0)).map(|s| s.id.as_str()), Some("over"));
        assert_eq!(scene.topmost_at(Point::new(108.0, 108.0)).map(|s| s.id.as_str()), Some("under"));
        assert!(scene.topmost_at(Point::new(500.0, 500.0)).is_none());
    }

    #[test]
    fn test_expand_groups() {
        let scene = Scene::from_shapes(vec![
            rect("a", 0.0).with_group("g"),
            rect("b", 50.0),
            rect("c", 100.0).with_group("g"),
        ])
        .unwrap();
        let expanded = scene.expand_groups(&["c".to_string(), "b".to_string(), "missing".to_string()]);
        assert_eq!(expanded, vec!["a", "c", "b"]);
        assert_eq!(scene.group_ids(), vec!["g".to_string()]);
    }

    #[test]
    fn test_group_bounds() {
        let scene = Scene::from_shapes(vec![
            rect("a", 0.0).with_group("g"),
            rect("b", 100.0).with_group("g"),
        ])
        .unwrap();
        let bounds = scene.group_bounds("g").unwrap();
        assert!((bounds.x0 + 10.0).abs() < 1e-9);
        assert!((bounds.x1 - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_and_restore() {
        let mut scene = Scene::from_shapes(vec![rect("a", 0.0), rect("b", 50.0)]).unwrap();
        let snapshot = scene.snapshot();
        assert_eq!(scene.remove_ids(&["a".to_string()]), 1);
        assert!(!scene.contains("a"));
        scene.restore(&snapshot);
        assert!(scene.contains("a"));
    }
}
