//! Group toggling.

use super::selected;
use crate::shapes::{GroupId, Shape, ShapeId};
use uuid::Uuid;

/// Fresh `group-<uuid>` identifier.
pub fn new_group_id() -> GroupId {
    format!("group-{}", Uuid::new_v4())
}

/// Whether every listed shape carries the same non-null group id.
pub fn all_share_group(shapes: &[Shape], ids: &[ShapeId]) -> bool {
    let mut groups = selected(shapes, ids).map(|s| s.group_id.as_deref());
    match groups.next() {
        Some(Some(first)) => groups.all(|g| g == Some(first)),
        _ => false,
    }
}

/// Ungroup the listed shapes if they already form one group, otherwise put
/// them all into a new group.
pub fn toggle_group(shapes: &[Shape], ids: &[ShapeId]) -> Vec<Shape> {
    let group_id = if all_share_group(shapes, ids) {
        None
    } else {
        Some(new_group_id())
    };
    selected(shapes, ids)
        .map(|shape| {
            let mut shape = shape.clone();
            shape.group_id = group_id.clone();
            shape
        })
        .collect()
}
