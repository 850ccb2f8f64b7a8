//! Scene mutation operations.
//!
//! Each operation is a pure function from the current shapes and its
//! parameters to the updated copies of the shapes it changed. [`Canvas`]
//! applies the result to the scene and schedules a history push.
//!
//! [`Canvas`]: crate::canvas::Canvas

mod arrange;
mod clipboard;
mod group;
mod movement;
mod transform;

pub use arrange::{AlignEdge, DistributeAxis, align, distribute};
pub use clipboard::{CutState, cut, paste};
pub use group::{all_share_group, new_group_id, toggle_group};
pub use movement::{NudgeDirection, drag_end, nudge, translate};
pub use transform::{FlipAxis, TransformEnd, apply_transform_end, flip, reset_rotation};

use crate::shapes::{Shape, ShapeId};

/// Shapes whose id is listed, in scene order.
pub(crate) fn selected<'a>(shapes: &'a [Shape], ids: &'a [ShapeId]) -> impl Iterator<Item = &'a Shape> {
    shapes.iter().filter(move |s| ids.contains(&s.id))
}
