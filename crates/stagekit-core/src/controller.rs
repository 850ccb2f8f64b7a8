//! Pointer, keyboard and menu handling on top of [`Canvas`].

use crate::canvas::Canvas;
use crate::collision::rects_intersect;
use crate::input::{ContextAction, EditorEvent, Key, KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::ops::NudgeDirection;
use crate::shapes::ShapeId;
use kurbo::{Point, Rect, Vec2};
use log::debug;

/// Marquee rectangle in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub start: Point,
    pub current: Point,
}

impl SelectionRect {
    /// Normalized rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.current
    }
}

/// Shape being dragged and where it started.
#[derive(Debug, Clone, PartialEq)]
pub struct DragParticipant {
    pub id: ShapeId,
    pub start: Point,
}

/// The active pointer gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Secondary-button pan; `anchor` is the world point under the pointer.
    Panning { anchor: Point },
    MarqueeSelecting(SelectionRect),
    Dragging {
        handle: ShapeId,
        participants: Vec<DragParticipant>,
        /// World point where the drag began.
        origin: Point,
        delta: Vec2,
        moved: bool,
    },
}

/// Turns [`EditorEvent`]s into canvas operations.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    gesture: Gesture,
    /// Next marquee creates a location marker instead of selecting.
    pub draw_location: bool,
    /// World point of the last secondary-button press.
    paste_point: Option<Point>,
    /// Last pointer position in world coordinates.
    pointer: Point,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn paste_point(&self) -> Option<Point> {
        self.paste_point
    }

    /// Marquee preview in stage coordinates.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match &self.gesture {
            Gesture::MarqueeSelecting(rect) => Some(rect.to_rect()),
            _ => None,
        }
    }

    /// Handle one event. Returns `false` when the event was ignored.
    pub fn handle_event(&mut self, canvas: &mut Canvas, event: EditorEvent) -> bool {
        if canvas.is_loading() {
            debug!("Ignoring input while loading");
            return false;
        }
        match event {
            EditorEvent::Pointer(event) => self.handle_pointer(canvas, event),
            EditorEvent::Key(event) => self.handle_key(canvas, event),
            EditorEvent::Drop { position, payload } => {
                let world = canvas.camera.screen_to_world(position);
                // Rejections are logged and surfaced as notices by the canvas.
                let _ = canvas.drop_payload(&payload, world);
                true
            }
            EditorEvent::Context(action) => self.handle_action(canvas, action),
            EditorEvent::TransformEnd(ends) => {
                canvas.transform_end(&ends);
                true
            }
        }
    }

    fn handle_pointer(&mut self, canvas: &mut Canvas, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers: _,
            } => self.pointer_down(canvas, position, button),
            PointerEvent::Move { position } => self.pointer_move(canvas, position),
            PointerEvent::Up {
                position,
                button: _,
                modifiers,
            } => self.pointer_up(canvas, position, modifiers),
            PointerEvent::Wheel { position, delta_y } => {
                let stage = canvas.camera.screen_to_stage(position);
                canvas.camera.zoom_at(stage, delta_y)
            }
        }
    }

    fn pointer_down(&mut self, canvas: &mut Canvas, position: Point, button: MouseButton) -> bool {
        if !canvas.camera.contains_screen(position) {
            canvas.clear_cut();
            return true;
        }
        let stage = canvas.camera.screen_to_stage(position);
        let world = canvas.camera.stage_to_world(stage);
        self.pointer = world;

        match button {
            MouseButton::Right => {
                self.paste_point = Some(world);
                self.gesture = Gesture::Panning {
                    anchor: canvas.camera.begin_pan(stage),
                };
            }
            MouseButton::Left => {
                self.gesture = match canvas.scene().topmost_at(world) {
                    Some(shape) => {
                        let handle = shape.id.clone();
                        let ids = if canvas.is_selected(&handle) {
                            canvas.selection().to_vec()
                        } else {
                            canvas.scene().expand_groups(std::slice::from_ref(&handle))
                        };
                        let participants = ids
                            .into_iter()
                            .filter_map(|id| {
                                let start = canvas.scene().get(&id)?.position();
                                Some(DragParticipant { id, start })
                            })
                            .collect();
                        Gesture::Dragging {
                            handle,
                            participants,
                            origin: world,
                            delta: Vec2::ZERO,
                            moved: false,
                        }
                    }
                    None => Gesture::MarqueeSelecting(SelectionRect {
                        start: stage,
                        current: stage,
                    }),
                };
            }
            MouseButton::Middle => return false,
        }
        true
    }

    fn pointer_move(&mut self, canvas: &mut Canvas, position: Point) -> bool {
        let stage = canvas.camera.screen_to_stage(position);
        let world = canvas.camera.stage_to_world(stage);
        self.pointer = world;

        match &mut self.gesture {
            Gesture::Idle => false,
            Gesture::Panning { anchor } => {
                canvas.camera.pan_to(stage, *anchor);
                true
            }
            Gesture::MarqueeSelecting(rect) => {
                rect.current = stage;
                true
            }
            Gesture::Dragging {
                participants,
                origin,
                delta,
                moved,
                ..
            } => {
                *delta = world - *origin;
                if *delta != Vec2::ZERO {
                    *moved = true;
                }
                let positions: Vec<(ShapeId, Point)> = participants
                    .iter()
                    .map(|p| (p.id.clone(), p.start + *delta))
                    .collect();
                canvas.set_positions(&positions);
                true
            }
        }
    }

    fn pointer_up(&mut self, canvas: &mut Canvas, position: Point, modifiers: Modifiers) -> bool {
        self.pointer = canvas.camera.screen_to_world(position);

        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => false,
            Gesture::Panning { .. } => true,
            Gesture::MarqueeSelecting(rect) => {
                self.finish_marquee(canvas, rect);
                true
            }
            Gesture::Dragging {
                handle,
                participants,
                delta,
                moved,
                ..
            } => {
                if !moved {
                    click_select(canvas, &handle, modifiers);
                    return true;
                }
                let handle_grouped = canvas.scene().get(&handle).is_some_and(|s| s.is_grouped());
                match participants.as_slice() {
                    // A lone ungrouped shape snaps and resolves collisions.
                    [single] if !handle_grouped => canvas.finish_drag(&single.id, single.start + delta),
                    // Several shapes move rigidly by the same delta.
                    _ => canvas.finish_group_drag(),
                }
                true
            }
        }
    }

    fn finish_marquee(&mut self, canvas: &mut Canvas, rect: SelectionRect) {
        let stage_rect = rect.to_rect();
        let world_rect = Rect::from_points(
            canvas.camera.stage_to_world(Point::new(stage_rect.x0, stage_rect.y0)),
            canvas.camera.stage_to_world(Point::new(stage_rect.x1, stage_rect.y1)),
        );

        if self.draw_location {
            self.draw_location = false;
            canvas.add_location(world_rect);
            return;
        }
        if rect.is_empty() {
            canvas.clear_selection();
            return;
        }

        let scene = canvas.scene();
        let mut selected: Vec<ShapeId> = Vec::new();
        for group in scene.group_ids() {
            let hit = scene
                .group_bounds(&group)
                .is_some_and(|bounds| rects_intersect(bounds, world_rect));
            if hit {
                selected.extend(scene.group_members(&group));
            }
        }
        selected.extend(
            scene
                .shapes()
                .iter()
                .filter(|s| !s.is_grouped() && rects_intersect(s.bounds(), world_rect))
                .map(|s| s.id.clone()),
        );
        debug!("Marquee selected {} shapes", selected.len());
        canvas.set_selection(selected);
    }

    /// Abort the active gesture. A drag puts its shapes back where they started.
    pub fn cancel_gesture(&mut self, canvas: &mut Canvas) {
        if let Gesture::Dragging { participants, .. } = std::mem::take(&mut self.gesture) {
            let positions: Vec<(ShapeId, Point)> =
                participants.into_iter().map(|p| (p.id, p.start)).collect();
            canvas.set_positions(&positions);
        }
    }

    fn handle_key(&mut self, canvas: &mut Canvas, event: KeyEvent) -> bool {
        match event.key {
            Key::Delete => {
                canvas.delete_selected();
            }
            Key::Escape => {
                canvas.clear_cut();
                self.draw_location = false;
                self.cancel_gesture(canvas);
            }
            Key::Control => canvas.reset_rotation(),
            Key::ArrowLeft => canvas.nudge_selected(NudgeDirection::Left),
            Key::ArrowRight => canvas.nudge_selected(NudgeDirection::Right),
            Key::ArrowUp => canvas.nudge_selected(NudgeDirection::Up),
            Key::ArrowDown => canvas.nudge_selected(NudgeDirection::Down),
            Key::Character(_) if event.is_command_char('x') => canvas.cut(),
            Key::Character(_) if event.is_command_char('v') => self.paste(canvas),
            Key::Character(_) if event.is_command_char('z') => {
                canvas.undo();
            }
            Key::Character(_) if event.is_command_char('y') => {
                canvas.redo();
            }
            Key::Character(_) => return false,
        }
        true
    }

    fn handle_action(&mut self, canvas: &mut Canvas, action: ContextAction) -> bool {
        match action {
            ContextAction::Align(edge) => canvas.align_selected(edge),
            ContextAction::Distribute(axis) => canvas.distribute_selected(axis),
            ContextAction::Flip(axis) => canvas.flip_selected(axis),
            ContextAction::Group => canvas.toggle_group(),
            ContextAction::Cut => canvas.cut(),
            ContextAction::Paste => self.paste(canvas),
            ContextAction::Delete => {
                canvas.delete_selected();
            }
            ContextAction::ToggleSnap => {
                canvas.toggle_snap();
            }
            ContextAction::DrawLocation => self.draw_location = true,
            ContextAction::Undo => {
                canvas.undo();
            }
            ContextAction::Redo => {
                canvas.redo();
            }
        }
        true
    }

    /// Paste at the context-menu point, or at the pointer if there is none.
    fn paste(&self, canvas: &mut Canvas) {
        canvas.paste(self.paste_point.unwrap_or(self.pointer));
    }
}

/// Click without movement: replace, add to or remove from the selection.
fn click_select(canvas: &mut Canvas, id: &str, modifiers: Modifiers) {
    if modifiers.is_multi_select() {
        canvas.toggle_selected(id);
    } else {
        canvas.select(&[id.to_string()]);
    }
}
