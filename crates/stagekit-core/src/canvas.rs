//! Canvas state: scene, selection, clipboard, view and history.

use crate::camera::Camera;
use crate::collision::placement_conflict;
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::history::{Debouncer, History};
use crate::ops::{self, AlignEdge, CutState, DistributeAxis, FlipAxis, NudgeDirection, TransformEnd};
use crate::properties::{self, OriginAxis, PropertyKey, PropertyValue};
use crate::scene::Scene;
use crate::serialization::{CanvasData, parse_shapes};
use crate::shapes::{
    Circle, Image, ImageData, ImageFormat, Location, Rectangle, Shape, ShapeId, ShapeKind, Star, Text,
};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use kurbo::{Point, Rect, Vec2};
use log::{debug, error, info, warn};
use std::collections::HashMap;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Message for the host to show (toast, status bar).
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// The editable canvas.
pub struct Canvas {
    scene: Scene,
    /// View transform.
    pub camera: Camera,
    config: EditorConfig,
    selection: Vec<ShapeId>,
    clipboard: CutState,
    history: History,
    debouncer: Debouncer,
    next_id: u64,
    loading: bool,
    /// Loaded image bytes by source.
    images: HashMap<String, ImageData>,
    background: Option<ImageData>,
    notices: Vec<Notice>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new(config: EditorConfig) -> Self {
        let scene = Scene::new();
        let history = History::with_limit(scene.snapshot(), config.history_limit);
        Self {
            camera: Camera::from_config(&config),
            debouncer: Debouncer::new(config.history_debounce()),
            scene,
            config,
            selection: Vec::new(),
            clipboard: CutState::Idle,
            history,
            next_id: 1,
            loading: false,
            images: HashMap::new(),
            background: None,
            notices: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn shapes(&self) -> &[Shape] {
        self.scene.shapes()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selection(&self) -> &[ShapeId] {
        &self.selection
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|s| s == id)
    }

    pub fn clipboard(&self) -> &CutState {
        &self.clipboard
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn background(&self) -> Option<&ImageData> {
        self.background.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.debouncer.is_pending()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo() && !self.debouncer.is_pending()
    }

    /// Drain queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    // --- history ---

    /// Record that the scene changed; the snapshot is taken once edits settle.
    fn schedule_history(&mut self) {
        self.debouncer.schedule(Instant::now());
    }

    /// Apply updated shape copies and schedule a history push.
    fn commit(&mut self, updated: Vec<Shape>) -> bool {
        if updated.is_empty() {
            return false;
        }
        self.scene.apply(updated);
        self.schedule_history();
        true
    }

    /// Push the pending snapshot if the debounce window has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.debouncer.poll(now) {
            self.history.push(self.scene.snapshot());
            true
        } else {
            false
        }
    }

    /// Push the pending snapshot immediately, if any.
    pub fn flush_history(&mut self) -> bool {
        if self.debouncer.take() {
            self.history.push(self.scene.snapshot());
            true
        } else {
            false
        }
    }

    /// Restore the previous snapshot. Clears the selection.
    pub fn undo(&mut self) -> bool {
        self.flush_history();
        let Some(snapshot) = self.history.undo().cloned() else {
            debug!("Nothing to undo");
            return false;
        };
        self.scene.restore(&snapshot);
        self.after_restore();
        info!("Undo ({} shapes)", self.scene.len());
        true
    }

    /// Re-apply an undone snapshot. Clears the selection.
    pub fn redo(&mut self) -> bool {
        self.flush_history();
        let Some(snapshot) = self.history.redo().cloned() else {
            debug!("Nothing to redo");
            return false;
        };
        self.scene.restore(&snapshot);
        self.after_restore();
        info!("Redo ({} shapes)", self.scene.len());
        true
    }

    fn after_restore(&mut self) {
        self.selection.clear();
        let scene = &self.scene;
        self.clipboard.retain(|id| scene.contains(id));
        self.hydrate_images();
    }

    // --- selection ---

    /// Replace the selection, expanding grouped shapes to their whole group.
    pub fn select(&mut self, ids: &[ShapeId]) {
        self.selection = self.scene.expand_groups(ids);
    }

    /// Replace the selection without group expansion. Unknown ids are dropped.
    pub fn set_selection(&mut self, ids: Vec<ShapeId>) {
        let scene = &self.scene;
        self.selection = ids.into_iter().filter(|id| scene.contains(id)).collect();
    }

    /// Add a shape (and its group) to the selection, or remove it if present.
    pub fn toggle_selected(&mut self, id: &str) {
        let members = self.scene.expand_groups(&[id.to_string()]);
        if self.is_selected(id) {
            self.selection.retain(|s| !members.contains(s));
        } else {
            for member in members {
                if !self.selection.contains(&member) {
                    self.selection.push(member);
                }
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- adding shapes ---

    /// Next unused `<prefix>_<n>` id.
    fn fresh_id(&mut self, prefix: &str) -> ShapeId {
        loop {
            let id = format!("{}_{}", prefix, self.next_id);
            self.next_id += 1;
            if !self.scene.contains(&id) {
                return id;
            }
        }
    }

    /// Place a new shape at a world point unless an existing shape covers it.
    pub fn add_shape(&mut self, prefix: &str, kind: ShapeKind, position: Point) -> EditorResult<ShapeId> {
        if let Some(existing) = placement_conflict(position, self.scene.shapes()) {
            warn!(
                "Rejected placement at ({:.1}, {:.1}) over {}",
                position.x, position.y, existing.id
            );
            self.notify(NoticeLevel::Warning, "Cannot place the shape over an existing one.");
            return Err(EditorError::PlacementConflict {
                x: position.x,
                y: position.y,
            });
        }
        let id = self.fresh_id(prefix);
        let mut shape = Shape::new(id.clone(), position, kind);
        self.hydrate_shape(&mut shape);
        self.scene.insert(shape)?;
        self.schedule_history();
        debug!("Added {id}");
        Ok(id)
    }

    /// Handle a toolbar drop (`"Rect"`, `"Shape"` or `"Text"`) at a world point.
    pub fn drop_payload(&mut self, payload: &str, position: Point) -> EditorResult<ShapeId> {
        let (prefix, kind): (&str, ShapeKind) = match payload {
            "Rect" => ("rectangle", Rectangle::default().into()),
            "Shape" => ("ball", Image::default().into()),
            "Text" => ("text", Text::default().into()),
            other => {
                warn!("Unknown drop payload {other:?}");
                return Err(EditorError::UnknownPayload(other.to_string()));
            }
        };
        self.add_shape(prefix, kind, position)
    }

    pub fn add_circle(&mut self, position: Point) -> EditorResult<ShapeId> {
        self.add_shape("circle", Circle::default().into(), position)
    }

    pub fn add_star(&mut self, position: Point) -> EditorResult<ShapeId> {
        self.add_shape("star", Star::default().into(), position)
    }

    /// Create a location marker covering a world rectangle.
    pub fn add_location(&mut self, area: Rect) -> ShapeId {
        let min = self.config.min_shape_size;
        let area = area.abs();
        let kind = Location::new(area.width().max(min), area.height().max(min), Location::DEFAULT_FILL);
        let id = self.fresh_id("location");
        let shape = Shape::new(id.clone(), area.center(), kind);
        // Fresh ids never collide.
        let _ = self.scene.insert(shape);
        self.schedule_history();
        info!("Added location marker {id}");
        id
    }

    // --- moving ---

    /// Set positions directly, for live drag feedback. No history entry.
    pub fn set_positions(&mut self, positions: &[(ShapeId, Point)]) {
        for (id, position) in positions {
            if let Some(shape) = self.scene.get_mut(id) {
                shape.set_position(*position);
            }
        }
    }

    /// Finish a single-shape drag: snap, resolve collisions, record history.
    pub fn finish_drag(&mut self, id: &str, target: Point) {
        let Some(shape) = self.scene.get(id) else {
            return;
        };
        let landed = ops::drag_end(shape, target, self.scene.shapes(), &self.config);
        self.commit(vec![landed]);
    }

    /// Finish a group drag: positions are kept as they are.
    pub fn finish_group_drag(&mut self) {
        self.schedule_history();
    }

    /// Move shapes by a delta without collision checks.
    pub fn translate(&mut self, ids: &[ShapeId], delta: Vec2) {
        let moved = ops::translate(self.scene.shapes(), ids, delta);
        self.commit(moved);
    }

    /// Arrow-key move of the selection.
    pub fn nudge_selected(&mut self, direction: NudgeDirection) {
        let moved = ops::nudge(self.scene.shapes(), &self.selection, direction, &self.config);
        self.commit(moved);
    }

    // --- transforms and arrangement ---

    pub fn transform_end(&mut self, ends: &[TransformEnd]) {
        let updated = ops::apply_transform_end(self.scene.shapes(), ends, self.config.min_shape_size);
        self.commit(updated);
    }

    pub fn reset_rotation(&mut self) {
        let updated = ops::reset_rotation(self.scene.shapes(), &self.selection);
        self.commit(updated);
    }

    pub fn align_selected(&mut self, edge: AlignEdge) {
        let updated = ops::align(self.scene.shapes(), &self.selection, edge);
        self.commit(updated);
    }

    pub fn distribute_selected(&mut self, axis: DistributeAxis) {
        let updated = ops::distribute(self.scene.shapes(), &self.selection, axis);
        self.commit(updated);
    }

    pub fn flip_selected(&mut self, axis: FlipAxis) {
        let updated = ops::flip(self.scene.shapes(), &self.selection, axis);
        self.commit(updated);
    }

    /// Group or ungroup the selection, then clear it.
    pub fn toggle_group(&mut self) {
        let updated = ops::toggle_group(self.scene.shapes(), &self.selection);
        self.commit(updated);
        self.selection.clear();
    }

    // --- clipboard ---

    pub fn cut(&mut self) {
        self.clipboard = ops::cut(self.scene.shapes(), &self.selection);
        if let CutState::Pending { ids, .. } = &self.clipboard {
            debug!("Cut {} shapes", ids.len());
        }
    }

    /// Move the cut shapes to `target` and leave cut mode.
    pub fn paste(&mut self, target: Point) {
        let moved = ops::paste(self.scene.shapes(), &self.clipboard, target, &self.config);
        self.commit(moved);
        self.clipboard.clear();
    }

    pub fn clear_cut(&mut self) {
        self.clipboard.clear();
    }

    // --- deletion ---

    /// Remove selected shapes, clear the selection and forget them in the clipboard.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let removed = self.scene.remove_ids(&self.selection);
        let selection = std::mem::take(&mut self.selection);
        self.clipboard.retain(|id| !selection.contains(id));
        if removed > 0 {
            self.schedule_history();
        }
        removed
    }

    // --- property panel ---

    pub fn common_property(&self, key: PropertyKey) -> Option<PropertyValue> {
        properties::common_property(ops::selected(self.scene.shapes(), &self.selection), key)
    }

    pub fn set_property(&mut self, key: PropertyKey, value: &PropertyValue) {
        let updated = properties::set_property(
            self.scene.shapes(),
            &self.selection,
            key,
            value,
            &self.config.property_limits,
        );
        self.commit(updated);
    }

    pub fn selection_origin(&self) -> Option<Point> {
        properties::selection_origin(self.scene.shapes(), &self.selection)
    }

    pub fn set_selection_origin(&mut self, axis: OriginAxis, value: f64) {
        let updated = properties::set_selection_origin(
            self.scene.shapes(),
            &self.selection,
            axis,
            value,
            &self.config.property_limits,
        );
        self.commit(updated);
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.config.snap_enabled = !self.config.snap_enabled;
        self.config.snap_enabled
    }

    // --- import / export ---

    /// Replace the scene with shapes parsed from JSON.
    ///
    /// On success selection and cut state are cleared and history restarts
    /// from the imported scene. On failure nothing changes.
    pub fn import_json(&mut self, json: &str) -> EditorResult<usize> {
        let shapes = match parse_shapes(json, &self.config.property_limits) {
            Ok(shapes) => shapes,
            Err(e) => {
                error!("Import failed: {e}");
                self.notify(NoticeLevel::Error, format!("Invalid JSON file: {e}"));
                return Err(e);
            }
        };
        let count = shapes.len();
        self.scene.replace_all(shapes);
        self.selection.clear();
        self.clipboard.clear();
        self.prune_images();
        self.hydrate_images();
        self.debouncer.cancel();
        self.history.reset(self.scene.snapshot());
        info!("Imported {count} shapes");
        Ok(count)
    }

    /// Mark an asynchronous import as started. Input is ignored until it finishes.
    pub fn begin_loading(&mut self) -> EditorResult<()> {
        if self.loading {
            return Err(EditorError::Busy);
        }
        self.loading = true;
        Ok(())
    }

    /// Complete an asynchronous import with the document text or the read error.
    pub fn finish_import(&mut self, document: EditorResult<String>) -> EditorResult<usize> {
        self.loading = false;
        match document {
            Ok(json) => self.import_json(&json),
            Err(e) => {
                error!("Import read failed: {e}");
                self.notify(NoticeLevel::Error, e.to_string());
                Err(e)
            }
        }
    }

    /// Serialize the scene in the export envelope with the given timestamp.
    pub fn export_json_at(&mut self, now: DateTime<Utc>) -> EditorResult<String> {
        self.flush_history();
        let json = CanvasData::new(self.scene.shapes(), &self.config, now).to_json()?;
        info!("Exported {} shapes", self.scene.len());
        Ok(json)
    }

    /// Serialize the scene in the export envelope.
    pub fn export_json(&mut self) -> EditorResult<String> {
        self.export_json_at(Utc::now())
    }

    /// Export to a storage backend under `name`.
    pub async fn export_to<S: Storage + ?Sized>(&mut self, storage: &S, name: &str) -> EditorResult<()> {
        let json = self.export_json()?;
        storage.save(name, json.as_bytes()).await?;
        Ok(())
    }

    /// Import from a storage backend. Input is gated while the read is in flight.
    pub async fn import_from<S: Storage + ?Sized>(&mut self, storage: &S, name: &str) -> EditorResult<usize> {
        self.begin_loading()?;
        let document = match storage.load(name).await {
            Ok(bytes) => String::from_utf8(bytes).map_err(|e| EditorError::Import(e.to_string())),
            Err(e) => Err(e.into()),
        };
        self.finish_import(document)
    }

    // --- image resources ---

    /// Sources of image shapes whose bytes have not been installed.
    pub fn pending_images(&self) -> Vec<String> {
        let mut sources: Vec<String> = Vec::new();
        for shape in self.scene.shapes() {
            if let ShapeKind::Image(image) = &shape.kind {
                if let (Some(source), None) = (image.source(), image.loaded()) {
                    if !sources.iter().any(|s| s == source) {
                        sources.push(source.to_string());
                    }
                }
            }
        }
        sources
    }

    /// Install loaded bytes for every image shape using `source`.
    ///
    /// Unrecognized bytes are logged and leave the slot empty.
    pub fn install_image(&mut self, source: &str, bytes: &[u8]) -> EditorResult<()> {
        let format = ImageFormat::detect(bytes, source).ok_or_else(|| {
            let err = EditorError::ResourceLoad {
                id: source.to_string(),
                reason: "unrecognized image format".to_string(),
            };
            error!("{err}");
            err
        })?;
        self.images.insert(source.to_string(), ImageData::new(format, bytes));
        self.hydrate_images();
        debug!("Installed image {source} ({} bytes)", bytes.len());
        Ok(())
    }

    /// Report that loading an image failed. The slot stays empty.
    pub fn image_failed(&mut self, source: &str, reason: &str) {
        error!("Failed to load image {source}: {reason}");
    }

    /// Install the background image bytes.
    pub fn install_background(&mut self, bytes: &[u8]) -> EditorResult<()> {
        let source = self.config.background_source.clone();
        match ImageFormat::detect(bytes, &source) {
            Some(format) => {
                self.background = Some(ImageData::new(format, bytes));
                Ok(())
            }
            None => {
                let err = EditorError::ResourceLoad {
                    id: source,
                    reason: "unrecognized image format".to_string(),
                };
                error!("Failed to load background image: {err}");
                self.background = None;
                Err(err)
            }
        }
    }

    fn hydrate_shape(&self, shape: &mut Shape) {
        if let ShapeKind::Image(image) = &mut shape.kind {
            if let Some(handle) = image.image.as_mut() {
                if handle.data.is_none() {
                    handle.data = self.images.get(&handle.source).cloned();
                }
            }
        }
    }

    /// Fill image handles from the loaded-bytes cache.
    fn hydrate_images(&mut self) {
        if self.images.is_empty() {
            return;
        }
        let mut shapes = self.scene.shapes().to_vec();
        for shape in &mut shapes {
            self.hydrate_shape(shape);
        }
        self.scene.replace_all(shapes);
    }

    /// Keep cached bytes only for sources the scene still references.
    ///
    /// Only valid right before history is reset, since older snapshots may
    /// reference other sources.
    fn prune_images(&mut self) {
        let scene = &self.scene;
        let before = self.images.len();
        self.images.retain(|source, _| {
            scene.shapes().iter().any(|shape| match &shape.kind {
                ShapeKind::Image(image) => image.source() == Some(source.as_str()),
                _ => false,
            })
        });
        if self.images.len() != before {
            debug!("Dropped {} cached images", before - self.images.len());
        }
    }

    /// Drop everything: scene, selection, clipboard, history and cached images.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.selection.clear();
        self.clipboard.clear();
        self.prune_images();
        self.debouncer.cancel();
        self.history.reset(self.scene.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::time::Duration;

    fn canvas() -> Canvas {
        let _ = env_logger::builder().is_test(true).try_init();
        Canvas::default()
    }

    #[test]
    fn test_drop_defaults_and_ids() {
        let mut canvas = canvas();
        let rect = canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        let ball = canvas.drop_payload("Shape", Point::new(600.0, 300.0)).unwrap();
        let text = canvas.drop_payload("Text", Point::new(900.0, 300.0)).unwrap();
        assert_eq!(rect, "rectangle_1");
        assert_eq!(ball, "ball_2");
        assert_eq!(text, "text_3");

        let shape = canvas.scene().get("ball_2").unwrap();
        let ShapeKind::Image(image) = &shape.kind else {
            panic!("expected image");
        };
        assert_eq!(image.source(), Some("./science.svg"));
        assert!(matches!(
            canvas.drop_payload("Hexagon", Point::new(2000.0, 2000.0)),
            Err(EditorError::UnknownPayload(_))
        ));
    }

    #[test]
    fn test_id_counter_skips_existing() {
        let mut canvas = canvas();
        canvas
            .import_json(r#"{ "shapes": [ { "id": "circle_1", "type": "circle", "x": 100, "y": 100, "radius": 10 } ] }"#)
            .unwrap();
        let id = canvas.add_circle(Point::new(500.0, 500.0)).unwrap();
        assert_eq!(id, "circle_2");
    }

    #[test]
    fn test_drop_rejected_over_shape() {
        let mut canvas = canvas();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        let err = canvas.drop_payload("Text", Point::new(320.0, 320.0)).unwrap_err();
        assert!(matches!(err, EditorError::PlacementConflict { .. }));
        assert_eq!(canvas.shapes().len(), 1);
        let notices = canvas.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert!(canvas.take_notices().is_empty());
    }

    #[test]
    fn test_debounced_history() {
        let mut canvas = canvas();
        let start = Instant::now();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        canvas.select(&["rectangle_1".into()]);
        for _ in 0..5 {
            canvas.nudge_selected(NudgeDirection::Right);
        }
        assert!(!canvas.tick(start));
        assert!(canvas.tick(Instant::now() + Duration::from_millis(60)));
        assert!(!canvas.tick(Instant::now() + Duration::from_millis(120)));

        // One snapshot for the whole burst: undo goes straight back to empty.
        assert!(canvas.undo());
        assert!(canvas.shapes().is_empty());
        assert!(!canvas.undo());
    }

    #[test]
    fn test_undo_redo_clears_selection() {
        let mut canvas = canvas();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        canvas.flush_history();
        canvas.select(&["rectangle_1".into()]);
        canvas.nudge_selected(NudgeDirection::Down);
        canvas.flush_history();

        assert!(canvas.undo());
        assert!(canvas.selection().is_empty());
        assert_eq!(canvas.scene().get("rectangle_1").unwrap().position(), Point::new(300.0, 300.0));
        assert!(canvas.redo());
        assert_eq!(canvas.scene().get("rectangle_1").unwrap().position(), Point::new(300.0, 310.0));
        assert!(!canvas.redo());
    }

    #[test]
    fn test_undo_flushes_pending_edit() {
        let mut canvas = canvas();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        assert!(canvas.can_undo());
        assert!(canvas.undo());
        assert!(canvas.shapes().is_empty());
        assert!(canvas.can_redo());
    }

    #[test]
    fn test_group_selection_expands() {
        let mut canvas = canvas();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        canvas.drop_payload("Rect", Point::new(600.0, 300.0)).unwrap();
        canvas.drop_payload("Rect", Point::new(900.0, 300.0)).unwrap();
        canvas.select(&["rectangle_1".into(), "rectangle_2".into()]);
        canvas.toggle_group();
        assert!(canvas.selection().is_empty());

        canvas.select(&["rectangle_2".into()]);
        assert_eq!(canvas.selection(), ["rectangle_1", "rectangle_2"]);
        canvas.toggle_selected("rectangle_3");
        assert_eq!(canvas.selection().len(), 3);
        canvas.toggle_selected("rectangle_1");
        assert_eq!(canvas.selection(), ["rectangle_3"]);

        canvas.select(&["rectangle_1".into()]);
        canvas.toggle_group();
        assert!(canvas.shapes().iter().all(|s| s.group_id.is_none()));
    }

    #[test]
    fn test_cut_escape_then_paste_is_noop() {
        let mut canvas = canvas();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        canvas.select(&["rectangle_1".into()]);
        canvas.cut();
        assert!(canvas.clipboard().is_pending());
        canvas.clear_cut();
        canvas.paste(Point::new(1000.0, 1000.0));
        assert_eq!(canvas.shapes()[0].position(), Point::new(300.0, 300.0));
    }

    #[test]
    fn test_cut_paste_moves() {
        let mut canvas = canvas();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        canvas.select(&["rectangle_1".into()]);
        canvas.cut();
        canvas.paste(Point::new(1000.0, 800.0));
        assert_eq!(canvas.shapes()[0].position(), Point::new(1000.0, 800.0));
        assert!(!canvas.clipboard().is_pending());
    }

    #[test]
    fn test_delete_prunes_clipboard() {
        let mut canvas = canvas();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        canvas.drop_payload("Rect", Point::new(600.0, 300.0)).unwrap();
        canvas.select(&["rectangle_1".into(), "rectangle_2".into()]);
        canvas.cut();
        canvas.select(&["rectangle_1".into()]);
        assert_eq!(canvas.delete_selected(), 1);
        assert!(canvas.selection().is_empty());
        assert!(!canvas.clipboard().contains("rectangle_1"));
        assert!(canvas.clipboard().contains("rectangle_2"));
    }

    #[test]
    fn test_add_location_clamps_size() {
        let mut canvas = canvas();
        let id = canvas.add_location(Rect::new(200.0, 100.0, 100.0, 102.0));
        let shape = canvas.scene().get(&id).unwrap();
        assert_eq!(shape.position(), Point::new(150.0, 101.0));
        let ShapeKind::Location(location) = &shape.kind else {
            panic!("expected location");
        };
        assert!((location.width - 100.0).abs() < f64::EPSILON);
        assert!((location.height - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_import_resets_state() {
        let mut canvas = canvas();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        canvas.select(&["rectangle_1".into()]);
        canvas.cut();
        let json = canvas.export_json().unwrap();

        canvas.drop_payload("Text", Point::new(900.0, 900.0)).unwrap();
        let count = canvas.import_json(&json).unwrap();
        assert_eq!(count, 1);
        assert!(canvas.selection().is_empty());
        assert!(!canvas.clipboard().is_pending());
        assert!(!canvas.can_undo());
        assert!(!canvas.can_redo());
    }

    #[test]
    fn test_failed_import_keeps_scene() {
        let mut canvas = canvas();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        canvas.begin_loading().unwrap();
        assert!(matches!(canvas.begin_loading(), Err(EditorError::Busy)));
        assert!(canvas.finish_import(Ok("{ broken".to_string())).is_err());
        assert!(!canvas.is_loading());
        assert_eq!(canvas.shapes().len(), 1);
        assert_eq!(canvas.take_notices()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_storage_roundtrip() {
        let storage = MemoryStorage::new();
        let mut source = canvas();
        source.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        source.add_star(Point::new(800.0, 300.0)).unwrap();
        pollster::block_on(source.export_to(&storage, "layout")).unwrap();

        let mut target = canvas();
        let count = pollster::block_on(target.import_from(&storage, "layout")).unwrap();
        assert_eq!(count, 2);
        assert_eq!(target.shapes(), source.shapes());

        let missing = pollster::block_on(target.import_from(&storage, "missing"));
        assert!(matches!(missing, Err(EditorError::Storage(_))));
        assert!(!target.is_loading());
    }

    #[test]
    fn test_install_image_survives_undo() {
        let mut canvas = canvas();
        canvas.drop_payload("Shape", Point::new(300.0, 300.0)).unwrap();
        assert_eq!(canvas.pending_images(), vec!["./science.svg".to_string()]);
        canvas.flush_history();

        canvas.install_image("./science.svg", b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();
        assert!(canvas.pending_images().is_empty());

        canvas.select(&["ball_1".into()]);
        canvas.nudge_selected(NudgeDirection::Left);
        canvas.undo();
        assert!(canvas.pending_images().is_empty());

        let err = canvas.install_image("./photo.bin", b"????").unwrap_err();
        assert!(matches!(err, EditorError::ResourceLoad { .. }));
    }

    #[test]
    fn test_image_cache_follows_scene_on_clear_and_import() {
        let mut canvas = canvas();
        canvas.drop_payload("Shape", Point::new(300.0, 300.0)).unwrap();
        canvas.install_image("./science.svg", b"<svg/>").unwrap();
        canvas.install_image("./unused.svg", b"<svg/>").unwrap();
        assert_eq!(canvas.images.len(), 2);

        let json = canvas.export_json().unwrap();
        canvas.import_json(&json).unwrap();
        assert_eq!(canvas.images.len(), 1);
        assert!(canvas.pending_images().is_empty());

        canvas.clear();
        assert!(canvas.images.is_empty());
    }

    #[test]
    fn test_install_background() {
        let mut canvas = canvas();
        assert!(canvas.install_background(b"\x89PNG\r\n\x1a\n").is_ok());
        assert_eq!(canvas.background().unwrap().format, ImageFormat::Png);
        // Unknown bytes but `.svg` source still resolves by extension.
        assert!(canvas.install_background(b"????").is_ok());
        assert_eq!(canvas.background().unwrap().format, ImageFormat::Svg);
    }

    #[test]
    fn test_toggle_snap() {
        let mut canvas = canvas();
        assert!(!canvas.toggle_snap());
        assert!(canvas.toggle_snap());
    }
}
