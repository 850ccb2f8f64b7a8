//! StageKit Core Library
//!
//! Platform-agnostic scene model, collision, camera, history and interaction
//! logic for the StageKit layout editor.

pub mod camera;
pub mod canvas;
pub mod collision;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod input;
pub mod ops;
pub mod properties;
pub mod scene;
pub mod serialization;
pub mod shapes;
pub mod snap;
pub mod storage;

pub use camera::Camera;
pub use canvas::{Canvas, Notice, NoticeLevel};
pub use collision::{CollisionPolicy, overlaps, overlaps_with, point_in_shape};
pub use config::EditorConfig;
pub use controller::{Gesture, InteractionController};
pub use error::{EditorError, EditorResult};
pub use history::{Debouncer, History, MAX_HISTORY, Snapshot};
pub use input::{ContextAction, EditorEvent, Key, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use ops::{AlignEdge, CutState, DistributeAxis, FlipAxis, NudgeDirection, TransformEnd};
pub use scene::Scene;
pub use shapes::{GroupId, Shape, ShapeId, ShapeKind};
pub use snap::{GRID_SIZE, snap_to_grid};
