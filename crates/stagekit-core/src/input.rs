//! Input events delivered to the interaction controller.

use crate::ops::{AlignEdge, DistributeAxis, FlipAxis, TransformEnd};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button; selects and drags.
    Left,
    /// Secondary button; pans and opens the context menu.
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Shift, Ctrl or Meta toggles membership instead of replacing the selection.
    pub fn is_multi_select(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Wheel {
        position: Point,
        /// Negative values scroll up and zoom in.
        delta_y: f64,
    },
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Escape,
    Control,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Character(char),
}

impl Key {
    /// Parse a DOM-style key name such as `"ArrowLeft"` or `"x"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "Delete" => Key::Delete,
            "Escape" | "Esc" => Key::Escape,
            "Control" => Key::Control,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c.to_ascii_lowercase()),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

/// Key press with the modifiers held at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Ctrl/Cmd + a character.
    pub fn command(c: char) -> Self {
        Self::new(Key::Character(c), Modifiers::CTRL)
    }

    /// Whether this is Ctrl/Cmd + `c` (case-insensitive).
    pub fn is_command_char(&self, c: char) -> bool {
        matches!(self.key, Key::Character(k) if k.eq_ignore_ascii_case(&c)) && self.modifiers.is_command()
    }
}

/// Entries of the context menu and toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextAction {
    Align(AlignEdge),
    Distribute(DistributeAxis),
    Flip(FlipAxis),
    /// Group or ungroup the selection.
    Group,
    Cut,
    Paste,
    Delete,
    ToggleSnap,
    /// Turn the next marquee into a location marker.
    DrawLocation,
    Undo,
    Redo,
}

/// Everything the controller can be asked to handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
    /// A toolbar item (`"Rect"`, `"Shape"` or `"Text"`) dropped at a screen point.
    Drop { position: Point, payload: String },
    Context(ContextAction),
    /// Interactive transform finished for the listed shapes.
    TransformEnd(Vec<TransformEnd>),
}

impl From<PointerEvent> for EditorEvent {
    fn from(event: PointerEvent) -> Self {
        EditorEvent::Pointer(event)
    }
}

impl From<KeyEvent> for EditorEvent {
    fn from(event: KeyEvent) -> Self {
        EditorEvent::Key(event)
    }
}

impl From<ContextAction> for EditorEvent {
    fn from(action: ContextAction) -> Self {
        EditorEvent::Context(action)
    }
}
