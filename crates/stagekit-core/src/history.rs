//! Bounded undo/redo history over scene snapshots.

use crate::shapes::Shape;
use std::collections::VecDeque;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Maximum number of undo states to keep.
pub const MAX_HISTORY: usize = 50;

/// Immutable copy of the shape list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub shapes: Vec<Shape>,
}

impl Snapshot {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }
}

/// Undo stack whose top is the current state, plus a redo stack.
///
/// The undo stack always holds at least the initial snapshot.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

impl History {
    /// History seeded with an initial snapshot.
    pub fn new(initial: Snapshot) -> Self {
        Self::with_limit(initial, MAX_HISTORY)
    }

    pub fn with_limit(initial: Snapshot, limit: usize) -> Self {
        let mut undo_stack = VecDeque::with_capacity(limit.max(1));
        undo_stack.push_back(initial);
        Self {
            undo_stack,
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record a new current state, evicting the oldest beyond the limit and
    /// clearing the redo stack.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Step back. Returns the snapshot to restore, or `None` at the initial state.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let current = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        self.undo_stack.back()
    }

    /// Step forward. Returns the snapshot to restore, or `None` if nothing was undone.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(next);
        self.undo_stack.back()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The snapshot at the top of the undo stack.
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.back()
    }

    /// Number of snapshots on the undo stack, the initial one included.
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// Drop all history and start over from `initial`.
    pub fn reset(&mut self, initial: Snapshot) {
        self.undo_stack.clear();
        self.undo_stack.push_back(initial);
        self.redo_stack.clear();
    }
}

/// Cancel-and-reschedule timer for collapsing rapid edits into one push.
///
/// The host drives it with explicit timestamps; nothing runs in the background.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Restart the quiescence window from `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire if the window has elapsed. Returns `true` exactly once per schedule.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Fire immediately if pending.
    pub fn take(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
