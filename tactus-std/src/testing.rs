//! Testing utilities for Tactus.
//!
//! This module provides utilities to make testing recognizers, policies and
//! orchestration easier.
//!
//! # Features
//!
//! - [`FrameTree`]: An in-memory [`TargetTree`] of stacked rectangles
//! - [`TouchSequence`]: Builds a consistent raw pointer stream
//! - [`ScriptedBehavior`]: A behavior whose transitions come from a closure
//! - [`states_of`]: Extracts one recognizer's state changes from notifications

use std::fmt;
use tactus_core::{
    GestureCore, GestureState, Notification, Peer, Pointer, PointerAction, PointerEvent,
    PointerId, Rect, RecognizerBehavior, RecognizerId, TargetId, TargetTree,
};

// ============================================================================
// Frame Tree
// ============================================================================

/// A flat stack of rectangular targets. Later insertions are on top.
///
/// # Example
///
/// ```rust,ignore
/// let mut tree = FrameTree::new();
/// tree.insert(TargetId(1), Rect::from_origin_size(0.0, 0.0, 300.0, 300.0));
/// tree.insert(TargetId(2), Rect::from_origin_size(50.0, 50.0, 100.0, 100.0));
/// assert_eq!(tree.hit_path(60.0, 60.0), vec![TargetId(2), TargetId(1)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameTree {
    frames: Vec<(TargetId, Rect)>,
}

impl FrameTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `target` on top of the stack, replacing an earlier frame.
    pub fn insert(&mut self, target: TargetId, frame: Rect) -> &mut Self {
        self.remove(target);
        self.frames.push((target, frame));
        self
    }

    /// Detach `target`.
    pub fn remove(&mut self, target: TargetId) -> &mut Self {
        self.frames.retain(|(id, _)| *id != target);
        self
    }

    /// Move `target` without changing its stacking position.
    pub fn set_frame(&mut self, target: TargetId, frame: Rect) -> &mut Self {
        if let Some(entry) = self.frames.iter_mut().find(|(id, _)| *id == target) {
            entry.1 = frame;
        }
        self
    }
}

impl TargetTree for FrameTree {
    fn hit_path(&self, x: f32, y: f32) -> Vec<TargetId> {
        self.frames
            .iter()
            .rev()
            .filter(|(_, frame)| frame.contains(x, y))
            .map(|(id, _)| *id)
            .collect()
    }

    fn frame(&self, target: TargetId) -> Option<Rect> {
        self.frames
            .iter()
            .find(|(id, _)| *id == target)
            .map(|(_, frame)| *frame)
    }
}

// ============================================================================
// Touch Sequence
// ============================================================================

/// Produces raw events for pointers going down, moving and lifting.
///
/// Time advances by a fixed step after every event.
///
/// # Example
///
/// ```rust,ignore
/// let mut touches = TouchSequence::new();
/// let events = [
///     touches.down(0, 10.0, 10.0),
///     touches.move_to(0, 40.0, 10.0),
///     touches.up(0),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct TouchSequence {
    pointers: Vec<Pointer>,
    now_ms: u64,
    step_ms: u64,
}

impl Default for TouchSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchSequence {
    /// Start at time zero, stepping 16 ms per event.
    pub fn new() -> Self {
        Self {
            pointers: Vec::new(),
            now_ms: 0,
            step_ms: 16,
        }
    }

    /// Change the time step.
    #[must_use]
    pub fn with_step_ms(mut self, step_ms: u64) -> Self {
        self.step_ms = step_ms;
        self
    }

    /// Let `ms` pass without an event.
    pub fn advance(&mut self, ms: u64) -> &mut Self {
        self.now_ms += ms;
        self
    }

    /// Current time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Pointers currently down.
    pub fn pointers(&self) -> &[Pointer] {
        &self.pointers
    }

    fn emit(&mut self, action: PointerAction, action_index: usize) -> PointerEvent {
        let event = PointerEvent::new(action, action_index, self.pointers.clone(), self.now_ms);
        self.now_ms += self.step_ms;
        event
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.pointers.iter().position(|p| p.id == PointerId(id))
    }

    /// Pointer `id` goes down at `(x, y)`.
    pub fn down(&mut self, id: u32, x: f32, y: f32) -> PointerEvent {
        let action = if self.pointers.is_empty() {
            PointerAction::Down
        } else {
            PointerAction::PointerDown
        };
        self.pointers.push(Pointer::new(id, x, y));
        let index = self.pointers.len() - 1;
        self.emit(action, index)
    }

    /// Pointer `id` moves to `(x, y)`.
    pub fn move_to(&mut self, id: u32, x: f32, y: f32) -> PointerEvent {
        let index = self.index_of(id).unwrap_or(0);
        if let Some(pointer) = self.pointers.get_mut(index) {
            pointer.x = x;
            pointer.y = y;
        }
        self.emit(PointerAction::Move, index)
    }

    /// Move every pointer by `(dx, dy)`.
    pub fn move_all_by(&mut self, dx: f32, dy: f32) -> PointerEvent {
        for pointer in &mut self.pointers {
            pointer.x += dx;
            pointer.y += dy;
        }
        self.emit(PointerAction::Move, 0)
    }

    /// Pointer `id` lifts.
    pub fn up(&mut self, id: u32) -> PointerEvent {
        let index = self.index_of(id).unwrap_or(0);
        let action = if self.pointers.len() <= 1 {
            PointerAction::Up
        } else {
            PointerAction::PointerUp
        };
        let event = self.emit(action, index);
        if index < self.pointers.len() {
            self.pointers.remove(index);
        }
        event
    }

    /// The platform aborts the interaction.
    pub fn cancel(&mut self) -> PointerEvent {
        let event = self.emit(PointerAction::Cancel, 0);
        self.pointers.clear();
        event
    }
}

// ============================================================================
// Scripted Behavior
// ============================================================================

type Script = Box<dyn FnMut(&mut GestureCore, &PointerEvent) + Send>;

/// A behavior whose `on_handle` is a closure.
///
/// # Example
///
/// ```rust,ignore
/// // activates as soon as it sees a move
/// let behavior = ScriptedBehavior::new(|core, event| {
///     core.begin();
///     if event.action == PointerAction::Move {
///         core.activate();
///     }
/// });
/// ```
pub struct ScriptedBehavior {
    kind: &'static str,
    script: Script,
    yields_to_others: bool,
    simultaneous: bool,
    resets: usize,
    cancels: usize,
}

impl ScriptedBehavior {
    /// Wrap `script`.
    pub fn new<F>(script: F) -> Self
    where
        F: FnMut(&mut GestureCore, &PointerEvent) + Send + 'static,
    {
        Self {
            kind: "scripted",
            script: Box::new(script),
            yields_to_others: false,
            simultaneous: false,
            resets: 0,
            cancels: 0,
        }
    }

    /// Begins on the first event, activates on move, ends on the last up.
    pub fn drag() -> Self {
        Self::new(|core, event| match event.action {
            PointerAction::Move => core.activate(),
            PointerAction::Up => core.end(),
            _ => core.begin(),
        })
    }

    /// Begins on the first event, activates and ends on the last up.
    pub fn press() -> Self {
        Self::new(|core, event| {
            core.begin();
            if event.action == PointerAction::Up {
                core.activate();
                core.end();
            }
        })
    }

    /// Begins on the first event and never decides by itself.
    pub fn idle() -> Self {
        Self::new(|core, _| core.begin())
    }

    /// Report `kind` to policies.
    #[must_use]
    pub fn with_kind(mut self, kind: &'static str) -> Self {
        self.kind = kind;
        self
    }

    /// Let any other recognizer cancel this one while active.
    #[must_use]
    pub fn yielding(mut self) -> Self {
        self.yields_to_others = true;
        self
    }

    /// Recognize simultaneously with everything.
    #[must_use]
    pub fn simultaneous(mut self) -> Self {
        self.simultaneous = true;
        self
    }

    /// How many times the behavior was reset.
    pub fn resets(&self) -> usize {
        self.resets
    }

    /// How many times the recognizer was cancelled from outside.
    pub fn cancels(&self) -> usize {
        self.cancels
    }
}

impl fmt::Debug for ScriptedBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedBehavior")
            .field("kind", &self.kind)
            .field("resets", &self.resets)
            .field("cancels", &self.cancels)
            .finish_non_exhaustive()
    }
}

impl RecognizerBehavior for ScriptedBehavior {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn on_handle(&mut self, core: &mut GestureCore, event: &PointerEvent) {
        (self.script)(core, event)
    }

    fn on_reset(&mut self) {
        self.resets += 1;
    }

    fn on_cancel(&mut self, _core: &GestureCore) {
        self.cancels += 1;
    }

    fn should_recognize_simultaneously(&self, _this: &Peer, _other: &Peer) -> bool {
        self.simultaneous
    }

    fn should_be_cancelled_by(&self, _this: &Peer, _other: &Peer) -> bool {
        self.yields_to_others
    }
}

// ============================================================================
// Notification helpers
// ============================================================================

/// `(new, old)` state changes reported for `recognizer`, in order.
pub fn states_of(notifications: &[Notification], recognizer: RecognizerId) -> Vec<(GestureState, GestureState)> {
    notifications
        .iter()
        .filter(|n| n.recognizer() == recognizer)
        .filter_map(Notification::as_state_change)
        .collect()
}

/// States entered by `recognizer`, in order.
pub fn entered_states(notifications: &[Notification], recognizer: RecognizerId) -> Vec<GestureState> {
    states_of(notifications, recognizer)
        .into_iter()
        .map(|(new, _)| new)
        .collect()
}
