//! # Recognizer record
//!
//! [`GestureRecognizer`] composes the generic record ([`GestureCore`]) with a
//! [`RecognizerBehavior`]. The record implements the guarded state machine;
//! every effective transition is queued as a [`Transition`] and picked up by
//! the orchestrator through [`GestureRecognizer::take_transitions`].
//!
//! ## Per-event contract
//!
//! [`GestureRecognizer::handle`] is a no-op while the recognizer is disabled,
//! finished, or has no tracked pointer. Otherwise the event is adapted into
//! slot space, bounds are computed from the adapted primary pointer, and the
//! behavior runs unless the pointer left the target of a recognizer that is
//! configured to cancel when outside.

use crate::{
    behavior::RecognizerBehavior,
    error::ConfigError,
    event::{PointerEvent, PointerId},
    geometry::{Point, Rect},
    hit_slop::HitSlop,
    pointer::PointerTracker,
    policy::{InteractionPolicy, Peer},
    state::{GestureState, Transition},
    target::TargetId,
};
use std::{borrow::Cow, fmt, sync::Arc};

/// Host-assigned recognizer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecognizerId(pub u32);

impl fmt::Display for RecognizerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The generic part of every recognizer.
#[derive(Debug, Clone)]
pub struct GestureCore {
    id: RecognizerId,
    state: GestureState,
    tracker: PointerTracker,
    enabled: bool,
    hit_slop: Option<HitSlop>,
    cancel_when_outside: bool,
    manual_activation: bool,
    needs_pointer_data: bool,
    position: Point,
    within_bounds: bool,
    number_of_pointers: usize,
    last_timestamp_ms: u64,
    transitions: Vec<Transition>,
}

impl GestureCore {
    fn new(id: RecognizerId) -> Self {
        Self {
            id,
            state: GestureState::Undetermined,
            tracker: PointerTracker::new(),
            enabled: true,
            hit_slop: None,
            cancel_when_outside: false,
            manual_activation: false,
            needs_pointer_data: false,
            position: Point::default(),
            within_bounds: false,
            number_of_pointers: 0,
            last_timestamp_ms: 0,
            transitions: Vec::new(),
        }
    }

    /// Host-assigned id.
    pub fn id(&self) -> RecognizerId {
        self.id
    }

    /// Current state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Whether the recognizer takes part in interactions.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Configured hit-slop, if any.
    pub fn hit_slop(&self) -> Option<&HitSlop> {
        self.hit_slop.as_ref()
    }

    /// Whether leaving the target aborts the gesture.
    pub fn cancels_when_outside(&self) -> bool {
        self.cancel_when_outside
    }

    /// Whether only the host may activate.
    pub fn is_manual_activation(&self) -> bool {
        self.manual_activation
    }

    /// Whether `Touch` notifications are wanted.
    pub fn needs_pointer_data(&self) -> bool {
        self.needs_pointer_data
    }

    /// Pointers tracked for the current interaction.
    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    /// Primary pointer position of the last handled event.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Whether the last handled primary pointer was inside the target.
    pub fn is_within_bounds(&self) -> bool {
        self.within_bounds
    }

    /// Pointer count of the last handled (adapted) event.
    pub fn number_of_pointers(&self) -> usize {
        self.number_of_pointers
    }

    /// Timestamp of the last handled event.
    pub fn last_timestamp_ms(&self) -> u64 {
        self.last_timestamp_ms
    }

    /// `Undetermined -> Began`.
    pub fn begin(&mut self) {
        if self.state == GestureState::Undetermined {
            self.move_to_state(GestureState::Began);
        }
    }

    /// `Undetermined | Began -> Active`, unless activation is manual.
    pub fn activate(&mut self) {
        if !self.manual_activation {
            self.force_activate();
        }
    }

    /// `Undetermined | Began -> Active`, ignoring manual activation.
    pub fn force_activate(&mut self) {
        if matches!(self.state, GestureState::Undetermined | GestureState::Began) {
            self.move_to_state(GestureState::Active);
        }
    }

    /// `Began | Active -> End`.
    pub fn end(&mut self) {
        if matches!(self.state, GestureState::Began | GestureState::Active) {
            self.move_to_state(GestureState::End);
        }
    }

    /// `Undetermined | Began | Active -> Failed`.
    pub fn fail(&mut self) {
        if !self.state.is_finished() {
            self.move_to_state(GestureState::Failed);
        }
    }

    /// `Undetermined | Began | Active -> Cancelled`.
    pub fn cancel(&mut self) {
        if !self.state.is_finished() {
            self.move_to_state(GestureState::Cancelled);
        }
    }

    fn move_to_state(&mut self, new: GestureState) {
        if self.state == new || !self.state.can_transition_to(new) {
            return;
        }
        let old = self.state;
        self.state = new;
        self.transitions.push(Transition { new, old });
    }

    fn compute_within_bounds(&self, frame: Rect) -> bool {
        let Point { x, y } = self.position;
        match &self.hit_slop {
            Some(slop) => slop.contains(frame, x, y),
            None => frame.contains(x, y),
        }
    }
}

/// A recognizer: generic record plus behavior, optionally with a policy.
pub struct GestureRecognizer<B> {
    core: GestureCore,
    behavior: B,
    policy: Option<Arc<dyn InteractionPolicy>>,
}

impl<B: fmt::Debug> fmt::Debug for GestureRecognizer<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureRecognizer")
            .field("core", &self.core)
            .field("behavior", &self.behavior)
            .field("policy", &self.policy.is_some())
            .finish()
    }
}

impl<B: RecognizerBehavior> GestureRecognizer<B> {
    /// Create an enabled recognizer with no slop and no policy.
    pub fn new(id: RecognizerId, behavior: B) -> Self {
        Self {
            core: GestureCore::new(id),
            behavior,
            policy: None,
        }
    }

    /// Set the initial enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.core.enabled = enabled;
        self
    }

    /// Attach a validated hit-slop.
    #[must_use]
    pub fn with_hit_slop(mut self, hit_slop: HitSlop) -> Self {
        self.core.hit_slop = Some(hit_slop);
        self
    }

    /// Cancel (or fail, before activation) when the pointer leaves the target.
    #[must_use]
    pub fn with_cancel_when_outside(mut self, cancel: bool) -> Self {
        self.core.cancel_when_outside = cancel;
        self
    }

    /// Only host-forced activation succeeds.
    #[must_use]
    pub fn with_manual_activation(mut self, manual: bool) -> Self {
        self.core.manual_activation = manual;
        self
    }

    /// Opt in to `Touch` notifications.
    #[must_use]
    pub fn with_needs_pointer_data(mut self, needs: bool) -> Self {
        self.core.needs_pointer_data = needs;
        self
    }

    /// Attach an interaction policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn InteractionPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Limit the number of pointers this recognizer tracks.
    pub fn with_max_pointers(mut self, max: usize) -> Result<Self, ConfigError> {
        self.core.tracker = PointerTracker::with_capacity(max)?;
        Ok(self)
    }

    /// Host-assigned id.
    pub fn id(&self) -> RecognizerId {
        self.core.id
    }

    /// Current state.
    pub fn state(&self) -> GestureState {
        self.core.state
    }

    /// The generic record.
    pub fn core(&self) -> &GestureCore {
        &self.core
    }

    /// Mutable record access for host-driven transitions.
    pub fn core_mut(&mut self) -> &mut GestureCore {
        &mut self.core
    }

    /// The behavior.
    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    /// Mutable behavior access.
    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    /// The attached policy, if any.
    pub fn policy(&self) -> Option<&dyn InteractionPolicy> {
        self.policy.as_deref()
    }

    /// Behavior kind.
    pub fn kind(&self) -> &'static str {
        self.behavior.kind()
    }

    /// Read-only snapshot handed to policies.
    pub fn peer(&self, target: TargetId) -> Peer {
        Peer {
            id: self.core.id,
            kind: self.behavior.kind(),
            state: self.core.state,
            target,
        }
    }

    /// Toggle the enabled flag. The orchestrator cancels disabled members.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.core.enabled = enabled;
    }

    /// Get ready to join a new interaction.
    pub fn prepare(&mut self) {
        self.reset();
    }

    /// Return to `Undetermined` with no tracked pointer. Idempotent.
    pub fn reset(&mut self) {
        let core = &mut self.core;
        core.state = GestureState::Undetermined;
        core.tracker.clear();
        core.transitions.clear();
        core.position = Point::default();
        core.within_bounds = false;
        core.number_of_pointers = 0;
        core.last_timestamp_ms = 0;
        self.behavior.on_reset();
    }

    /// Cancel from outside, giving the behavior a chance to clean up first.
    pub fn cancel(&mut self) {
        if self.core.state.is_finished() {
            return;
        }
        self.behavior.on_cancel(&self.core);
        self.core.cancel();
    }

    /// Re-anchor progress after the orchestrator accepted the activation.
    pub fn reset_progress(&mut self) {
        self.behavior.reset_progress(&self.core);
    }

    /// Track `raw`; `false` when at capacity.
    pub fn start_tracking(&mut self, raw: PointerId) -> bool {
        self.core.tracker.start_tracking(raw)
    }

    /// Stop tracking `raw`.
    pub fn stop_tracking(&mut self, raw: PointerId) {
        self.core.tracker.stop_tracking(raw);
    }

    /// Whether [`handle`](Self::handle) would do anything.
    pub fn wants_events(&self) -> bool {
        self.core.enabled && !self.core.state.is_finished() && !self.core.tracker.is_empty()
    }

    /// Queued transitions, oldest first.
    pub fn take_transitions(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.core.transitions)
    }

    /// Whether transitions are waiting to be taken.
    pub fn has_pending_transitions(&self) -> bool {
        !self.core.transitions.is_empty()
    }

    /// Handle one raw event against the target's `frame`.
    ///
    /// Returns the adapted event when the event was taken into account.
    pub fn handle<'e>(
        &mut self,
        event: &'e PointerEvent,
        frame: Rect,
    ) -> Option<Cow<'e, PointerEvent>> {
        if !self.wants_events() {
            return None;
        }

        let adapted = self.core.tracker.adapt(event);
        let Some(primary) = adapted.primary() else {
            self.core.fail();
            return None;
        };

        self.core.position = primary.position();
        self.core.number_of_pointers = adapted.pointer_count();
        self.core.last_timestamp_ms = adapted.timestamp_ms;
        let within_bounds = self.core.compute_within_bounds(frame);
        self.core.within_bounds = within_bounds;

        if self.core.cancel_when_outside && !within_bounds {
            match self.core.state {
                GestureState::Active => self.cancel(),
                GestureState::Began => self.core.fail(),
                _ => {}
            }
            return Some(adapted);
        }

        self.behavior.on_handle(&mut self.core, &adapted);
        Some(adapted)
    }
}
