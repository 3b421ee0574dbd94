//! # Orchestrator
//!
//! The [`Orchestrator`] owns every attached recognizer and runs interactions:
//!
//! 1. A `Down` starts a new interaction. Recognizers whose target is under
//!    the pointer (or whose hit-slop contains it) join as members.
//! 2. Each event is delivered to the members in a deterministic order
//!    (active, then awaiting, then by attach order).
//! 3. Every state transition is arbitrated: activation may be deferred,
//!    refused, or may cancel other members.
//! 4. An `Up` or `Cancel` closes the interaction; nothing is left half-open.
//!
//! Notifications are collected into an outbox and flushed into the caller's
//! [`NotificationSink`] at the end of every dispatch.
//!
//! # Example
//!
//! ```rust,ignore
//! use tactus::prelude::*;
//!
//! let mut orchestrator = Orchestrator::new();
//! let tap = Behavior::from(Tap::new(TapConfig::default())?).into_recognizer(RecognizerId(1));
//! let tap = orchestrator.attach(tap, TargetId(1))?;
//!
//! for event in platform_events {
//!     for notification in orchestrator.dispatch(&tree, &event) {
//!         host.apply(notification);
//!     }
//! }
//! ```

mod arbitration;
mod delivery;
mod registry;

pub use registry::RecognizerHandle;

use arbitration::Side;
use delivery::DeliveryOrder;
use registry::{Entry, Registry};
use tactus_core::{
    AttachError, GestureRecognizer, GestureState, Notification, NotificationSink, PointerAction,
    PointerEvent, PointerId, RecognizerBehavior, RecognizerId, TargetId, TargetTree,
};
use tactus_std::Behavior;

/// Runs interactions over a set of attached recognizers.
pub struct Orchestrator<B: RecognizerBehavior = Behavior> {
    registry: Registry<B>,
    /// Members of the current interaction, in extraction order.
    members: Vec<usize>,
    /// Members waiting for others to fail, in registration order.
    awaiting: Vec<usize>,
    open: bool,
    next_activation_index: u64,
    sequence: u64,
    outbox: Vec<Notification>,
    delivery: DeliveryOrder,
}

impl<B: RecognizerBehavior> Default for Orchestrator<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RecognizerBehavior> std::fmt::Debug for Orchestrator<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("recognizers", &self.registry.len())
            .field("members", &self.members.len())
            .field("awaiting", &self.awaiting.len())
            .field("open", &self.open)
            .finish()
    }
}

impl<B: RecognizerBehavior> Orchestrator<B> {
    /// Create an orchestrator with no recognizers.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            members: Vec::new(),
            awaiting: Vec::new(),
            open: false,
            next_activation_index: 0,
            sequence: 0,
            outbox: Vec::new(),
            delivery: DeliveryOrder::default(),
        }
    }

    // ========================================================================
    // Attachment
    // ========================================================================

    /// Attach `recognizer` to `target`.
    ///
    /// Fails when the id is taken, or when the wait-for-failure relations of
    /// the new recognizer would close a cycle.
    pub fn attach(
        &mut self,
        recognizer: GestureRecognizer<B>,
        target: TargetId,
    ) -> Result<RecognizerHandle, AttachError> {
        let id = recognizer.id();
        if self.registry.iter().any(|(_, e)| e.recognizer.id() == id) {
            #[cfg(feature = "tracing")]
            {
                tracing::warn!(recognizer = %id, "Duplicate recognizer id");
            }
            return Err(AttachError::DuplicateId(id));
        }

        if let Some(path) = self.wait_cycle(&recognizer, target) {
            #[cfg(feature = "tracing")]
            {
                tracing::warn!(recognizer = %id, ?path, "Wait-for-failure cycle");
            }
            return Err(AttachError::WaitForFailureCycle { path });
        }

        let activation_index = self.next_activation_index;
        self.next_activation_index += 1;
        let handle = self
            .registry
            .insert(Entry::new(recognizer, target, activation_index));

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(recognizer = %id, %target, "Attached");
        }
        Ok(handle)
    }

    /// Detach a recognizer, cancelling it first if it takes part in the
    /// current interaction. The handle is invalid afterwards.
    pub fn detach(&mut self, handle: RecognizerHandle) -> Option<GestureRecognizer<B>> {
        let index = self.registry.resolve(handle)?;
        if self.members.contains(&index) {
            self.force_cancel(index);
            self.members.retain(|&m| m != index);
        }
        self.clear_awaiting(index);
        let entry = self.registry.remove(handle)?;

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(recognizer = %entry.recognizer.id(), "Detached");
        }
        Some(entry.recognizer)
    }

    /// A path `candidate -> .. -> candidate` along wait-for-failure edges.
    ///
    /// The attached set is acyclic, so any new cycle runs through the candidate.
    fn wait_cycle(
        &self,
        candidate: &GestureRecognizer<B>,
        target: TargetId,
    ) -> Option<Vec<RecognizerId>> {
        let mut nodes: Vec<Side<'_, B>> = vec![Side::new(candidate, candidate.peer(target))];
        nodes.extend(self.registry.iter().map(|(_, e)| Side::of(e)));
        let ids: Vec<RecognizerId> = std::iter::once(candidate.id())
            .chain(self.registry.iter().map(|(_, e)| e.recognizer.id()))
            .collect();

        let mut visited = vec![false; nodes.len()];
        // (node, next neighbour to try)
        let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
        visited[0] = true;

        while let Some(top) = stack.last_mut() {
            let (node, neighbour) = *top;
            if neighbour >= nodes.len() {
                stack.pop();
                continue;
            }
            top.1 += 1;
            if !nodes[node].waits_for(&nodes[neighbour]) {
                continue;
            }
            if neighbour == 0 {
                let mut path: Vec<RecognizerId> = stack.iter().map(|&(n, _)| ids[n]).collect();
                path.push(ids[0]);
                return Some(path);
            }
            if !visited[neighbour] {
                visited[neighbour] = true;
                stack.push((neighbour, 0));
            }
        }
        None
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Feed one raw event and collect the resulting notifications.
    pub fn dispatch<T>(&mut self, tree: &T, event: &PointerEvent) -> Vec<Notification>
    where
        T: TargetTree + ?Sized,
    {
        let mut notifications = Vec::new();
        self.dispatch_into(tree, event, &mut notifications);
        notifications
    }

    /// Feed one raw event, flushing notifications into `sink`.
    pub fn dispatch_into<T, S>(&mut self, tree: &T, event: &PointerEvent, sink: &mut S)
    where
        T: TargetTree + ?Sized,
        S: NotificationSink + ?Sized,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "dispatch",
            action = ?event.action,
            pointers = event.pointer_count(),
            t = event.timestamp_ms
        )
        .entered();

        match event.action {
            PointerAction::Down => {
                self.start_interaction();
                self.extract(tree, event);
            }
            PointerAction::PointerDown => {
                if !self.open {
                    self.start_interaction();
                }
                self.extract(tree, event);
            }
            PointerAction::Cancel => self.cancel_all(),
            PointerAction::Move | PointerAction::Up | PointerAction::PointerUp => {}
        }

        if self.open {
            self.deliver(tree, event);
        }

        if event.action.is_up() {
            if let Some(pointer) = event.acting_pointer() {
                self.release_pointer(pointer.id);
            }
        }

        if matches!(event.action, PointerAction::Up | PointerAction::Cancel) {
            self.close_interaction();
        }

        self.flush(sink);
    }

    /// Notifications produced outside of a dispatch, e.g. by host operations.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    fn flush<S: NotificationSink + ?Sized>(&mut self, sink: &mut S) {
        for notification in self.outbox.drain(..) {
            sink.notify(notification);
        }
    }

    fn start_interaction(&mut self) {
        if self.open {
            self.close_interaction();
        }
        for &index in &self.members {
            if let Some(entry) = self.registry.get_mut(index) {
                entry.recognizer.reset();
                entry.clear_flags();
            }
        }
        self.members.clear();
        self.awaiting.clear();
        self.open = true;
    }

    /// Add recognizers under the acting pointer to the interaction.
    fn extract<T: TargetTree + ?Sized>(&mut self, tree: &T, event: &PointerEvent) {
        let Some(pointer) = event.acting_pointer() else {
            return;
        };
        let (x, y) = (pointer.x, pointer.y);
        let path = tree.hit_path(x, y);

        // (depth on the hit path, attach order, slot)
        let mut candidates: Vec<(usize, u64, usize)> = Vec::new();
        for (index, entry) in self.registry.iter() {
            let core = entry.recognizer.core();
            if !core.is_enabled() {
                continue;
            }
            let depth = match path.iter().position(|t| *t == entry.target) {
                Some(depth) => depth,
                None if core.hit_slop().is_some() => path.len(),
                None => continue,
            };
            let Some(frame) = tree.frame(entry.target) else {
                continue;
            };
            let inside = match core.hit_slop() {
                Some(slop) => slop.contains(frame, x, y),
                None => tree.contains(entry.target, x, y),
            };
            if inside {
                candidates.push((depth, entry.activation_index, index));
            }
        }
        candidates.sort_unstable();

        for (_, _, index) in candidates {
            self.join(index, pointer.id);
        }
        self.settle_shared_pointer(pointer.id);
    }

    fn join(&mut self, index: usize, raw: PointerId) {
        let member = self.members.contains(&index);
        let Some(entry) = self.registry.get_mut(index) else {
            return;
        };
        if member {
            entry.recognizer.start_tracking(raw);
            return;
        }
        entry.recognizer.prepare();
        entry.clear_flags();
        if entry.recognizer.start_tracking(raw) {
            #[cfg(feature = "tracing")]
            {
                tracing::trace!(recognizer = %entry.recognizer.id(), pointer = %raw, "Joined");
            }
            self.members.push(index);
        }
    }

    fn deliver<T: TargetTree + ?Sized>(&mut self, tree: &T, event: &PointerEvent) {
        let order = self.delivery.snapshot(&self.members, &self.registry);
        for &index in &order {
            self.deliver_to(tree, index, event);
        }
        self.delivery.recycle(order);
    }

    fn deliver_to<T: TargetTree + ?Sized>(&mut self, tree: &T, index: usize, event: &PointerEvent) {
        let Some(entry) = self.registry.get_mut(index) else {
            return;
        };
        let Some(frame) = tree.frame(entry.target) else {
            // The target went away mid-interaction.
            self.force_cancel(index);
            return;
        };
        if !entry.recognizer.wants_events() {
            return;
        }
        if entry.awaiting && event.action == PointerAction::Move {
            return;
        }

        let adapted = entry.recognizer.handle(event, frame);
        let recognizer = entry.recognizer.id();
        let needs_pointer_data = entry.recognizer.core().needs_pointer_data();
        self.drain(index);
        let Some(adapted) = adapted else {
            return;
        };

        if needs_pointer_data {
            self.outbox.push(Notification::Touch {
                recognizer,
                event: adapted.as_ref().clone(),
            });
        }

        let Some(entry) = self.registry.get_mut(index) else {
            return;
        };
        if entry.active && entry.state() == GestureState::Active {
            if entry.reset_progress_pending {
                entry.reset_progress_pending = false;
                entry.recognizer.reset_progress();
            }
            self.outbox.push(Notification::Update {
                recognizer,
                event: adapted.into_owned(),
            });
        }
    }

    /// The pointer `raw` lifted: untrack it and settle members left with none.
    fn release_pointer(&mut self, raw: PointerId) {
        let members = self.members.clone();
        for index in members {
            let Some(entry) = self.registry.get_mut(index) else {
                continue;
            };
            entry.recognizer.stop_tracking(raw);
            let state = entry.state();
            if !entry.recognizer.core().tracker().is_empty() || state.is_finished() {
                continue;
            }
            let core = entry.recognizer.core_mut();
            if state == GestureState::Undetermined {
                core.fail();
            } else {
                core.end();
            }
            self.drain(index);
        }
    }

    fn cancel_all(&mut self) {
        let awaiting: Vec<usize> = self.awaiting.iter().rev().copied().collect();
        for index in awaiting {
            self.force_cancel(index);
        }
        let members: Vec<usize> = self.members.iter().rev().copied().collect();
        for index in members {
            self.force_cancel(index);
        }
    }

    /// Settle every member so nothing stays half-open between interactions.
    fn close_interaction(&mut self) {
        let members: Vec<usize> = self.members.iter().rev().copied().collect();
        for index in members {
            let Some(entry) = self.registry.get(index) else {
                continue;
            };
            if !entry.state().is_finished() || entry.awaiting || !entry.reported.is_finished() {
                self.force_cancel(index);
            }
        }
        // A platform cancel skips the per-pointer release.
        for &index in &self.members {
            if let Some(entry) = self.registry.get_mut(index) {
                let tracked: Vec<PointerId> = entry.recognizer.core().tracker().raw_ids().collect();
                for raw in tracked {
                    entry.recognizer.stop_tracking(raw);
                }
            }
        }
        self.awaiting.clear();
        self.open = false;

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(members = self.members.len(), "Interaction closed");
        }
    }

    // ========================================================================
    // Host operations
    // ========================================================================

    fn host_op(&mut self, handle: RecognizerHandle, op: impl FnOnce(&mut GestureRecognizer<B>)) -> bool {
        let Some(index) = self.registry.resolve(handle) else {
            return false;
        };
        if !self.members.contains(&index) {
            return false;
        }
        if let Some(entry) = self.registry.get_mut(index) {
            op(&mut entry.recognizer);
        }
        self.drain(index);
        true
    }

    /// Move a member to `Began`. Returns `false` for stale handles and
    /// recognizers outside the current interaction.
    pub fn begin(&mut self, handle: RecognizerHandle) -> bool {
        self.host_op(handle, |r| r.core_mut().begin())
    }

    /// Ask for activation, bypassing manual activation. Arbitration still applies.
    pub fn activate(&mut self, handle: RecognizerHandle) -> bool {
        self.host_op(handle, |r| r.core_mut().force_activate())
    }

    /// End a member.
    pub fn end(&mut self, handle: RecognizerHandle) -> bool {
        self.host_op(handle, |r| r.core_mut().end())
    }

    /// Fail a member.
    pub fn fail(&mut self, handle: RecognizerHandle) -> bool {
        self.host_op(handle, |r| r.core_mut().fail())
    }

    /// Cancel a member.
    pub fn cancel(&mut self, handle: RecognizerHandle) -> bool {
        let Some(index) = self.registry.resolve(handle) else {
            return false;
        };
        if !self.members.contains(&index) {
            return false;
        }
        self.force_cancel(index);
        true
    }

    /// Enable or disable a recognizer. Disabling a member cancels it.
    pub fn set_enabled(&mut self, handle: RecognizerHandle, enabled: bool) -> bool {
        let Some(index) = self.registry.resolve(handle) else {
            return false;
        };
        if let Some(entry) = self.registry.get_mut(index) {
            entry.recognizer.set_enabled(enabled);
        }
        if !enabled && self.members.contains(&index) {
            self.force_cancel(index);
        }
        true
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// State last reported for the recognizer.
    pub fn state(&self, handle: RecognizerHandle) -> Option<GestureState> {
        self.entry(handle).map(|e| e.reported)
    }

    /// Whether the recognizer was made active in the current interaction.
    pub fn is_active(&self, handle: RecognizerHandle) -> bool {
        self.entry(handle).is_some_and(|e| e.active)
    }

    /// Whether the recognizer waits for others to fail before activating.
    pub fn is_awaiting(&self, handle: RecognizerHandle) -> bool {
        self.entry(handle).is_some_and(|e| e.awaiting)
    }

    /// Attach order of the recognizer.
    pub fn activation_index(&self, handle: RecognizerHandle) -> Option<u64> {
        self.entry(handle).map(|e| e.activation_index)
    }

    /// Target the recognizer is attached to.
    pub fn target(&self, handle: RecognizerHandle) -> Option<TargetId> {
        self.entry(handle).map(|e| e.target)
    }

    /// Whether any member is currently reported `Active`.
    pub fn is_any_active(&self) -> bool {
        self.members.iter().any(|&i| {
            self.registry
                .get(i)
                .is_some_and(|e| e.reported == GestureState::Active)
        })
    }

    /// Whether an interaction is in progress.
    pub fn is_interaction_open(&self) -> bool {
        self.open
    }

    /// Members of the current (or last) interaction, in extraction order.
    pub fn interaction_members(&self) -> Vec<RecognizerHandle> {
        self.members
            .iter()
            .filter_map(|&i| self.registry.handle_of(i))
            .collect()
    }

    /// The recognizer behind `handle`.
    pub fn get(&self, handle: RecognizerHandle) -> Option<&GestureRecognizer<B>> {
        self.entry(handle).map(|e| &e.recognizer)
    }

    /// Number of attached recognizers.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.registry.len() == 0
    }

    fn entry(&self, handle: RecognizerHandle) -> Option<&Entry<B>> {
        self.registry.get(self.registry.resolve(handle)?)
    }
}
