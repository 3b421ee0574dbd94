//! # Pointer virtualization (PointerTracker)
//!
//! Platform pointer ids are sparse and come and go mid-interaction. Each
//! recognizer owns a [`PointerTracker`] that maps the raw ids it cares about
//! to a dense `0..capacity` slot space, so recognizer math can index arrays
//! by slot and stay stable while other pointers appear and disappear.
//!
//! [`PointerTracker::adapt`] rewrites a raw event into the recognizer's own
//! view: untracked pointers are dropped, ids become slots, and the action is
//! re-derived so a recognizer never sees a down or up it does not own.

use crate::{
    error::ConfigError,
    event::{Pointer, PointerAction, PointerEvent, PointerId},
};
use std::borrow::Cow;

/// Maximum number of simultaneously tracked pointers.
pub const MAX_POINTERS: usize = 12;

/// Maps raw pointer ids to virtual slots for one recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerTracker {
    // (raw id, slot) in insertion order
    entries: Vec<(PointerId, usize)>,
    capacity: usize,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    /// A tracker accepting up to [`MAX_POINTERS`] pointers.
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_POINTERS),
            capacity: MAX_POINTERS,
        }
    }

    /// A tracker accepting at most `capacity` pointers.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 || capacity > MAX_POINTERS {
            return Err(ConfigError::InvalidPointerCapacity {
                requested: capacity,
                max: MAX_POINTERS,
            });
        }
        Ok(Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        })
    }

    /// Start tracking `raw`, assigning the lowest free slot.
    ///
    /// Returns `true` if the pointer is tracked afterwards; `false` when the
    /// tracker is full.
    pub fn start_tracking(&mut self, raw: PointerId) -> bool {
        if self.slot_of(raw).is_some() {
            return true;
        }
        if self.entries.len() >= self.capacity {
            return false;
        }
        let slot = (0..self.capacity)
            .find(|slot| self.entries.iter().all(|(_, used)| used != slot))
            .unwrap_or(self.entries.len());
        self.entries.push((raw, slot));
        true
    }

    /// Stop tracking `raw`, freeing its slot.
    pub fn stop_tracking(&mut self, raw: PointerId) {
        self.entries.retain(|(id, _)| *id != raw);
    }

    /// The slot assigned to `raw`.
    pub fn slot_of(&self, raw: PointerId) -> Option<usize> {
        self.entries
            .iter()
            .find(|(id, _)| *id == raw)
            .map(|(_, slot)| *slot)
    }

    /// Whether `raw` is tracked.
    pub fn is_tracking(&self, raw: PointerId) -> bool {
        self.slot_of(raw).is_some()
    }

    /// Tracked raw ids, in the order they started being tracked.
    pub fn raw_ids(&self) -> impl Iterator<Item = PointerId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Number of tracked pointers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pointer is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of tracked pointers.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget every pointer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether both trackers follow at least one common raw pointer.
    pub fn shares_pointer_with(&self, other: &PointerTracker) -> bool {
        self.raw_ids().any(|id| other.is_tracking(id))
    }

    fn needs_adapt(&self, event: &PointerEvent) -> bool {
        event.pointers.len() != self.entries.len()
            || event
                .pointers
                .iter()
                .any(|p| self.slot_of(p.id) != Some(p.id.0 as usize))
    }

    /// Rewrite `event` into this tracker's slot space.
    ///
    /// Borrows `event` unchanged when its pointers already coincide with the
    /// tracked slots.
    pub fn adapt<'e>(&self, event: &'e PointerEvent) -> Cow<'e, PointerEvent> {
        if !self.needs_adapt(event) {
            return Cow::Borrowed(event);
        }

        let acting_tracked = event
            .acting_pointer()
            .is_some_and(|p| self.is_tracking(p.id));
        let single = self.entries.len() == 1;
        let action = match event.action {
            PointerAction::Down | PointerAction::PointerDown if acting_tracked => {
                if single {
                    PointerAction::Down
                } else {
                    PointerAction::PointerDown
                }
            }
            PointerAction::Up | PointerAction::PointerUp if acting_tracked => {
                if single {
                    PointerAction::Up
                } else {
                    PointerAction::PointerUp
                }
            }
            PointerAction::Down
            | PointerAction::PointerDown
            | PointerAction::Up
            | PointerAction::PointerUp => PointerAction::Move,
            other => other,
        };

        let mut pointers = Vec::with_capacity(self.entries.len());
        let mut action_index = 0;
        for (index, pointer) in event.pointers.iter().enumerate() {
            let Some(slot) = self.slot_of(pointer.id) else {
                continue;
            };
            if index == event.action_index && action != PointerAction::Move {
                action_index = pointers.len();
            }
            pointers.push(Pointer {
                id: PointerId(slot as u32),
                ..*pointer
            });
        }

        Cow::Owned(PointerEvent {
            action,
            action_index,
            pointers,
            timestamp_ms: event.timestamp_ms,
            meta_state: event.meta_state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(action: PointerAction, action_index: usize, ids: &[u32]) -> PointerEvent {
        let pointers = ids
            .iter()
            .map(|id| Pointer::new(*id, *id as f32 * 10.0, 0.0))
            .collect();
        PointerEvent::new(action, action_index, pointers, 0)
    }

    #[test]
    fn slots_are_dense_and_reused() {
        let mut tracker = PointerTracker::new();
        assert!(tracker.start_tracking(PointerId(40)));
        assert!(tracker.start_tracking(PointerId(7)));
        assert!(tracker.start_tracking(PointerId(40)));
        assert_eq!(tracker.slot_of(PointerId(40)), Some(0));
        assert_eq!(tracker.slot_of(PointerId(7)), Some(1));

        tracker.stop_tracking(PointerId(40));
        tracker.stop_tracking(PointerId(40));
        assert!(tracker.start_tracking(PointerId(99)));
        assert_eq!(tracker.slot_of(PointerId(99)), Some(0));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut tracker = PointerTracker::with_capacity(2).unwrap();
        assert!(tracker.start_tracking(PointerId(1)));
        assert!(tracker.start_tracking(PointerId(2)));
        assert!(!tracker.start_tracking(PointerId(3)));
        assert_eq!(tracker.len(), 2);
        assert!(PointerTracker::with_capacity(0).is_err());
        assert!(PointerTracker::with_capacity(MAX_POINTERS + 1).is_err());
    }

    #[test]
    fn identity_events_are_borrowed() {
        let mut tracker = PointerTracker::new();
        tracker.start_tracking(PointerId(0));
        tracker.start_tracking(PointerId(1));
        let raw = event(PointerAction::Move, 0, &[0, 1]);
        assert!(matches!(tracker.adapt(&raw), Cow::Borrowed(_)));
    }

    #[test]
    fn untracked_pointers_are_dropped_and_renamed() {
        let mut tracker = PointerTracker::new();
        tracker.start_tracking(PointerId(5));
        let raw = event(PointerAction::PointerDown, 1, &[5, 8]);
        let adapted = tracker.adapt(&raw);
        assert_eq!(adapted.action, PointerAction::Move);
        assert_eq!(adapted.pointers.len(), 1);
        assert_eq!(adapted.pointers[0].id, PointerId(0));
        assert_eq!(adapted.pointers[0].x, 50.0);
        // the raw event is untouched
        assert_eq!(raw.pointers.len(), 2);
        assert_eq!(raw.action, PointerAction::PointerDown);
    }

    #[test]
    fn single_tracked_pointer_sees_plain_down_and_up() {
        let mut tracker = PointerTracker::new();
        tracker.start_tracking(PointerId(8));
        let down = event(PointerAction::PointerDown, 1, &[5, 8]);
        let adapted = tracker.adapt(&down);
        assert_eq!(adapted.action, PointerAction::Down);
        assert_eq!(adapted.action_index, 0);

        let up = event(PointerAction::PointerUp, 1, &[5, 8]);
        assert_eq!(tracker.adapt(&up).action, PointerAction::Up);
    }

    #[test]
    fn secondary_pointer_keeps_pointer_actions() {
        let mut tracker = PointerTracker::new();
        tracker.start_tracking(PointerId(3));
        tracker.start_tracking(PointerId(9));
        let up = event(PointerAction::PointerUp, 2, &[3, 4, 9]);
        let adapted = tracker.adapt(&up);
        assert_eq!(adapted.action, PointerAction::PointerUp);
        assert_eq!(adapted.action_index, 1);
        assert_eq!(adapted.pointers[1].id, PointerId(1));
    }

    #[test]
    fn sharing_is_by_raw_id() {
        let mut a = PointerTracker::new();
        let mut b = PointerTracker::new();
        a.start_tracking(PointerId(1));
        b.start_tracking(PointerId(2));
        assert!(!a.shares_pointer_with(&b));
        b.start_tracking(PointerId(1));
        assert!(a.shares_pointer_with(&b));
    }
}
