//! Recognizer storage.
//!
//! A generational arena: slots are reused after detach, and the generation
//! stamped into every [`RecognizerHandle`] makes stale handles resolve to
//! nothing instead of to whoever took the slot over.

use tactus_core::{GestureRecognizer, GestureState, Peer, RecognizerBehavior, TargetId};

/// Handle to a recognizer attached to an orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecognizerHandle {
    index: u32,
    generation: u32,
}

impl RecognizerHandle {
    pub(crate) fn index(self) -> usize {
        self.index as usize
    }
}

// ============================================================================
// Entry - a recognizer plus its arbitration flags
// ============================================================================

pub(crate) struct Entry<B> {
    pub(crate) recognizer: GestureRecognizer<B>,
    pub(crate) target: TargetId,
    /// Attach order; ties between equally deep candidates go to the older one.
    pub(crate) activation_index: u64,
    /// Sequence number of the last activation or awaiting registration.
    pub(crate) activated_at: u64,
    /// Made active by the orchestrator in this interaction.
    pub(crate) active: bool,
    /// Wants to activate but waits for another recognizer to fail.
    pub(crate) awaiting: bool,
    /// Last state reported to the host.
    pub(crate) reported: GestureState,
    pub(crate) reset_progress_pending: bool,
}

impl<B: RecognizerBehavior> Entry<B> {
    pub(crate) fn new(recognizer: GestureRecognizer<B>, target: TargetId, activation_index: u64) -> Self {
        Self {
            recognizer,
            target,
            activation_index,
            activated_at: 0,
            active: false,
            awaiting: false,
            reported: GestureState::Undetermined,
            reset_progress_pending: false,
        }
    }

    pub(crate) fn peer(&self) -> Peer {
        self.recognizer.peer(self.target)
    }

    pub(crate) fn state(&self) -> GestureState {
        self.recognizer.state()
    }

    /// Forget everything about the previous interaction.
    pub(crate) fn clear_flags(&mut self) {
        self.active = false;
        self.awaiting = false;
        self.activated_at = 0;
        self.reported = GestureState::Undetermined;
        self.reset_progress_pending = false;
    }
}

struct Slot<B> {
    generation: u32,
    entry: Option<Entry<B>>,
}

// ============================================================================
// Registry - generational arena
// ============================================================================

pub(crate) struct Registry<B> {
    slots: Vec<Slot<B>>,
    free: Vec<u32>,
    len: usize,
}

impl<B> Registry<B> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn insert(&mut self, entry: Entry<B>) -> RecognizerHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some(entry);
            return RecognizerHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        RecognizerHandle {
            index,
            generation: 0,
        }
    }

    pub(crate) fn remove(&mut self, handle: RecognizerHandle) -> Option<Entry<B>> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(entry)
    }

    /// Slot index of a live handle.
    pub(crate) fn resolve(&self, handle: RecognizerHandle) -> Option<usize> {
        let slot = self.slots.get(handle.index())?;
        (slot.generation == handle.generation && slot.entry.is_some()).then_some(handle.index())
    }

    pub(crate) fn handle_of(&self, index: usize) -> Option<RecognizerHandle> {
        let slot = self.slots.get(index)?;
        slot.entry.as_ref()?;
        Some(RecognizerHandle {
            index: index as u32,
            generation: slot.generation,
        })
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Entry<B>> {
        self.slots.get(index)?.entry.as_ref()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Entry<B>> {
        self.slots.get_mut(index)?.entry.as_mut()
    }

    /// Live entries with their slot index, in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &Entry<B>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.entry.as_ref().map(|entry| (index, entry)))
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactus_core::RecognizerId;
    use tactus_std::testing::ScriptedBehavior;

    fn entry(id: u32) -> Entry<ScriptedBehavior> {
        Entry::new(
            GestureRecognizer::new(RecognizerId(id), ScriptedBehavior::idle()),
            TargetId(1),
            u64::from(id),
        )
    }

    #[test]
    fn stale_handles_resolve_to_nothing() {
        let mut registry = Registry::new();
        let first = registry.insert(entry(1));
        assert!(registry.remove(first).is_some());

        let second = registry.insert(entry(2));
        assert_eq!(first.index(), second.index());
        assert_eq!(registry.resolve(first), None);
        assert_eq!(registry.resolve(second), Some(second.index()));
        assert!(registry.remove(first).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn iteration_skips_free_slots() {
        let mut registry = Registry::new();
        let handles: Vec<_> = (0..3).map(|id| registry.insert(entry(id))).collect();
        registry.remove(handles[1]);
        let ids: Vec<_> = registry.iter().map(|(_, e)| e.recognizer.id()).collect();
        assert_eq!(ids, vec![RecognizerId(0), RecognizerId(2)]);
        assert_eq!(registry.handle_of(handles[2].index()), Some(handles[2]));
        assert_eq!(registry.handle_of(handles[1].index()), None);
    }
}
