//! Delivery ordering.
//!
//! Members see every event in a fixed order: recognizers made active first,
//! then recognizers awaiting activation, each group by the sequence number of
//! its activation, then everyone else in attach order. Sorting is stable, so
//! two recognizers with equal keys keep their extraction order.

use super::registry::{Entry, Registry};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Group {
    Active,
    Awaiting,
    Idle,
}

/// Position of one entry in the delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DeliveryKey {
    group: Group,
    sequence: u64,
}

impl DeliveryKey {
    pub(crate) fn of<B>(entry: &Entry<B>) -> Self {
        if entry.active {
            Self {
                group: Group::Active,
                sequence: entry.activated_at,
            }
        } else if entry.awaiting {
            Self {
                group: Group::Awaiting,
                sequence: entry.activated_at,
            }
        } else {
            Self {
                group: Group::Idle,
                sequence: entry.activation_index,
            }
        }
    }
}

impl Ord for DeliveryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.group
            .cmp(&other.group)
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for DeliveryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable buffer holding the delivery order of one event.
#[derive(Debug, Default)]
pub(crate) struct DeliveryOrder {
    order: Vec<usize>,
}

impl DeliveryOrder {
    /// Sort `members` into delivery order and hand out a snapshot.
    ///
    /// The snapshot is taken out of the buffer so the caller can mutate the
    /// orchestrator while walking it; give it back with [`recycle`](Self::recycle).
    pub(crate) fn snapshot<B>(&mut self, members: &[usize], registry: &Registry<B>) -> Vec<usize> {
        let mut order = std::mem::take(&mut self.order);
        order.clear();
        order.extend(members.iter().copied().filter(|i| registry.get(*i).is_some()));
        order.sort_by_key(|i| registry.get(*i).map(DeliveryKey::of));
        order
    }

    pub(crate) fn recycle(&mut self, order: Vec<usize>) {
        self.order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactus_core::{GestureRecognizer, RecognizerId, TargetId};
    use tactus_std::testing::ScriptedBehavior;

    fn entry(index: u64) -> Entry<ScriptedBehavior> {
        Entry::new(
            GestureRecognizer::new(RecognizerId(index as u32), ScriptedBehavior::idle()),
            TargetId(1),
            index,
        )
    }

    #[test]
    fn active_then_awaiting_then_attach_order() {
        let mut registry = Registry::new();
        let handles: Vec<_> = (0..4).map(|i| registry.insert(entry(i))).collect();
        let members: Vec<_> = handles.iter().map(|h| h.index()).collect();

        // 3 activated first, 1 activated later, 2 awaits
        if let Some(e) = registry.get_mut(members[3]) {
            e.active = true;
            e.activated_at = 1;
        }
        if let Some(e) = registry.get_mut(members[1]) {
            e.active = true;
            e.activated_at = 3;
        }
        if let Some(e) = registry.get_mut(members[2]) {
            e.awaiting = true;
            e.activated_at = 2;
        }

        let mut delivery = DeliveryOrder::default();
        let order = delivery.snapshot(&members, &registry);
        assert_eq!(order, vec![members[3], members[1], members[2], members[0]]);
        delivery.recycle(order);
    }

    #[test]
    fn equal_keys_keep_extraction_order() {
        let mut registry = Registry::new();
        let a = registry.insert(entry(5)).index();
        let b = registry.insert(entry(5)).index();
        let mut delivery = DeliveryOrder::default();
        assert_eq!(delivery.snapshot(&[b, a], &registry), vec![b, a]);
    }
}
