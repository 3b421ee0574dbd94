//! Arbitration between members of the current interaction.
//!
//! Every transition a recognizer takes is routed through
//! [`Orchestrator::on_state_change`]. Activation is the only transition the
//! orchestrator can veto: a recognizer asking to activate either waits for the
//! recognizers it depends on, is refused by an incumbent it cannot coexist
//! with, or is made active and cancels everyone it beats.
//!
//! The host only sees states through [`Entry::reported`]. A recognizer that is
//! internally `Active` while awaiting is still reported as `Began`.

use super::{Orchestrator, registry::Entry};
use tactus_core::{
    GestureRecognizer, GestureState, Notification, Peer, PointerId, RecognizerBehavior, Transition,
};

/// A recognizer together with its snapshot, as seen by the predicates.
pub(crate) struct Side<'a, B> {
    recognizer: &'a GestureRecognizer<B>,
    peer: Peer,
}

impl<'a, B: RecognizerBehavior> Side<'a, B> {
    pub(crate) fn of(entry: &'a Entry<B>) -> Self {
        Self {
            recognizer: &entry.recognizer,
            peer: entry.peer(),
        }
    }

    pub(crate) fn new(recognizer: &'a GestureRecognizer<B>, peer: Peer) -> Self {
        Self { recognizer, peer }
    }

    /// `self` may not activate before `other` fails.
    ///
    /// Either side can declare the dependency.
    pub(crate) fn waits_for(&self, other: &Side<'_, B>) -> bool {
        if self.peer.id == other.peer.id {
            return false;
        }
        self.recognizer
            .policy()
            .is_some_and(|p| p.should_wait_for_failure(&self.peer, &other.peer))
            || other
                .recognizer
                .policy()
                .is_some_and(|p| p.should_require_other_to_wait_for_failure(&other.peer, &self.peer))
    }

    fn simultaneous_with(&self, other: &Side<'_, B>) -> bool {
        self.recognizer
            .behavior()
            .should_recognize_simultaneously(&self.peer, &other.peer)
            || self
                .recognizer
                .policy()
                .is_some_and(|p| p.should_recognize_simultaneously(&self.peer, &other.peer))
    }

    /// `self` steps aside when `other` activates.
    fn yields_to(&self, other: &Side<'_, B>) -> bool {
        self.recognizer
            .behavior()
            .should_be_cancelled_by(&self.peer, &other.peer)
            || self
                .recognizer
                .policy()
                .is_some_and(|p| p.should_be_cancelled_by(&self.peer, &other.peer))
    }

    fn shares_pointer_with(&self, other: &Side<'_, B>) -> bool {
        self.recognizer
            .core()
            .tracker()
            .shares_pointer_with(other.recognizer.core().tracker())
    }
}

// ============================================================================
// Predicates
// ============================================================================

impl<B: RecognizerBehavior> Orchestrator<B> {
    fn sides(&self, a: usize, b: usize) -> Option<(Side<'_, B>, Side<'_, B>)> {
        Some((
            Side::of(self.registry.get(a)?),
            Side::of(self.registry.get(b)?),
        ))
    }

    pub(super) fn should_wait_for(&self, this: usize, other: usize) -> bool {
        this != other
            && self
                .sides(this, other)
                .is_some_and(|(this, other)| this.waits_for(&other))
    }

    pub(super) fn can_run_simultaneously(&self, a: usize, b: usize) -> bool {
        a == b
            || self
                .sides(a, b)
                .is_some_and(|(a, b)| a.simultaneous_with(&b) || b.simultaneous_with(&a))
    }

    /// Whether `other` must be cancelled now that `winner` activates.
    fn should_be_cancelled_by(&self, other: usize, winner: usize) -> bool {
        let Some((o, w)) = self.sides(other, winner) else {
            return false;
        };
        if !o.shares_pointer_with(&w) || self.can_run_simultaneously(other, winner) {
            return false;
        }
        let pending = self
            .registry
            .get(other)
            .is_some_and(|e| e.awaiting || e.state() == GestureState::Active);
        if other != winner && pending {
            return o.yields_to(&w);
        }
        true
    }

    fn has_other_to_wait_for(&self, index: usize) -> bool {
        self.members.iter().any(|&other| {
            other != index
                && self
                    .registry
                    .get(other)
                    .is_some_and(|e| !e.state().is_finished())
                && self.should_wait_for(index, other)
        })
    }

    /// An active member that refuses to make room for `index`.
    fn blocking_incumbent(&self, index: usize) -> Option<usize> {
        self.members.iter().copied().find(|&other| {
            if other == index {
                return false;
            }
            let Some((incumbent, newcomer)) = self.sides(other, index) else {
                return false;
            };
            self.holds_active(other)
                && incumbent.shares_pointer_with(&newcomer)
                && !self.can_run_simultaneously(other, index)
                && !incumbent.yields_to(&newcomer)
        })
    }
}

// ============================================================================
// State changes
// ============================================================================

impl<B: RecognizerBehavior> Orchestrator<B> {
    /// Route every queued transition of `index` through arbitration.
    pub(super) fn drain(&mut self, index: usize) {
        loop {
            let Some(entry) = self.registry.get_mut(index) else {
                return;
            };
            let transitions = entry.recognizer.take_transitions();
            if transitions.is_empty() {
                return;
            }
            for transition in transitions {
                self.on_state_change(index, transition);
            }
        }
    }

    fn on_state_change(&mut self, index: usize, Transition { new, old }: Transition) {
        #[cfg(feature = "tracing")]
        {
            if let Some(entry) = self.registry.get(index) {
                tracing::trace!(recognizer = %entry.recognizer.id(), %old, %new, "Transition");
            }
        }

        if new.is_finished() {
            let waiters: Vec<usize> = self
                .awaiting
                .iter()
                .copied()
                .filter(|&w| self.should_wait_for(w, index))
                .collect();
            for waiter in waiters {
                if !self.is_awaiting_index(waiter) {
                    continue;
                }
                if new == GestureState::End {
                    self.force_cancel(waiter);
                } else {
                    self.try_activate(waiter);
                }
            }
            if let Some(entry) = self.registry.get_mut(index) {
                if entry.awaiting && new != GestureState::End {
                    entry.awaiting = false;
                }
            }
            self.retain_awaiting();
        }

        if new == GestureState::Active {
            self.try_activate(index);
        } else if old == GestureState::Active {
            let Some(entry) = self.registry.get(index) else {
                return;
            };
            if entry.active {
                self.emit(index, new);
            } else if matches!(new, GestureState::Cancelled | GestureState::Failed) {
                self.emit(index, new);
            }
            // An `End` while awaiting is reported once the wait resolves.
        } else {
            self.emit(index, new);
        }
    }

    /// A pointer that landed on two active members makes them overlap.
    ///
    /// The later activation is cancelled unless the pair can coexist or the
    /// earlier one yields to it.
    pub(super) fn settle_shared_pointer(&mut self, raw: PointerId) {
        let mut holders: Vec<usize> = self
            .members
            .iter()
            .copied()
            .filter(|&index| {
                self.holds_active(index)
                    && self
                        .registry
                        .get(index)
                        .is_some_and(|e| e.recognizer.core().tracker().is_tracking(raw))
            })
            .collect();
        if holders.len() < 2 {
            return;
        }
        holders.sort_by_key(|&index| self.registry.get(index).map_or(0, |e| e.activated_at));

        for (n, &later) in holders.iter().enumerate() {
            for &earlier in &holders[..n] {
                if !self.holds_active(earlier) || !self.holds_active(later) {
                    continue;
                }
                if self.can_run_simultaneously(earlier, later) {
                    continue;
                }
                let loser = if self.should_be_cancelled_by(earlier, later) {
                    earlier
                } else {
                    later
                };

                #[cfg(feature = "tracing")]
                {
                    if let Some(entry) = self.registry.get(loser) {
                        tracing::debug!(
                            recognizer = %entry.recognizer.id(),
                            pointer = %raw,
                            "Cancelled by shared pointer"
                        );
                    }
                }
                self.force_cancel(loser);
            }
        }
    }

    fn holds_active(&self, index: usize) -> bool {
        self.registry
            .get(index)
            .is_some_and(|e| e.active && e.state() == GestureState::Active)
    }

    fn try_activate(&mut self, index: usize) {
        if self.has_other_to_wait_for(index) {
            self.add_awaiting(index);
        } else {
            self.make_active(index);
        }
    }

    fn add_awaiting(&mut self, index: usize) {
        let sequence = self.next_sequence();
        let Some(entry) = self.registry.get_mut(index) else {
            return;
        };
        if entry.awaiting {
            return;
        }
        entry.awaiting = true;
        entry.activated_at = sequence;
        self.awaiting.push(index);

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(recognizer = %entry.recognizer.id(), "Awaiting activation");
        }
    }

    fn make_active(&mut self, index: usize) {
        let Some(current) = self.registry.get(index).map(Entry::state) else {
            return;
        };
        if !matches!(current, GestureState::Active | GestureState::End) {
            self.clear_awaiting(index);
            return;
        }

        if let Some(_incumbent) = self.blocking_incumbent(index) {
            #[cfg(feature = "tracing")]
            {
                if let Some((winner, loser)) = self.sides(_incumbent, index) {
                    tracing::debug!(
                        recognizer = %loser.peer.id,
                        incumbent = %winner.peer.id,
                        "Activation refused"
                    );
                }
            }
            self.clear_awaiting(index);
            self.force_cancel(index);
            return;
        }

        let sequence = self.next_sequence();
        if let Some(entry) = self.registry.get_mut(index) {
            entry.awaiting = false;
            entry.active = true;
            entry.reset_progress_pending = true;
            entry.activated_at = sequence;

            #[cfg(feature = "tracing")]
            {
                tracing::debug!(recognizer = %entry.recognizer.id(), "Activated");
            }
        }
        self.retain_awaiting();

        // Whoever waited for this recognizer to fail has lost.
        let waiters: Vec<usize> = self
            .awaiting
            .iter()
            .rev()
            .copied()
            .filter(|&w| self.should_wait_for(w, index))
            .collect();
        for waiter in waiters {
            self.clear_awaiting(waiter);
            self.force_cancel(waiter);
        }

        let losers: Vec<usize> = self
            .members
            .iter()
            .rev()
            .copied()
            .filter(|&other| other != index && self.should_be_cancelled_by(other, index))
            .collect();
        for loser in losers {
            self.clear_awaiting(loser);
            self.force_cancel(loser);
        }

        // A loser's waiter may have taken over and cancelled us in turn.
        let still_active = self
            .registry
            .get(index)
            .is_some_and(|e| e.active && matches!(e.state(), GestureState::Active | GestureState::End));
        if !still_active {
            return;
        }
        self.emit(index, GestureState::Active);
        if current == GestureState::End {
            self.emit(index, GestureState::End);
        }
    }

    /// Cancel `index` and make sure the host hears about it.
    pub(super) fn force_cancel(&mut self, index: usize) {
        let Some(entry) = self.registry.get_mut(index) else {
            return;
        };
        entry.recognizer.cancel();
        self.drain(index);
        self.clear_awaiting(index);
        // An `End` reached while awaiting was never reported; the host
        // learns that the gesture lost instead.
        let ended_unreported = self.registry.get(index).is_some_and(|e| {
            e.state() == GestureState::End && !e.active && !e.reported.is_finished()
        });
        if ended_unreported {
            self.emit(index, GestureState::Cancelled);
        }
    }

    /// Report `new` for `index` unless the host already knows.
    pub(super) fn emit(&mut self, index: usize, new: GestureState) {
        let Some(entry) = self.registry.get_mut(index) else {
            return;
        };
        if entry.reported == new {
            return;
        }
        let old = entry.reported;
        entry.reported = new;
        self.outbox.push(Notification::StateChange {
            recognizer: entry.recognizer.id(),
            new,
            old,
        });
    }

    fn is_awaiting_index(&self, index: usize) -> bool {
        self.registry.get(index).is_some_and(|e| e.awaiting)
    }

    pub(super) fn clear_awaiting(&mut self, index: usize) {
        if let Some(entry) = self.registry.get_mut(index) {
            entry.awaiting = false;
        }
        self.awaiting.retain(|&w| w != index);
    }

    fn retain_awaiting(&mut self) {
        let registry = &self.registry;
        self.awaiting
            .retain(|&w| registry.get(w).is_some_and(|e| e.awaiting));
    }

    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}
