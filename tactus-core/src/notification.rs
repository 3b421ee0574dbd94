//! Outbound notifications.
//!
//! The core never calls back into the host. Everything observable is queued
//! as a [`Notification`] and handed to a [`NotificationSink`] the host picks:
//! a `Vec`, a channel, or a closure wrapped in [`SinkFn`].

use crate::{event::PointerEvent, recognizer::RecognizerId, state::GestureState};
use std::sync::mpsc;

/// Something the host may want to know about.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    /// A recognizer changed state.
    StateChange {
        /// Recognizer id.
        recognizer: RecognizerId,
        /// State entered.
        new: GestureState,
        /// State left, as previously reported.
        old: GestureState,
    },
    /// Adapted pointer data for a recognizer that asked for it.
    Touch {
        /// Recognizer id.
        recognizer: RecognizerId,
        /// The event in the recognizer's slot space.
        event: PointerEvent,
    },
    /// An active recognizer processed an event.
    Update {
        /// Recognizer id.
        recognizer: RecognizerId,
        /// The event in the recognizer's slot space.
        event: PointerEvent,
    },
}

impl Notification {
    /// The recognizer this notification is about.
    pub fn recognizer(&self) -> RecognizerId {
        match self {
            Self::StateChange { recognizer, .. }
            | Self::Touch { recognizer, .. }
            | Self::Update { recognizer, .. } => *recognizer,
        }
    }

    /// `(new, old)` for state changes.
    pub fn as_state_change(&self) -> Option<(GestureState, GestureState)> {
        match self {
            Self::StateChange { new, old, .. } => Some((*new, *old)),
            _ => None,
        }
    }
}

/// Receives notifications in the order they were produced.
pub trait NotificationSink {
    /// Accept one notification.
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

impl NotificationSink for mpsc::Sender<Notification> {
    fn notify(&mut self, notification: Notification) {
        // a dropped receiver means nobody is listening anymore
        let _ = self.send(notification);
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Adapts a closure into a [`NotificationSink`].
///
/// ```rust,ignore
/// let mut log = SinkFn(|n: Notification| println!("{n:?}"));
/// orchestrator.dispatch_into(&tree, &event, &mut log);
/// ```
pub struct SinkFn<F>(pub F);

impl<F: FnMut(Notification)> NotificationSink for SinkFn<F> {
    fn notify(&mut self, notification: Notification) {
        (self.0)(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(id: u32) -> Notification {
        Notification::StateChange {
            recognizer: RecognizerId(id),
            new: GestureState::Began,
            old: GestureState::Undetermined,
        }
    }

    #[test]
    fn channel_sink_forwards_and_ignores_closed_receivers() {
        let (mut tx, rx) = mpsc::channel();
        tx.notify(change(1));
        assert_eq!(rx.recv().unwrap().recognizer(), RecognizerId(1));
        drop(rx);
        tx.notify(change(2));
    }

    #[test]
    fn closure_sink_sees_every_notification() {
        let mut seen = Vec::new();
        {
            let mut sink = SinkFn(|n: Notification| seen.push(n.recognizer()));
            sink.notify(change(3));
            sink.notify(change(4));
        }
        assert_eq!(seen, vec![RecognizerId(3), RecognizerId(4)]);
    }
}
