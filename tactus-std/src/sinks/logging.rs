//! A sink that logs notifications on their way to the host.

use tactus_core::{Notification, NotificationSink};

/// A sink that logs every notification and forwards it.
///
/// It uses the `tracing` crate when the `tracing` feature is enabled and is a
/// plain passthrough otherwise.
///
/// # Example
///
/// ```rust,ignore
/// use tactus_std::sinks::LoggingSink;
///
/// let mut sink = LoggingSink::named("root_view", Vec::new());
/// orchestrator.dispatch_into(&tree, &event, &mut sink);
/// let notifications = sink.into_inner();
/// ```
#[derive(Debug, Clone)]
pub struct LoggingSink<S> {
    name: &'static str,
    inner: S,
}

impl<S> LoggingSink<S> {
    /// Wrap `inner` with the default name.
    pub fn new(inner: S) -> Self {
        Self {
            name: "gesture",
            inner,
        }
    }

    /// Wrap `inner`, labelling log lines with `name`.
    pub fn named(name: &'static str, inner: S) -> Self {
        Self { name, inner }
    }

    /// The wrapped sink.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the inner sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: NotificationSink> NotificationSink for LoggingSink<S> {
    fn notify(&mut self, notification: Notification) {
        #[cfg(feature = "tracing")]
        {
            match &notification {
                Notification::StateChange {
                    recognizer,
                    new,
                    old,
                } => {
                    tracing::debug!(name = %self.name, %recognizer, %old, %new, "State change");
                }
                Notification::Touch { recognizer, event } => {
                    tracing::trace!(name = %self.name, %recognizer, action = ?event.action, "Touch");
                }
                Notification::Update { recognizer, event } => {
                    tracing::trace!(name = %self.name, %recognizer, action = ?event.action, "Update");
                }
            }
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = self.name;
        }

        self.inner.notify(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactus_core::{GestureState, RecognizerId};

    #[test]
    fn forwards_everything_in_order() {
        let mut sink = LoggingSink::named("test", Vec::new());
        for id in 0..3 {
            sink.notify(Notification::StateChange {
                recognizer: RecognizerId(id),
                new: GestureState::Began,
                old: GestureState::Undetermined,
            });
        }
        let ids: Vec<_> = sink.into_inner().iter().map(|n| n.recognizer()).collect();
        assert_eq!(ids, vec![RecognizerId(0), RecognizerId(1), RecognizerId(2)]);
    }
}
