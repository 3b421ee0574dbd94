//! # Recognizer capability (RecognizerBehavior)
//!
//! A recognizer is a generic record ([`GestureCore`]) composed with a
//! behavior. The record owns the state machine, pointer tracking and bounds;
//! the behavior only reads adapted events and requests transitions on the
//! record it is handed.
//!
//! ```text
//! GestureRecognizer<B>
//!  ├─ GestureCore        state, tracker, slop, queued transitions
//!  └─ B: RecognizerBehavior
//!        on_handle(&mut core, &adapted_event)
//! ```

use crate::{event::PointerEvent, policy::Peer, recognizer::GestureCore};

/// Recognizer-specific logic plugged into a [`GestureCore`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `RecognizerBehavior`",
    label = "missing `RecognizerBehavior` implementation",
    note = "Implement `kind` and `on_handle`; the remaining hooks have defaults."
)]
pub trait RecognizerBehavior: Send + 'static {
    /// Short, stable name of the gesture kind, e.g. `"pan"`.
    fn kind(&self) -> &'static str;

    /// Process one adapted event. Transitions are requested on `core`.
    fn on_handle(&mut self, core: &mut GestureCore, event: &PointerEvent);

    /// Clear per-interaction progress.
    fn on_reset(&mut self) {}

    /// Called right before the recognizer is cancelled from outside.
    fn on_cancel(&mut self, core: &GestureCore) {
        let _ = core;
    }

    /// Re-base progress after a delayed activation so values do not jump.
    fn reset_progress(&mut self, core: &GestureCore) {
        let _ = core;
    }

    /// Behavior-level opt-in to simultaneous recognition with `other`.
    fn should_recognize_simultaneously(&self, this: &Peer, other: &Peer) -> bool {
        let _ = (this, other);
        false
    }

    /// Behavior-level opt-in to being cancelled by `other` while active.
    fn should_be_cancelled_by(&self, this: &Peer, other: &Peer) -> bool {
        let _ = (this, other);
        false
    }
}

impl RecognizerBehavior for Box<dyn RecognizerBehavior> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn on_handle(&mut self, core: &mut GestureCore, event: &PointerEvent) {
        (**self).on_handle(core, event)
    }

    fn on_reset(&mut self) {
        (**self).on_reset()
    }

    fn on_cancel(&mut self, core: &GestureCore) {
        (**self).on_cancel(core)
    }

    fn reset_progress(&mut self, core: &GestureCore) {
        (**self).reset_progress(core)
    }

    fn should_recognize_simultaneously(&self, this: &Peer, other: &Peer) -> bool {
        (**self).should_recognize_simultaneously(this, other)
    }

    fn should_be_cancelled_by(&self, this: &Peer, other: &Peer) -> bool {
        (**self).should_be_cancelled_by(this, other)
    }
}
