//! Passthrough for platform views that handle touches themselves.
//!
//! A native view recognizer mostly mirrors the pointer stream: it begins on
//! the first event, ends on the last pointer up, and forwards everything it
//! sees through `Touch` notifications. Whether other recognizers may take the
//! interaction away from it is controlled by `disallow_interruption`.

use super::focal_point;
use tactus_core::{GestureCore, GestureState, Peer, PointerAction, PointerEvent, RecognizerBehavior};

/// Kind of a native view that can be interrupted.
pub const NATIVE_KIND: &str = "native";
/// Kind of a native view that keeps the interaction once it has it.
pub const NATIVE_EXCLUSIVE_KIND: &str = "native_exclusive";

/// Native view options.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct NativeViewConfig {
    /// Activate on the first event instead of waiting for the view.
    pub should_activate_on_start: bool,
    /// Refuse cancellation by other recognizers while active.
    pub disallow_interruption: bool,
}

impl NativeViewConfig {
    /// Activate on the first event.
    #[must_use]
    pub fn activate_on_start(mut self, activate: bool) -> Self {
        self.should_activate_on_start = activate;
        self
    }

    /// Refuse cancellation by other recognizers.
    #[must_use]
    pub fn disallow_interruption(mut self, disallow: bool) -> Self {
        self.disallow_interruption = disallow;
        self
    }
}

/// Recognizer for a view with its own touch handling.
#[derive(Debug, Clone, Default)]
pub struct NativeView {
    config: NativeViewConfig,
}

impl NativeView {
    /// Create a native view recognizer.
    pub fn new(config: NativeViewConfig) -> Self {
        Self { config }
    }

    /// The options in use.
    pub fn config(&self) -> &NativeViewConfig {
        &self.config
    }
}

impl RecognizerBehavior for NativeView {
    fn kind(&self) -> &'static str {
        if self.config.disallow_interruption {
            NATIVE_EXCLUSIVE_KIND
        } else {
            NATIVE_KIND
        }
    }

    fn on_handle(&mut self, core: &mut GestureCore, event: &PointerEvent) {
        if focal_point(event).is_none() {
            return;
        }

        if core.state() == GestureState::Undetermined {
            core.begin();
            if self.config.should_activate_on_start {
                core.activate();
            }
        }

        if event.action == PointerAction::Up {
            core.end();
        }
    }

    fn should_recognize_simultaneously(&self, _this: &Peer, other: &Peer) -> bool {
        !self.config.disallow_interruption && other.kind == NATIVE_KIND
    }

    fn should_be_cancelled_by(&self, _this: &Peer, _other: &Peer) -> bool {
        !self.config.disallow_interruption
    }
}
