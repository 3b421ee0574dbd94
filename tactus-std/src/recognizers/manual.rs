//! Host-driven gesture.

use tactus_core::{GestureCore, GestureState, PointerEvent, RecognizerBehavior};

/// Begins on its first event; every other transition comes from the host
/// through the orchestrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manual;

impl RecognizerBehavior for Manual {
    fn kind(&self) -> &'static str {
        "manual"
    }

    fn on_handle(&mut self, core: &mut GestureCore, _event: &PointerEvent) {
        if core.state() == GestureState::Undetermined {
            core.begin();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::harness::{FRAME, one, tracked};
    use tactus_core::PointerAction;

    #[test]
    fn only_begins_by_itself() {
        let mut r = tracked(Manual, &[0]);
        r.handle(&one(PointerAction::Down, 1.0, 1.0, 0), FRAME);
        r.handle(&one(PointerAction::Move, 300.0, 1.0, 10), FRAME);
        r.handle(&one(PointerAction::Up, 300.0, 1.0, 20), FRAME);
        assert_eq!(r.state(), GestureState::Began);
    }
}
