//! Blanket simultaneity.

use tactus_core::{InteractionPolicy, Peer};

/// Recognizes simultaneously with every other recognizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simultaneous;

impl InteractionPolicy for Simultaneous {
    fn should_recognize_simultaneously(&self, _this: &Peer, _other: &Peer) -> bool {
        true
    }
}
