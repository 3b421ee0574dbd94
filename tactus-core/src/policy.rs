//! # Arbitration predicates (InteractionPolicy)
//!
//! An [`InteractionPolicy`] describes relationships between two recognizers.
//! It never owns recognizers and never changes state: the orchestrator asks
//! it yes/no questions at its decision points and acts on the answers.
//!
//! Every predicate defaults to `false`. Mutual exclusivity between recognizers
//! sharing a pointer is enforced by the orchestrator regardless of policy.

use crate::{recognizer::RecognizerId, state::GestureState, target::TargetId};

/// Read-only snapshot of a recognizer, handed to policies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peer {
    /// Host-assigned id.
    pub id: RecognizerId,
    /// Behavior kind, e.g. `"tap"`.
    pub kind: &'static str,
    /// Current state.
    pub state: GestureState,
    /// Target the recognizer is attached to.
    pub target: TargetId,
}

/// Relationships between a recognizer (`this`) and another (`other`).
///
/// # Example
///
/// ```rust,ignore
/// struct PinchWithRotation;
///
/// impl InteractionPolicy for PinchWithRotation {
///     fn should_recognize_simultaneously(&self, _this: &Peer, other: &Peer) -> bool {
///         other.kind == "rotation"
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `InteractionPolicy`",
    label = "missing `InteractionPolicy` implementation",
    note = "Policies only need to override the predicates they care about."
)]
pub trait InteractionPolicy: Send + Sync + 'static {
    /// `this` and `other` may both be active at the same time.
    fn should_recognize_simultaneously(&self, this: &Peer, other: &Peer) -> bool {
        let _ = (this, other);
        false
    }

    /// `this` must wait for `other` to fail before it may activate.
    fn should_wait_for_failure(&self, this: &Peer, other: &Peer) -> bool {
        let _ = (this, other);
        false
    }

    /// `other` must wait for `this` to fail before it may activate.
    fn should_require_other_to_wait_for_failure(&self, this: &Peer, other: &Peer) -> bool {
        let _ = (this, other);
        false
    }

    /// `this` should be cancelled when `other` activates, even while active.
    fn should_be_cancelled_by(&self, this: &Peer, other: &Peer) -> bool {
        let _ = (this, other);
        false
    }
}
