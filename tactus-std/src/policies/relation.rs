//! Relationships declared by recognizer id.

use std::collections::HashSet;
use tactus_core::{InteractionPolicy, Peer, RecognizerId};

/// A policy built from explicit id sets.
///
/// Each set is read from the point of view of the recognizer that owns the
/// policy (`this`).
///
/// # Example
///
/// ```rust,ignore
/// // the single tap waits for the double tap to fail,
/// // and may run alongside the pinch
/// let policy = RelationPolicy::builder()
///     .wait_for(DOUBLE_TAP)
///     .simultaneous_with(PINCH)
///     .build();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationPolicy {
    simultaneous_with: HashSet<RecognizerId>,
    wait_for: HashSet<RecognizerId>,
    blocks: HashSet<RecognizerId>,
    cancelled_by: HashSet<RecognizerId>,
}

impl RelationPolicy {
    /// Start building a policy.
    pub fn builder() -> RelationPolicyBuilder {
        RelationPolicyBuilder::default()
    }

    /// Recognizers allowed to be active together with `this`.
    pub fn simultaneous_with(&self) -> &HashSet<RecognizerId> {
        &self.simultaneous_with
    }

    /// Recognizers `this` waits on.
    pub fn wait_for(&self) -> &HashSet<RecognizerId> {
        &self.wait_for
    }

    /// Recognizers that must wait on `this`.
    pub fn blocks(&self) -> &HashSet<RecognizerId> {
        &self.blocks
    }

    /// Recognizers whose activation cancels `this` even while it is active.
    pub fn cancelled_by(&self) -> &HashSet<RecognizerId> {
        &self.cancelled_by
    }
}

impl InteractionPolicy for RelationPolicy {
    fn should_recognize_simultaneously(&self, _this: &Peer, other: &Peer) -> bool {
        self.simultaneous_with.contains(&other.id)
    }

    fn should_wait_for_failure(&self, _this: &Peer, other: &Peer) -> bool {
        self.wait_for.contains(&other.id)
    }

    fn should_require_other_to_wait_for_failure(&self, _this: &Peer, other: &Peer) -> bool {
        self.blocks.contains(&other.id)
    }

    fn should_be_cancelled_by(&self, _this: &Peer, other: &Peer) -> bool {
        self.cancelled_by.contains(&other.id)
    }
}

/// Builder for [`RelationPolicy`].
#[derive(Debug, Clone, Default)]
pub struct RelationPolicyBuilder {
    policy: RelationPolicy,
}

impl RelationPolicyBuilder {
    /// Allow `other` to be active together with this recognizer.
    #[must_use]
    pub fn simultaneous_with(mut self, other: RecognizerId) -> Self {
        self.policy.simultaneous_with.insert(other);
        self
    }

    /// Make this recognizer wait for `other` to fail.
    #[must_use]
    pub fn wait_for(mut self, other: RecognizerId) -> Self {
        self.policy.wait_for.insert(other);
        self
    }

    /// Make `other` wait for this recognizer to fail.
    #[must_use]
    pub fn blocks(mut self, other: RecognizerId) -> Self {
        self.policy.blocks.insert(other);
        self
    }

    /// Let `other` cancel this recognizer even once it is active.
    #[must_use]
    pub fn cancelled_by(mut self, other: RecognizerId) -> Self {
        self.policy.cancelled_by.insert(other);
        self
    }

    /// Finish building.
    pub fn build(self) -> RelationPolicy {
        self.policy
    }
}
