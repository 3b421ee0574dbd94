//! The touch-target collaborator.
//!
//! Tactus never lays out or owns views. The host hands the orchestrator a
//! [`TargetTree`] on every dispatch, and the orchestrator only asks it
//! membership questions.

use crate::geometry::Rect;
use std::fmt;

/// Identifies one touch target in the host's view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target:{}", self.0)
    }
}

/// Hit-testing interface supplied by the host.
///
/// All coordinates are window coordinates. Implementations must be pure
/// functions of the current geometry.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a `TargetTree`",
    label = "missing `TargetTree` implementation",
    note = "Implement `hit_path` and `frame` to let the orchestrator hit-test targets."
)]
pub trait TargetTree {
    /// Targets under `(x, y)`, topmost first.
    fn hit_path(&self, x: f32, y: f32) -> Vec<TargetId>;

    /// The frame of `target`, or `None` when it is no longer in the tree.
    fn frame(&self, target: TargetId) -> Option<Rect>;

    /// Whether `(x, y)` is inside `target`.
    fn contains(&self, target: TargetId, x: f32, y: f32) -> bool {
        self.frame(target).is_some_and(|frame| frame.contains(x, y))
    }
}

impl<T: TargetTree + ?Sized> TargetTree for &T {
    fn hit_path(&self, x: f32, y: f32) -> Vec<TargetId> {
        (**self).hit_path(x, y)
    }

    fn frame(&self, target: TargetId) -> Option<Rect> {
        (**self).frame(target)
    }

    fn contains(&self, target: TargetId, x: f32, y: f32) -> bool {
        (**self).contains(target, x, y)
    }
}
