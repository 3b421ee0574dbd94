//! Gesture states and transitions.

use std::fmt;

/// The state of a single recognizer within one interaction.
///
/// `Cancelled`, `Failed` and `End` are terminal: nothing leaves them until the
/// recognizer is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureState {
    /// Nothing has been recognized yet.
    #[default]
    Undetermined,
    /// A plausible start was observed.
    Began,
    /// The recognizer is certain and owns the interaction.
    Active,
    /// Aborted from outside.
    Cancelled,
    /// The input did not match the gesture.
    Failed,
    /// Completed naturally.
    End,
}

impl GestureState {
    /// Whether this state is terminal.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Cancelled | Self::Failed | Self::End)
    }

    /// Whether a guarded transition from `self` to `next` is legal.
    pub const fn can_transition_to(self, next: Self) -> bool {
        match next {
            Self::Undetermined => false,
            Self::Began => matches!(self, Self::Undetermined),
            Self::Active => matches!(self, Self::Undetermined | Self::Began),
            Self::Cancelled | Self::Failed => {
                matches!(self, Self::Undetermined | Self::Began | Self::Active)
            }
            Self::End => matches!(self, Self::Began | Self::Active),
        }
    }

    /// Upper-case name, as used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undetermined => "UNDETERMINED",
            Self::Began => "BEGAN",
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
            Self::End => "END",
        }
    }
}

impl fmt::Display for GestureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One effective state change of a recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The state entered.
    pub new: GestureState,
    /// The state left.
    pub old: GestureState,
}

#[cfg(test)]
mod tests {
    use super::GestureState::*;

    #[test]
    fn terminal_states_are_dead_ends() {
        for from in [Cancelled, Failed, End] {
            assert!(from.is_finished());
            for to in [Undetermined, Began, Active, Cancelled, Failed, End] {
                assert!(!from.can_transition_to(to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn end_requires_a_start() {
        assert!(!Undetermined.can_transition_to(End));
        assert!(Began.can_transition_to(End));
        assert!(Active.can_transition_to(End));
    }

    #[test]
    fn activation_may_skip_began() {
        assert!(Undetermined.can_transition_to(Active));
        assert!(!Active.can_transition_to(Began));
    }
}
