//! # tactus - Gesture Recognition and Arbitration
//!
//! `tactus` turns a raw stream of pointer events into gesture state changes.
//! Any number of recognizers may be attached to the targets of a host's view
//! tree; the [`Orchestrator`] decides which of them take part in an
//! interaction, feeds them events, and arbitrates when several of them want
//! the same pointers.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tactus::prelude::*;
//!
//! let mut tree = FrameTree::new();
//! tree.insert(TargetId(1), Rect::from_origin_size(0.0, 0.0, 300.0, 300.0));
//!
//! let mut orchestrator = Orchestrator::new();
//! let pan = Behavior::from(Pan::new(PanConfig::default())?);
//! orchestrator.attach(pan.into_recognizer(RecognizerId(1)), TargetId(1))?;
//!
//! let mut touches = TouchSequence::new();
//! orchestrator.dispatch(&tree, &touches.down(0, 10.0, 10.0));
//! let notifications = orchestrator.dispatch(&tree, &touches.move_to(0, 60.0, 10.0));
//! ```
//!
//! ## Layers
//!
//! - [`tactus_core`]: state machine, events, pointer tracking, policies
//! - [`tactus_std`]: concrete recognizers, relation policies, sinks
//! - this crate: the orchestrator

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use tactus_core::{
    AttachError,
    ConfigError,
    GestureCore,
    GestureRecognizer,
    // State machine
    GestureState,
    HitSlop,
    HitSlopConfig,
    // Arbitration
    InteractionPolicy,
    MAX_POINTERS,
    // Notifications
    Notification,
    NotificationSink,
    Peer,
    Point,
    // Events
    Pointer,
    PointerAction,
    PointerEvent,
    PointerId,
    PointerTracker,
    Rect,
    RecognizerBehavior,
    RecognizerId,
    SinkFn,
    // Errors
    TactusError,
    // Targets
    TargetId,
    TargetTree,
    Transition,
};

pub use tactus_std::{Behavior, InvalidConfig, LoggingSink, RelationPolicy, Simultaneous};

pub mod orchestrator;

pub use orchestrator::{Orchestrator, RecognizerHandle};

/// Concrete recognizers.
pub mod recognizers {
    #![allow(clippy::wildcard_imports)]
    pub use tactus_std::recognizers::*;
}

/// Interaction policies.
pub mod policies {
    #![allow(clippy::wildcard_imports)]
    pub use tactus_std::policies::*;
}

/// Notification sinks.
pub mod sinks {
    #![allow(clippy::wildcard_imports)]
    pub use tactus_std::sinks::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use tactus_std::testing::*;
}

/// Prelude module - common imports for Tactus.
///
/// # Usage
///
/// ```rust,ignore
/// use tactus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Behavior,
        GestureRecognizer,
        GestureState,
        HitSlop,
        InteractionPolicy,
        Notification,
        NotificationSink,
        Orchestrator,
        Peer,
        PointerAction,
        PointerEvent,
        RecognizerBehavior,
        RecognizerHandle,
        RecognizerId,
        Rect,
        RelationPolicy,
        TargetId,
        TargetTree,
        recognizers::{
            Fling, FlingConfig, LongPress, LongPressConfig, Pan, PanConfig, Pinch, PinchConfig,
            Rotation, RotationConfig, Tap, TapConfig,
        },
        testing::{FrameTree, TouchSequence},
    };
}
