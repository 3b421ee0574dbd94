//! # tactus-core
//!
//! Core types and traits for the Tactus gesture arbitration engine.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that implements its own recognizers or policies without pulling in the
//! standard set from `tactus-std` or the orchestrator from `tactus`.
//!
//! # Layers
//!
//! ## Layer 1: Pointer events ([`PointerEvent`], [`PointerTracker`])
//!
//! Raw events from the platform input pipeline, and the per-recognizer
//! virtualization that renames sparse pointer ids into dense slots.
//!
//! ## Layer 2: Recognizer record ([`GestureRecognizer`])
//!
//! The guarded state machine shared by every gesture, with hit-slop aware
//! bounds tracking. Effective transitions are queued, never dispatched.
//!
//! - **Guarded**: an illegal or repeated transition is a silent no-op
//! - **Composed**: gesture logic lives in a [`RecognizerBehavior`]
//!
//! ## Layer 3: Relationships ([`InteractionPolicy`])
//!
//! Pure predicates over pairs of recognizers, consulted by the orchestrator
//! at its decision points.
//!
//! ## Layer 4: Output ([`Notification`], [`NotificationSink`])
//!
//! Everything the host can observe, delivered through a sink of its choice.
//!
//! # Error Types
//!
//! - [`TactusError`] - Top-level error type
//! - [`ConfigError`] - Rejected recognizer configuration
//! - [`AttachError`] - Rejected attach

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod behavior;
mod error;
mod event;
mod geometry;
mod hit_slop;
mod notification;
mod pointer;
mod policy;
mod recognizer;
mod state;
mod target;

// Re-exports
pub use behavior::RecognizerBehavior;
pub use error::{AttachError, ConfigError, TactusError};
pub use event::{Pointer, PointerAction, PointerEvent, PointerId};
pub use geometry::{Point, Rect};
pub use hit_slop::{HitSlop, HitSlopConfig};
pub use notification::{Notification, NotificationSink, SinkFn};
pub use pointer::{MAX_POINTERS, PointerTracker};
pub use policy::{InteractionPolicy, Peer};
pub use recognizer::{GestureCore, GestureRecognizer, RecognizerId};
pub use state::{GestureState, Transition};
pub use target::{TargetId, TargetTree};
