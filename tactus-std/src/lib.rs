//! # tactus-std
//!
//! Standard implementations for the Tactus gesture arbitration engine.
//!
//! This crate provides:
//! - **Recognizers**: [`Behavior`] over tap, pan, long press, pinch, rotation,
//!   fling, native view and manual gestures
//! - **Policies**: [`RelationPolicy`], [`Simultaneous`]
//! - **Sinks**: [`LoggingSink`]
//! - **Testing**: frame trees, touch sequences and scripted behaviors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use tactus_core;

// Modules
pub mod policies;
pub mod recognizers;
pub mod sinks;
pub mod testing;

pub use policies::{RelationPolicy, Simultaneous};
pub use recognizers::{Behavior, InvalidConfig};
pub use sinks::LoggingSink;
