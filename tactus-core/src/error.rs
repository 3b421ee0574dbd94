//! Error types for Tactus.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`TactusError`] - Top-level error type for all Tactus operations
//! - [`ConfigError`] - A recognizer configuration was rejected
//! - [`AttachError`] - A recognizer could not join an orchestrator
//!
//! Runtime ambiguity never shows up here: while events are being dispatched,
//! everything resolves through the state machine (`Failed` / `Cancelled`).

use crate::recognizer::RecognizerId;
use thiserror::Error;

/// Top-level error type for all Tactus operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TactusError {
    /// A configuration value was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A recognizer could not be attached.
    #[error("attach error: {0}")]
    Attach(#[from] AttachError),
}

/// Errors raised while configuring a recognizer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Left, right and width were all given.
    #[error("hit slop cannot define left, right and width at the same time")]
    HitSlopWidthOverconstrained,

    /// Width was given without a left or right pad to anchor it.
    #[error("hit slop width needs one of left or right to be defined")]
    HitSlopWidthUnanchored,

    /// Top, bottom and height were all given.
    #[error("hit slop cannot define top, bottom and height at the same time")]
    HitSlopHeightOverconstrained,

    /// Height was given without a top or bottom pad to anchor it.
    #[error("hit slop height needs one of top or bottom to be defined")]
    HitSlopHeightUnanchored,

    /// A pointer capacity outside `1..=max` was requested.
    #[error("pointer capacity must be between 1 and {max}, got {requested}")]
    InvalidPointerCapacity {
        /// The requested capacity.
        requested: usize,
        /// The platform maximum.
        max: usize,
    },
}

/// Errors that can occur when attaching a recognizer to an orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttachError {
    /// Another attached recognizer already uses this id.
    #[error("recognizer {0} is already attached")]
    DuplicateId(RecognizerId),

    /// The wait-for-failure relation would contain a cycle.
    #[error("wait-for-failure cycle: {}", render_path(.path))]
    WaitForFailureCycle {
        /// Recognizers along the cycle; the first one waits for the second, and so on.
        path: Vec<RecognizerId>,
    },
}

fn render_path(path: &[RecognizerId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
