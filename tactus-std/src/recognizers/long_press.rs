//! Press and hold.
//!
//! There is no timer at this layer: activation happens on the first event
//! that arrives at or after `min_duration_ms`, so hosts that want a timely
//! activation feed periodic move events while the finger rests.

use super::{InvalidConfig, focal_point, non_negative};
use tactus_core::{GestureCore, GestureState, Point, PointerAction, PointerEvent, RecognizerBehavior};

/// Long-press limits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LongPressConfig {
    /// Hold time needed to activate.
    pub min_duration_ms: u64,
    /// Travel allowed while holding.
    pub max_dist: f32,
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 500,
            max_dist: 10.0,
        }
    }
}

impl LongPressConfig {
    /// Set the hold time.
    #[must_use]
    pub fn min_duration_ms(mut self, ms: u64) -> Self {
        self.min_duration_ms = ms;
        self
    }

    /// Set the allowed travel.
    #[must_use]
    pub fn max_dist(mut self, dist: f32) -> Self {
        self.max_dist = dist;
        self
    }
}

/// Recognizes a pointer held in place.
#[derive(Debug, Clone, Default)]
pub struct LongPress {
    config: LongPressConfig,
    start: Point,
    started_at: u64,
    held_ms: u64,
}

impl LongPress {
    /// Create a long press with validated limits.
    pub fn new(config: LongPressConfig) -> Result<Self, InvalidConfig> {
        non_negative("max_dist", Some(config.max_dist))?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The limits in use.
    pub fn config(&self) -> &LongPressConfig {
        &self.config
    }

    /// How long the pointer has been held so far.
    pub fn duration_ms(&self) -> u64 {
        self.held_ms
    }
}

impl RecognizerBehavior for LongPress {
    fn kind(&self) -> &'static str {
        "long_press"
    }

    fn on_handle(&mut self, core: &mut GestureCore, event: &PointerEvent) {
        let Some(focal) = focal_point(event) else {
            return;
        };

        if core.state() == GestureState::Undetermined {
            self.start = focal;
            self.started_at = event.timestamp_ms;
            core.begin();
        }
        self.held_ms = event.timestamp_ms.saturating_sub(self.started_at);

        let max = self.config.max_dist;
        if focal.distance_squared(self.start) > max * max {
            if core.state() == GestureState::Active {
                core.end();
            } else {
                core.fail();
            }
            return;
        }

        if self.held_ms >= self.config.min_duration_ms {
            core.activate();
        }

        if event.action == PointerAction::Up {
            if core.state() == GestureState::Active {
                core.end();
            } else {
                core.fail();
            }
        }
    }

    fn on_reset(&mut self) {
        self.start = Point::default();
        self.started_at = 0;
        self.held_ms = 0;
    }
}
