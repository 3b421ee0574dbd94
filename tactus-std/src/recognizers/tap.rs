//! Discrete tap.

use super::{Anchor, InvalidConfig, focal_point, non_negative};
use tactus_core::{GestureCore, GestureState, PointerAction, PointerEvent, RecognizerBehavior};

/// Tap limits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TapConfig {
    /// Longest allowed press.
    pub max_duration_ms: u64,
    /// Largest allowed travel from the start point.
    pub max_dist: Option<f32>,
    /// Largest allowed horizontal travel.
    pub max_delta_x: Option<f32>,
    /// Largest allowed vertical travel.
    pub max_delta_y: Option<f32>,
    /// Pointers that must have been down at once.
    pub min_pointers: usize,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            max_duration_ms: 500,
            max_dist: None,
            max_delta_x: None,
            max_delta_y: None,
            min_pointers: 1,
        }
    }
}

impl TapConfig {
    /// Set the longest allowed press.
    #[must_use]
    pub fn max_duration_ms(mut self, ms: u64) -> Self {
        self.max_duration_ms = ms;
        self
    }

    /// Set the largest allowed travel.
    #[must_use]
    pub fn max_dist(mut self, dist: f32) -> Self {
        self.max_dist = Some(dist);
        self
    }

    /// Set the largest allowed horizontal travel.
    #[must_use]
    pub fn max_delta_x(mut self, delta: f32) -> Self {
        self.max_delta_x = Some(delta);
        self
    }

    /// Set the largest allowed vertical travel.
    #[must_use]
    pub fn max_delta_y(mut self, delta: f32) -> Self {
        self.max_delta_y = Some(delta);
        self
    }

    /// Set the number of pointers required.
    #[must_use]
    pub fn min_pointers(mut self, count: usize) -> Self {
        self.min_pointers = count;
        self
    }
}

/// Recognizes a press that is released quickly without moving much.
///
/// Begins on the first event, activates and ends on the last pointer up.
#[derive(Debug, Clone, Default)]
pub struct Tap {
    config: TapConfig,
    anchor: Anchor,
    started_at: u64,
    max_pointers_seen: usize,
}

impl Tap {
    /// Create a tap with validated limits.
    pub fn new(config: TapConfig) -> Result<Self, InvalidConfig> {
        if config.min_pointers == 0 {
            return Err(InvalidConfig::ZeroPointers {
                field: "min_pointers",
            });
        }
        non_negative("max_dist", config.max_dist)?;
        non_negative("max_delta_x", config.max_delta_x)?;
        non_negative("max_delta_y", config.max_delta_y)?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The limits in use.
    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    fn moved_too_far(&self) -> bool {
        let t = self.anchor.translation();
        let c = &self.config;
        c.max_delta_x.is_some_and(|max| t.x.abs() > max)
            || c.max_delta_y.is_some_and(|max| t.y.abs() > max)
            || c.max_dist.is_some_and(|max| t.x * t.x + t.y * t.y > max * max)
    }
}

impl RecognizerBehavior for Tap {
    fn kind(&self) -> &'static str {
        "tap"
    }

    fn on_handle(&mut self, core: &mut GestureCore, event: &PointerEvent) {
        let Some(focal) = focal_point(event) else {
            return;
        };

        if core.state() == GestureState::Undetermined {
            self.anchor.start(focal);
            self.started_at = event.timestamp_ms;
            core.begin();
        }
        self.max_pointers_seen = self.max_pointers_seen.max(event.pointer_count());

        match event.action {
            PointerAction::PointerDown | PointerAction::PointerUp => self.anchor.rebase(focal),
            _ => self.anchor.update(focal),
        }

        let held = event.timestamp_ms.saturating_sub(self.started_at);
        if self.moved_too_far() || held > self.config.max_duration_ms {
            core.fail();
            return;
        }

        if event.action == PointerAction::Up {
            if self.max_pointers_seen >= self.config.min_pointers {
                core.activate();
                core.end();
            } else {
                core.fail();
            }
        }
    }

    fn on_reset(&mut self) {
        self.anchor = Anchor::default();
        self.started_at = 0;
        self.max_pointers_seen = 0;
    }
}
