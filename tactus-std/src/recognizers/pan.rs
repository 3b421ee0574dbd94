//! Continuous drag.
//!
//! A pan begins as soon as it sees its first event and activates once the
//! focal point has travelled far enough, either by distance or by leaving an
//! activation offset range. Translation is re-based whenever the pointer count
//! changes so adding or lifting a finger does not make it jump.

use super::{Anchor, InvalidConfig, focal_point, non_negative};
use tactus_core::{
    GestureCore, GestureState, MAX_POINTERS, Point, PointerAction, PointerEvent,
    RecognizerBehavior,
};

/// A one-axis threshold: crossed below `start` or above `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetRange {
    /// Lower threshold, usually negative.
    pub start: Option<f32>,
    /// Upper threshold, usually positive.
    pub end: Option<f32>,
}

impl OffsetRange {
    /// Crossed at `-limit` and `+limit`.
    pub fn symmetric(limit: f32) -> Self {
        Self {
            start: Some(-limit),
            end: Some(limit),
        }
    }

    /// Whether `value` lies beyond either threshold.
    pub fn is_crossed_by(&self, value: f32) -> bool {
        self.start.is_some_and(|start| value < start) || self.end.is_some_and(|end| value > end)
    }
}

/// Pan thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PanConfig {
    /// Travel needed to activate.
    pub min_dist: Option<f32>,
    /// Horizontal activation range.
    pub active_offset_x: Option<OffsetRange>,
    /// Vertical activation range.
    pub active_offset_y: Option<OffsetRange>,
    /// Horizontal failure range.
    pub fail_offset_x: Option<OffsetRange>,
    /// Vertical failure range.
    pub fail_offset_y: Option<OffsetRange>,
    /// Pointers needed to activate.
    pub min_pointers: usize,
    /// More pointers than this aborts the pan.
    pub max_pointers: usize,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            min_dist: Some(10.0),
            active_offset_x: None,
            active_offset_y: None,
            fail_offset_x: None,
            fail_offset_y: None,
            min_pointers: 1,
            max_pointers: MAX_POINTERS,
        }
    }
}

impl PanConfig {
    /// Set the activation distance; `None` relies on offsets only.
    #[must_use]
    pub fn min_dist(mut self, dist: Option<f32>) -> Self {
        self.min_dist = dist;
        self
    }

    /// Set the horizontal activation range.
    #[must_use]
    pub fn active_offset_x(mut self, range: OffsetRange) -> Self {
        self.active_offset_x = Some(range);
        self
    }

    /// Set the vertical activation range.
    #[must_use]
    pub fn active_offset_y(mut self, range: OffsetRange) -> Self {
        self.active_offset_y = Some(range);
        self
    }

    /// Set the horizontal failure range.
    #[must_use]
    pub fn fail_offset_x(mut self, range: OffsetRange) -> Self {
        self.fail_offset_x = Some(range);
        self
    }

    /// Set the vertical failure range.
    #[must_use]
    pub fn fail_offset_y(mut self, range: OffsetRange) -> Self {
        self.fail_offset_y = Some(range);
        self
    }

    /// Set the pointer count range.
    #[must_use]
    pub fn pointers(mut self, min: usize, max: usize) -> Self {
        self.min_pointers = min;
        self.max_pointers = max;
        self
    }
}

/// Recognizes a drag.
#[derive(Debug, Clone, Default)]
pub struct Pan {
    config: PanConfig,
    anchor: Anchor,
    velocity: Point,
    last_timestamp_ms: u64,
}

impl Pan {
    /// Create a pan with validated thresholds.
    pub fn new(config: PanConfig) -> Result<Self, InvalidConfig> {
        if config.min_pointers == 0 {
            return Err(InvalidConfig::ZeroPointers {
                field: "min_pointers",
            });
        }
        if config.min_pointers > config.max_pointers {
            return Err(InvalidConfig::PointerRange {
                min: config.min_pointers,
                max: config.max_pointers,
            });
        }
        non_negative("min_dist", config.min_dist)?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The thresholds in use.
    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    /// Travel of the focal point since the pan started.
    pub fn translation(&self) -> Point {
        self.anchor.translation()
    }

    /// Focal point velocity in units per second.
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    fn should_activate(&self) -> bool {
        let t = self.translation();
        let c = &self.config;
        c.active_offset_x.is_some_and(|r| r.is_crossed_by(t.x))
            || c.active_offset_y.is_some_and(|r| r.is_crossed_by(t.y))
            || c.min_dist.is_some_and(|d| t.x * t.x + t.y * t.y >= d * d)
    }

    fn should_fail(&self) -> bool {
        let t = self.translation();
        let c = &self.config;
        c.fail_offset_x.is_some_and(|r| r.is_crossed_by(t.x))
            || c.fail_offset_y.is_some_and(|r| r.is_crossed_by(t.y))
    }

    fn track_velocity(&mut self, at: Point, timestamp_ms: u64) {
        let last = self.anchor.last();
        let dt = timestamp_ms.saturating_sub(self.last_timestamp_ms);
        if dt > 0 {
            let scale = 1000.0 / dt as f32;
            self.velocity = Point::new((at.x - last.x) * scale, (at.y - last.y) * scale);
        }
        self.last_timestamp_ms = timestamp_ms;
    }
}

impl RecognizerBehavior for Pan {
    fn kind(&self) -> &'static str {
        "pan"
    }

    fn on_handle(&mut self, core: &mut GestureCore, event: &PointerEvent) {
        let Some(focal) = focal_point(event) else {
            return;
        };
        let state = core.state();
        let remaining = match event.action {
            PointerAction::PointerUp | PointerAction::Up => event.pointer_count() - 1,
            _ => event.pointer_count(),
        };

        if state == GestureState::Undetermined {
            self.anchor.start(focal);
            self.velocity = Point::default();
            self.last_timestamp_ms = event.timestamp_ms;
            core.begin();
        }

        match event.action {
            PointerAction::PointerDown | PointerAction::PointerUp => {
                self.anchor.rebase(focal);
                self.last_timestamp_ms = event.timestamp_ms;
            }
            _ => {
                self.track_velocity(focal, event.timestamp_ms);
                self.anchor.update(focal);
            }
        }

        if event.action == PointerAction::PointerDown && remaining > self.config.max_pointers {
            if core.state() == GestureState::Active {
                core.cancel();
            } else {
                core.fail();
            }
            return;
        }

        if event.action == PointerAction::PointerUp
            && core.state() == GestureState::Active
            && remaining < self.config.min_pointers
        {
            core.fail();
            return;
        }

        if event.action == PointerAction::Up {
            if core.state() == GestureState::Active {
                core.end();
            } else {
                core.fail();
            }
            return;
        }

        if core.state() == GestureState::Began {
            if self.should_fail() {
                core.fail();
            } else if remaining >= self.config.min_pointers && self.should_activate() {
                core.activate();
            }
        }
    }

    fn on_reset(&mut self) {
        self.anchor = Anchor::default();
        self.velocity = Point::default();
        self.last_timestamp_ms = 0;
    }

    fn reset_progress(&mut self, _core: &GestureCore) {
        self.anchor.restart();
    }
}
