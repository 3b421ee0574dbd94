//! Two-pointer rotation.

use super::{InvalidConfig, non_negative, pointer_pair};
use std::f32::consts::{PI, TAU};
use tactus_core::{GestureCore, GestureState, Point, PointerAction, PointerEvent, RecognizerBehavior};

/// Rotation thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RotationConfig {
    /// Angle in radians needed to activate.
    pub min_rotation: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            min_rotation: PI / 36.0,
        }
    }
}

impl RotationConfig {
    /// Set the angle needed to activate.
    #[must_use]
    pub fn min_rotation(mut self, radians: f32) -> Self {
        self.min_rotation = radians;
        self
    }
}

/// Recognizes two pointers turning around their midpoint.
#[derive(Debug, Clone, Default)]
pub struct Rotation {
    config: RotationConfig,
    /// Angle of the pair on the previous event.
    last_angle: Option<f32>,
    rotation: f32,
    anchor: Point,
    velocity: f32,
    last_timestamp_ms: u64,
}

/// Fold an angle difference into `(-PI, PI]`.
fn wrap(delta: f32) -> f32 {
    let folded = (delta + PI).rem_euclid(TAU) - PI;
    if folded <= -PI { folded + TAU } else { folded }
}

impl Rotation {
    /// Create a rotation with validated thresholds.
    pub fn new(config: RotationConfig) -> Result<Self, InvalidConfig> {
        non_negative("min_rotation", Some(config.min_rotation))?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The thresholds in use.
    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Accumulated rotation in radians, clockwise in window coordinates.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Midpoint of the two pointers.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Radians per second.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    fn track(&mut self, angle: f32, timestamp_ms: u64) {
        let Some(last) = self.last_angle else {
            self.last_angle = Some(angle);
            return;
        };
        let delta = wrap(angle - last);
        let dt = timestamp_ms.saturating_sub(self.last_timestamp_ms);
        if dt > 0 {
            self.velocity = delta * 1000.0 / dt as f32;
        }
        self.rotation += delta;
        self.last_angle = Some(angle);
    }
}

impl RecognizerBehavior for Rotation {
    fn kind(&self) -> &'static str {
        "rotation"
    }

    fn on_handle(&mut self, core: &mut GestureCore, event: &PointerEvent) {
        if core.state() == GestureState::Undetermined {
            self.on_reset();
            self.last_timestamp_ms = event.timestamp_ms;
            core.begin();
        }

        let pair = pointer_pair(event);
        if event.action.is_up() && pair.is_none() {
            if core.state() == GestureState::Active {
                core.end();
            } else {
                core.fail();
            }
            return;
        }
        let Some((a, b)) = pair else {
            return;
        };

        let angle = (b.y - a.y).atan2(b.x - a.x);
        self.anchor = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        match event.action {
            // a different pair: keep the rotation, restart the reference
            PointerAction::PointerDown | PointerAction::PointerUp => self.last_angle = Some(angle),
            _ => self.track(angle, event.timestamp_ms),
        }
        self.last_timestamp_ms = event.timestamp_ms;

        if core.state() == GestureState::Began && self.rotation.abs() >= self.config.min_rotation {
            core.activate();
        }
    }

    fn on_reset(&mut self) {
        *self = Self {
            config: self.config,
            ..Self::default()
        };
    }

    fn reset_progress(&mut self, _core: &GestureCore) {
        self.rotation = 0.0;
        self.velocity = 0.0;
    }
}
