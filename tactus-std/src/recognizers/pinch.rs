//! Two-pointer scale.
//!
//! Scale is the ratio between the current and the starting distance of the
//! two lowest slots. When the pointer set changes the ratio is re-based, so
//! the scale stays continuous while fingers come and go.

use super::{InvalidConfig, non_negative, pointer_pair};
use tactus_core::{GestureCore, GestureState, Point, PointerAction, PointerEvent, RecognizerBehavior};

/// Pinch thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PinchConfig {
    /// Change in pointer distance needed to activate.
    pub min_span_delta: f32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            min_span_delta: 10.0,
        }
    }
}

impl PinchConfig {
    /// Set the span change needed to activate.
    #[must_use]
    pub fn min_span_delta(mut self, delta: f32) -> Self {
        self.min_span_delta = delta;
        self
    }
}

/// Recognizes two pointers moving apart or together.
#[derive(Debug, Clone)]
pub struct Pinch {
    config: PinchConfig,
    /// Scale carried over from before the last re-base.
    base_scale: f32,
    start_span: Option<f32>,
    span: f32,
    scale: f32,
    focal: Point,
    velocity: f32,
    last_timestamp_ms: u64,
}

impl Default for Pinch {
    fn default() -> Self {
        Self {
            config: PinchConfig::default(),
            base_scale: 1.0,
            start_span: None,
            span: 0.0,
            scale: 1.0,
            focal: Point::default(),
            velocity: 0.0,
            last_timestamp_ms: 0,
        }
    }
}

impl Pinch {
    /// Create a pinch with validated thresholds.
    pub fn new(config: PinchConfig) -> Result<Self, InvalidConfig> {
        non_negative("min_span_delta", Some(config.min_span_delta))?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The thresholds in use.
    pub fn config(&self) -> &PinchConfig {
        &self.config
    }

    /// Current scale; 1.0 until the pointers move.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Midpoint of the two pointers.
    pub fn focal_point(&self) -> Point {
        self.focal
    }

    /// Scale change per second.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    fn rebase(&mut self, span: f32) {
        self.base_scale = self.scale;
        self.start_span = Some(span);
        self.span = span;
    }

    fn track(&mut self, span: f32, timestamp_ms: u64) {
        let Some(start) = self.start_span.filter(|s| *s > 0.0) else {
            self.rebase(span);
            return;
        };
        let scale = self.base_scale * span / start;
        let dt = timestamp_ms.saturating_sub(self.last_timestamp_ms);
        if dt > 0 {
            self.velocity = (scale - self.scale) * 1000.0 / dt as f32;
        }
        self.span = span;
        self.scale = scale;
    }

    fn moved_enough(&self) -> bool {
        self.start_span
            .is_some_and(|start| (self.span - start).abs() >= self.config.min_span_delta)
            || (self.base_scale - 1.0).abs() > f32::EPSILON
    }
}

impl RecognizerBehavior for Pinch {
    fn kind(&self) -> &'static str {
        "pinch"
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

        let span = a.distance_squared(b).sqrt();
        self.focal = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        match event.action {
            PointerAction::PointerDown | PointerAction::PointerUp => self.rebase(span),
            _ => self.track(span, event.timestamp_ms),
        }
        self.last_timestamp_ms = event.timestamp_ms;

        if core.state() == GestureState::Began && self.moved_enough() {
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
        self.scale = 1.0;
        self.base_scale = 1.0;
        self.velocity = 0.0;
        self.start_span = Some(self.span);
    }
}
