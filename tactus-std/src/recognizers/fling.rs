//! Quick directional swipe.

use super::{InvalidConfig, focal_point, non_negative};
use bitflags::bitflags;
use tactus_core::{GestureCore, GestureState, Point, PointerAction, PointerEvent, RecognizerBehavior};

bitflags! {
    /// Directions a fling may travel in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Directions: u8 {
        /// Towards increasing x.
        const RIGHT = 1;
        /// Towards decreasing x.
        const LEFT = 2;
        /// Towards decreasing y.
        const UP = 4;
        /// Towards increasing y.
        const DOWN = 8;
    }
}

/// Fling limits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FlingConfig {
    /// Accepted directions.
    pub directions: Directions,
    /// Travel needed along an accepted direction.
    pub min_distance: f32,
    /// Time allowed to cover `min_distance`.
    pub max_duration_ms: u64,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            directions: Directions::RIGHT,
            min_distance: 160.0,
            max_duration_ms: 800,
        }
    }
}

impl FlingConfig {
    /// Set the accepted directions.
    #[must_use]
    pub fn directions(mut self, directions: Directions) -> Self {
        self.directions = directions;
        self
    }

    /// Set the travel needed.
    #[must_use]
    pub fn min_distance(mut self, distance: f32) -> Self {
        self.min_distance = distance;
        self
    }

    /// Set the time allowed.
    #[must_use]
    pub fn max_duration_ms(mut self, ms: u64) -> Self {
        self.max_duration_ms = ms;
        self
    }
}

/// Recognizes a fast swipe in one of the accepted directions.
#[derive(Debug, Clone, Default)]
pub struct Fling {
    config: FlingConfig,
    start: Point,
    started_at: u64,
}

impl Fling {
    /// Create a fling with validated limits.
    pub fn new(config: FlingConfig) -> Result<Self, InvalidConfig> {
        non_negative("min_distance", Some(config.min_distance))?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The limits in use.
    pub fn config(&self) -> &FlingConfig {
        &self.config
    }

    fn travelled_far_enough(&self, at: Point) -> bool {
        let (dx, dy) = (at.x - self.start.x, at.y - self.start.y);
        let min = self.config.min_distance;
        let dirs = self.config.directions;
        (dirs.contains(Directions::RIGHT) && dx >= min)
            || (dirs.contains(Directions::LEFT) && -dx >= min)
            || (dirs.contains(Directions::UP) && -dy >= min)
            || (dirs.contains(Directions::DOWN) && dy >= min)
    }
}

impl RecognizerBehavior for Fling {
    fn kind(&self) -> &'static str {
        "fling"
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

        if event.timestamp_ms.saturating_sub(self.started_at) > self.config.max_duration_ms {
            core.fail();
            return;
        }

        if self.travelled_far_enough(focal) {
            core.activate();
            core.end();
        } else if event.action == PointerAction::Up {
            core.fail();
        }
    }

    fn on_reset(&mut self) {
        self.start = Point::default();
        self.started_at = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::harness::{FRAME, one, tracked};

    #[test]
    fn fast_swipe_in_allowed_direction_ends() {
        let config = FlingConfig::default().min_distance(100.0);
        let mut r = tracked(Fling::new(config).unwrap(), &[0]);
        r.handle(&one(PointerAction::Down, 0.0, 50.0, 0), FRAME);
        r.handle(&one(PointerAction::Move, 60.0, 50.0, 50), FRAME);
        assert_eq!(r.state(), GestureState::Began);
        r.handle(&one(PointerAction::Move, 120.0, 50.0, 100), FRAME);
        assert_eq!(r.state(), GestureState::End);
    }

    #[test]
    fn wrong_direction_fails_on_release() {
        let config = FlingConfig::default().min_distance(100.0);
        let mut r = tracked(Fling::new(config).unwrap(), &[0]);
        r.handle(&one(PointerAction::Down, 200.0, 50.0, 0), FRAME);
        r.handle(&one(PointerAction::Move, 50.0, 50.0, 50), FRAME);
        r.handle(&one(PointerAction::Up, 50.0, 50.0, 60), FRAME);
        assert_eq!(r.state(), GestureState::Failed);
    }

    #[test]
    fn combined_directions() {
        let config = FlingConfig::default()
            .directions(Directions::UP | Directions::DOWN)
            .min_distance(50.0);
        let mut r = tracked(Fling::new(config).unwrap(), &[0]);
        r.handle(&one(PointerAction::Down, 100.0, 200.0, 0), FRAME);
        r.handle(&one(PointerAction::Move, 100.0, 140.0, 40), FRAME);
        assert_eq!(r.state(), GestureState::End);
    }

    #[test]
    fn slow_swipe_fails() {
        let config = FlingConfig::default().min_distance(100.0);
        let mut r = tracked(Fling::new(config).unwrap(), &[0]);
        r.handle(&one(PointerAction::Down, 0.0, 50.0, 0), FRAME);
        r.handle(&one(PointerAction::Move, 150.0, 50.0, 900), FRAME);
        assert_eq!(r.state(), GestureState::Failed);
    }
}
