//! Hit-slop: padding applied to a target's frame for touch membership only.
//!
//! A [`HitSlop`] can only be obtained through validation, so a contradictory
//! combination is rejected when the recognizer is configured rather than when
//! events arrive.
//!
//! ```rust,ignore
//! // 20 units of extra room on every side
//! let slop = HitSlop::uniform(20.0);
//!
//! // a 48 wide region hanging off the left edge
//! let slop = HitSlop::builder().left(0.0).width(48.0).build()?;
//! ```

use crate::{error::ConfigError, geometry::Rect};

/// Unvalidated hit-slop values.
///
/// This is the configuration-layer shape (optionally deserializable);
/// convert it with [`HitSlopConfig::build`] or `HitSlop::try_from`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HitSlopConfig {
    /// Extra room to the left of the frame.
    pub left: Option<f32>,
    /// Extra room above the frame.
    pub top: Option<f32>,
    /// Extra room to the right of the frame.
    pub right: Option<f32>,
    /// Extra room below the frame.
    pub bottom: Option<f32>,
    /// Total width, anchored on whichever of left/right is given.
    pub width: Option<f32>,
    /// Total height, anchored on whichever of top/bottom is given.
    pub height: Option<f32>,
}

impl HitSlopConfig {
    /// Set the left pad.
    #[must_use]
    pub fn left(mut self, pad: f32) -> Self {
        self.left = Some(pad);
        self
    }

    /// Set the top pad.
    #[must_use]
    pub fn top(mut self, pad: f32) -> Self {
        self.top = Some(pad);
        self
    }

    /// Set the right pad.
    #[must_use]
    pub fn right(mut self, pad: f32) -> Self {
        self.right = Some(pad);
        self
    }

    /// Set the bottom pad.
    #[must_use]
    pub fn bottom(mut self, pad: f32) -> Self {
        self.bottom = Some(pad);
        self
    }

    /// Set left and right pads.
    #[must_use]
    pub fn horizontal(self, pad: f32) -> Self {
        self.left(pad).right(pad)
    }

    /// Set top and bottom pads.
    #[must_use]
    pub fn vertical(self, pad: f32) -> Self {
        self.top(pad).bottom(pad)
    }

    /// Set the width constraint.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the height constraint.
    #[must_use]
    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Validate into a [`HitSlop`].
    pub fn build(self) -> Result<HitSlop, ConfigError> {
        HitSlop::try_from(self)
    }
}

/// Validated hit-slop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitSlop {
    config: HitSlopConfig,
}

impl HitSlop {
    /// Start building a hit-slop.
    pub fn builder() -> HitSlopConfig {
        HitSlopConfig::default()
    }

    /// The same pad on every side. Negative values shrink the region.
    pub fn uniform(pad: f32) -> Self {
        Self {
            config: HitSlopConfig::default().horizontal(pad).vertical(pad),
        }
    }

    /// The underlying values.
    pub fn config(&self) -> &HitSlopConfig {
        &self.config
    }

    /// The region used for membership tests, given the target's frame.
    pub fn apply(&self, frame: Rect) -> Rect {
        let c = &self.config;
        let mut region = frame;
        if let Some(pad) = c.left {
            region.left -= pad;
        }
        if let Some(pad) = c.top {
            region.top -= pad;
        }
        if let Some(pad) = c.right {
            region.right += pad;
        }
        if let Some(pad) = c.bottom {
            region.bottom += pad;
        }
        if let Some(width) = c.width {
            if c.left.is_none() {
                region.left = region.right - width;
            } else if c.right.is_none() {
                region.right = region.left + width;
            }
        }
        if let Some(height) = c.height {
            if c.top.is_none() {
                region.top = region.bottom - height;
            } else if c.bottom.is_none() {
                region.bottom = region.top + height;
            }
        }
        region
    }

    /// Whether `(x, y)` is inside `frame` once the slop is applied.
    pub fn contains(&self, frame: Rect, x: f32, y: f32) -> bool {
        self.apply(frame).contains(x, y)
    }
}

impl TryFrom<HitSlopConfig> for HitSlop {
    type Error = ConfigError;

    fn try_from(config: HitSlopConfig) -> Result<Self, Self::Error> {
        if config.width.is_some() {
            match (config.left, config.right) {
                (Some(_), Some(_)) => return Err(ConfigError::HitSlopWidthOverconstrained),
                (None, None) => return Err(ConfigError::HitSlopWidthUnanchored),
                _ => {}
            }
        }
        if config.height.is_some() {
            match (config.top, config.bottom) {
                (Some(_), Some(_)) => return Err(ConfigError::HitSlopHeightOverconstrained),
                (None, None) => return Err(ConfigError::HitSlopHeightUnanchored),
                _ => {}
            }
        }
        Ok(Self { config })
    }
}

impl From<HitSlop> for HitSlopConfig {
    fn from(slop: HitSlop) -> Self {
        slop.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Rect = Rect::from_origin_size(100.0, 100.0, 50.0, 50.0);

    #[test]
    fn boundary_and_pad_are_inside() {
        let slop = HitSlop::uniform(10.0);
        assert!(slop.contains(FRAME, 100.0, 100.0));
        assert!(slop.contains(FRAME, 99.0, 120.0));
        assert!(slop.contains(FRAME, 160.0, 160.0));
        assert!(!slop.contains(FRAME, 161.0, 120.0));
    }

    #[test]
    fn negative_pad_shrinks() {
        let slop = HitSlop::uniform(-5.0);
        assert!(!slop.contains(FRAME, 102.0, 120.0));
        assert!(slop.contains(FRAME, 105.0, 120.0));
    }

    #[test]
    fn width_anchored_on_left() {
        let slop = HitSlop::builder().left(10.0).width(30.0).build().unwrap();
        let region = slop.apply(FRAME);
        assert_eq!(region.left, 90.0);
        assert_eq!(region.right, 120.0);
    }

    #[test]
    fn width_anchored_on_right() {
        let slop = HitSlop::builder().right(0.0).width(20.0).build().unwrap();
        let region = slop.apply(FRAME);
        assert_eq!(region.right, 150.0);
        assert_eq!(region.left, 130.0);
    }

    #[test]
    fn height_anchored_on_top() {
        let slop = HitSlop::builder().top(5.0).height(10.0).build().unwrap();
        let region = slop.apply(FRAME);
        assert_eq!(region.top, 95.0);
        assert_eq!(region.bottom, 105.0);
    }

    #[test]
    fn contradictory_combinations_are_rejected() {
        assert_eq!(
            HitSlop::builder().horizontal(5.0).width(10.0).build(),
            Err(ConfigError::HitSlopWidthOverconstrained)
        );
        assert_eq!(
            HitSlop::builder().width(10.0).build(),
            Err(ConfigError::HitSlopWidthUnanchored)
        );
        assert_eq!(
            HitSlop::builder().vertical(5.0).height(10.0).build(),
            Err(ConfigError::HitSlopHeightOverconstrained)
        );
        assert_eq!(
            HitSlop::builder().left(1.0).height(10.0).build(),
            Err(ConfigError::HitSlopHeightUnanchored)
        );
    }
}
