//! Standard recognizer variants.
//!
//! Every gesture is a plain struct implementing [`RecognizerBehavior`];
//! [`Behavior`] closes them into one enum so an orchestrator can hold a
//! homogeneous set without boxing. [`Behavior::Custom`] remains for gestures
//! defined outside this crate.

pub mod fling;
pub mod long_press;
pub mod manual;
pub mod native;
pub mod pan;
pub mod pinch;
pub mod rotation;
pub mod tap;

pub use fling::{Directions, Fling, FlingConfig};
pub use long_press::{LongPress, LongPressConfig};
pub use manual::Manual;
pub use native::{NATIVE_EXCLUSIVE_KIND, NATIVE_KIND, NativeView, NativeViewConfig};
pub use pan::{OffsetRange, Pan, PanConfig};
pub use pinch::{Pinch, PinchConfig};
pub use rotation::{Rotation, RotationConfig};
pub use tap::{Tap, TapConfig};

use std::fmt;
use tactus_core::{
    GestureCore, GestureRecognizer, Peer, Point, Pointer, PointerAction, PointerEvent,
    RecognizerBehavior, RecognizerId,
};
use thiserror::Error;

/// A behavior configuration was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidConfig {
    /// A pointer count of zero was requested.
    #[error("`{field}` must be at least 1")]
    ZeroPointers {
        /// The offending field.
        field: &'static str,
    },

    /// `min_pointers` exceeds `max_pointers`.
    #[error("min_pointers ({min}) must not exceed max_pointers ({max})")]
    PointerRange {
        /// Requested minimum.
        min: usize,
        /// Requested maximum.
        max: usize,
    },

    /// A distance that must be non-negative was negative.
    #[error("`{field}` must not be negative, got {value}")]
    NegativeDistance {
        /// The offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
}

pub(crate) fn non_negative(field: &'static str, value: Option<f32>) -> Result<(), InvalidConfig> {
    match value {
        Some(value) if value < 0.0 => Err(InvalidConfig::NegativeDistance { field, value }),
        _ => Ok(()),
    }
}

/// Focal point of an event: the centroid, ignoring a pointer being lifted.
pub(crate) fn focal_point(event: &PointerEvent) -> Option<Point> {
    if event.action == PointerAction::PointerUp {
        event.centroid_without(event.action_index)
    } else {
        event.centroid()
    }
}

/// The two lowest slots still down after this event, in slot order.
pub(crate) fn pointer_pair(event: &PointerEvent) -> Option<(Point, Point)> {
    let lifted = event.action.is_up().then_some(event.action_index);
    let mut down: Vec<&Pointer> = event
        .pointers
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != lifted)
        .map(|(_, p)| p)
        .collect();
    down.sort_by_key(|p| p.id);
    match down.as_slice() {
        [a, b, ..] => Some((a.position(), b.position())),
        _ => None,
    }
}

/// Translation of a focal point that stays continuous when pointers come and
/// go.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Anchor {
    start: Point,
    last: Point,
    offset: Point,
}

impl Anchor {
    pub(crate) fn start(&mut self, at: Point) {
        *self = Self {
            start: at,
            last: at,
            offset: Point::default(),
        };
    }

    pub(crate) fn update(&mut self, at: Point) {
        self.last = at;
    }

    /// Carry the current translation over a jump of the focal point.
    pub(crate) fn rebase(&mut self, at: Point) {
        self.offset.x += self.last.x - self.start.x;
        self.offset.y += self.last.y - self.start.y;
        self.start = at;
        self.last = at;
    }

    /// Drop accumulated progress; translation restarts at zero.
    pub(crate) fn restart(&mut self) {
        self.start = self.last;
        self.offset = Point::default();
    }

    pub(crate) fn last(&self) -> Point {
        self.last
    }

    pub(crate) fn translation(&self) -> Point {
        Point::new(
            self.last.x - self.start.x + self.offset.x,
            self.last.y - self.start.y + self.offset.y,
        )
    }
}

/// The closed set of standard gestures.
pub enum Behavior {
    /// Discrete tap.
    Tap(Tap),
    /// Continuous drag.
    Pan(Pan),
    /// Press and hold.
    LongPress(LongPress),
    /// Two-pointer scale.
    Pinch(Pinch),
    /// Two-pointer rotation.
    Rotation(Rotation),
    /// Quick directional swipe.
    Fling(Fling),
    /// Passthrough for a platform view with its own touch handling.
    NativeView(NativeView),
    /// State driven entirely by the host.
    Manual(Manual),
    /// Anything else.
    Custom(Box<dyn RecognizerBehavior>),
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tap(b) => fmt::Debug::fmt(b, f),
            Self::Pan(b) => fmt::Debug::fmt(b, f),
            Self::LongPress(b) => fmt::Debug::fmt(b, f),
            Self::Pinch(b) => fmt::Debug::fmt(b, f),
            Self::Rotation(b) => fmt::Debug::fmt(b, f),
            Self::Fling(b) => fmt::Debug::fmt(b, f),
            Self::NativeView(b) => fmt::Debug::fmt(b, f),
            Self::Manual(b) => fmt::Debug::fmt(b, f),
            Self::Custom(b) => f.debug_tuple("Custom").field(&b.kind()).finish(),
        }
    }
}

macro_rules! delegate {
    ($self:ident, $b:ident => $body:expr) => {
        match $self {
            Behavior::Tap($b) => $body,
            Behavior::Pan($b) => $body,
            Behavior::LongPress($b) => $body,
            Behavior::Pinch($b) => $body,
            Behavior::Rotation($b) => $body,
            Behavior::Fling($b) => $body,
            Behavior::NativeView($b) => $body,
            Behavior::Manual($b) => $body,
            Behavior::Custom($b) => $body,
        }
    };
}

impl RecognizerBehavior for Behavior {
    fn kind(&self) -> &'static str {
        delegate!(self, b => b.kind())
    }

    fn on_handle(&mut self, core: &mut GestureCore, event: &PointerEvent) {
        delegate!(self, b => b.on_handle(core, event))
    }

    fn on_reset(&mut self) {
        delegate!(self, b => b.on_reset())
    }

    fn on_cancel(&mut self, core: &GestureCore) {
        delegate!(self, b => b.on_cancel(core))
    }

    fn reset_progress(&mut self, core: &GestureCore) {
        delegate!(self, b => b.reset_progress(core))
    }

    fn should_recognize_simultaneously(&self, this: &Peer, other: &Peer) -> bool {
        delegate!(self, b => b.should_recognize_simultaneously(this, other))
    }

    fn should_be_cancelled_by(&self, this: &Peer, other: &Peer) -> bool {
        delegate!(self, b => b.should_be_cancelled_by(this, other))
    }
}

macro_rules! impl_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Behavior {
                fn from(behavior: $variant) -> Self {
                    Self::$variant(behavior)
                }
            }
        )*
    };
}

impl_from!(Tap, Pan, LongPress, Pinch, Rotation, Fling, NativeView, Manual);

impl From<Box<dyn RecognizerBehavior>> for Behavior {
    fn from(behavior: Box<dyn RecognizerBehavior>) -> Self {
        Self::Custom(behavior)
    }
}

impl Behavior {
    /// Wrap a behavior defined outside this crate.
    pub fn custom(behavior: impl RecognizerBehavior) -> Self {
        Self::Custom(Box::new(behavior))
    }

    /// Build a recognizer around this behavior.
    ///
    /// Native views are set up to receive `Touch` notifications.
    pub fn into_recognizer(self, id: RecognizerId) -> GestureRecognizer<Behavior> {
        let needs_pointer_data = matches!(self, Self::NativeView(_));
        GestureRecognizer::new(id, self).with_needs_pointer_data(needs_pointer_data)
    }

    /// The pan state, if this is a pan.
    pub fn as_pan(&self) -> Option<&Pan> {
        match self {
            Self::Pan(pan) => Some(pan),
            _ => None,
        }
    }

    /// The pinch state, if this is a pinch.
    pub fn as_pinch(&self) -> Option<&Pinch> {
        match self {
            Self::Pinch(pinch) => Some(pinch),
            _ => None,
        }
    }

    /// The rotation state, if this is a rotation.
    pub fn as_rotation(&self) -> Option<&Rotation> {
        match self {
            Self::Rotation(rotation) => Some(rotation),
            _ => None,
        }
    }

    /// The long-press state, if this is a long press.
    pub fn as_long_press(&self) -> Option<&LongPress> {
        match self {
            Self::LongPress(long_press) => Some(long_press),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactus_core::Pointer;

    #[test]
    fn anchor_keeps_translation_across_rebase() {
        let mut anchor = Anchor::default();
        anchor.start(Point::new(0.0, 0.0));
        anchor.update(Point::new(10.0, 5.0));
        anchor.rebase(Point::new(50.0, 50.0));
        assert_eq!(anchor.translation(), Point::new(10.0, 5.0));
        anchor.update(Point::new(52.0, 50.0));
        assert_eq!(anchor.translation(), Point::new(12.0, 5.0));
        anchor.restart();
        assert_eq!(anchor.translation(), Point::new(0.0, 0.0));
    }

    #[test]
    fn focal_point_ignores_lifted_pointer() {
        let event = PointerEvent::new(
            PointerAction::PointerUp,
            0,
            vec![Pointer::new(0, 100.0, 0.0), Pointer::new(1, 0.0, 0.0)],
            0,
        );
        assert_eq!(focal_point(&event), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn pair_skips_the_lifted_pointer() {
        let event = PointerEvent::new(
            PointerAction::PointerUp,
            1,
            vec![
                Pointer::new(2, 20.0, 0.0),
                Pointer::new(0, 0.0, 0.0),
                Pointer::new(1, 10.0, 0.0),
            ],
            0,
        );
        assert_eq!(
            pointer_pair(&event),
            Some((Point::new(10.0, 0.0), Point::new(20.0, 0.0)))
        );
        let single = PointerEvent::new(PointerAction::Move, 0, vec![Pointer::new(0, 0.0, 0.0)], 0);
        assert_eq!(pointer_pair(&single), None);
    }

    #[test]
    fn kinds_are_delegated() {
        let behaviors: Vec<Behavior> = vec![
            Tap::default().into(),
            Pan::default().into(),
            LongPress::default().into(),
            Pinch::default().into(),
            Rotation::default().into(),
            Fling::default().into(),
            NativeView::default().into(),
            Manual.into(),
            Behavior::custom(Manual),
        ];
        let kinds: Vec<_> = behaviors.iter().map(|b| b.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "tap",
                "pan",
                "long_press",
                "pinch",
                "rotation",
                "fling",
                "native",
                "manual",
                "manual"
            ]
        );
    }

    #[test]
    fn native_views_ask_for_pointer_data() {
        let r = Behavior::from(NativeView::default()).into_recognizer(RecognizerId(1));
        assert!(r.core().needs_pointer_data());
        let r = Behavior::from(Tap::default()).into_recognizer(RecognizerId(2));
        assert!(!r.core().needs_pointer_data());
    }
}
