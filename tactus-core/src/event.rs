//! Raw pointer events as delivered by the platform input pipeline.

use crate::geometry::Point;
use std::fmt;

/// A platform pointer identifier, or a virtual slot once adapted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub u32);

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// The masked action of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerAction {
    /// First pointer of an interaction went down.
    Down,
    /// Pointers moved.
    Move,
    /// Last pointer of an interaction went up.
    Up,
    /// An additional pointer went down.
    PointerDown,
    /// A pointer went up while others remain down.
    PointerUp,
    /// The platform aborted the interaction.
    Cancel,
}

impl PointerAction {
    /// `Down` or `PointerDown`.
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Down | Self::PointerDown)
    }

    /// `Up` or `PointerUp`.
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up | Self::PointerUp)
    }
}

/// One pointer inside an event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pointer {
    /// Pointer identifier.
    pub id: PointerId,
    /// Horizontal position in window coordinates.
    pub x: f32,
    /// Vertical position in window coordinates.
    pub y: f32,
}

impl Pointer {
    /// Create a pointer.
    pub const fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id: PointerId(id),
            x,
            y,
        }
    }

    /// The pointer position.
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A pointer event: every pointer currently down, plus which one acted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    /// What happened.
    pub action: PointerAction,
    /// Index into `pointers` of the pointer that acted.
    pub action_index: usize,
    /// All pointers currently down (including one going up).
    pub pointers: Vec<Pointer>,
    /// Device timestamp in milliseconds.
    pub timestamp_ms: u64,
    /// Modifier / device meta state, passed through untouched.
    pub meta_state: u32,
}

impl PointerEvent {
    /// Create an event.
    pub fn new(
        action: PointerAction,
        action_index: usize,
        pointers: Vec<Pointer>,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            action,
            action_index,
            pointers,
            timestamp_ms,
            meta_state: 0,
        }
    }

    /// Set the meta state.
    pub fn with_meta_state(mut self, meta_state: u32) -> Self {
        self.meta_state = meta_state;
        self
    }

    /// The pointer that performed `action`.
    pub fn acting_pointer(&self) -> Option<&Pointer> {
        self.pointers.get(self.action_index)
    }

    /// The first pointer; bounds checks use its coordinates.
    pub fn primary(&self) -> Option<&Pointer> {
        self.pointers.first()
    }

    /// Find a pointer by id.
    pub fn find(&self, id: PointerId) -> Option<&Pointer> {
        self.pointers.iter().find(|p| p.id == id)
    }

    /// Number of pointers in the event.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Average position of all pointers.
    pub fn centroid(&self) -> Option<Point> {
        centroid(self.pointers.iter())
    }

    /// Average position of all pointers except the one at `index`.
    pub fn centroid_without(&self, index: usize) -> Option<Point> {
        centroid(
            self.pointers
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, p)| p),
        )
    }
}

fn centroid<'a>(pointers: impl Iterator<Item = &'a Pointer>) -> Option<Point> {
    let (mut sx, mut sy, mut n) = (0.0f32, 0.0f32, 0u32);
    for p in pointers {
        sx += p.x;
        sy += p.y;
        n += 1;
    }
    (n > 0).then(|| Point::new(sx / n as f32, sy / n as f32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_skips_the_lifted_pointer() {
        let event = PointerEvent::new(
            PointerAction::PointerUp,
            1,
            vec![Pointer::new(0, 0.0, 0.0), Pointer::new(1, 10.0, 10.0)],
            0,
        );
        assert_eq!(event.centroid(), Some(Point::new(5.0, 5.0)));
        assert_eq!(event.centroid_without(1), Some(Point::new(0.0, 0.0)));
        assert_eq!(event.acting_pointer().map(|p| p.id), Some(PointerId(1)));
    }

    #[test]
    fn empty_event_has_no_centroid() {
        let event = PointerEvent::new(PointerAction::Move, 0, Vec::new(), 0);
        assert!(event.centroid().is_none());
        assert!(event.primary().is_none());
    }
}
