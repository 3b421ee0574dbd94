//! Points and rectangles in window coordinates.

/// A point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to `other`.
    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// An axis-aligned rectangle. Edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    pub const fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Whether `(x, y)` lies inside or on the boundary.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inside() {
        let r = Rect::from_origin_size(10.0, 10.0, 100.0, 50.0);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(110.0, 60.0));
        assert!(!r.contains(110.5, 60.0));
        assert!(!r.contains(9.0, 20.0));
    }
}
