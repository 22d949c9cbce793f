#![forbid(unsafe_code)]

//! Geometric primitives for lane hit testing.
//!
//! Coordinates are pixels in a single consistent 2D space supplied by the
//! host rendering layer. The core never measures anything itself; it only
//! compares points against rectangles the host hands it, fresh on every
//! query (layout can change mid-gesture, e.g. scrolling).

use serde::{Deserialize, Serialize};

/// A 2D pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reduce a multi-touch contact list to a single point.
    ///
    /// Touch input carries zero or more contacts; only the first one drives
    /// a gesture. Returns `None` for an empty contact list (touch-end).
    #[must_use]
    pub fn from_touches(touches: &[(f64, f64)]) -> Option<Self> {
        touches.first().map(|&(x, y)| Self::new(x, y))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A lane's on-screen bounding rectangle, in pixels.
///
/// Edges are stored explicitly (not as origin + size) because that is the
/// shape the host layout system reports. Containment is inclusive on all
/// four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LaneRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl LaneRect {
    /// Create a new rectangle from explicit edges.
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[must_use]
    pub const fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Check whether a point lies within the rectangle (inclusive edges).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_all_edges() {
        let rect = LaneRect::new(10.0, 20.0, 110.0, 100.0);

        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(110.0, 100.0)));
        assert!(rect.contains(Point::new(10.0, 100.0)));
        assert!(rect.contains(Point::new(110.0, 20.0)));
        assert!(rect.contains(Point::new(60.0, 60.0)));
    }

    #[test]
    fn contains_rejects_outside_points() {
        let rect = LaneRect::new(10.0, 20.0, 110.0, 100.0);

        assert!(!rect.contains(Point::new(9.9, 60.0)));
        assert!(!rect.contains(Point::new(110.1, 60.0)));
        assert!(!rect.contains(Point::new(60.0, 19.9)));
        assert!(!rect.contains(Point::new(60.0, 100.1)));
    }

    #[test]
    fn from_origin_size_matches_explicit_edges() {
        let a = LaneRect::from_origin_size(10.0, 20.0, 100.0, 80.0);
        let b = LaneRect::new(10.0, 20.0, 110.0, 100.0);
        assert_eq!(a, b);
        assert_eq!(a.width(), 100.0);
        assert_eq!(a.height(), 80.0);
    }

    #[test]
    fn first_touch_wins() {
        let point = Point::from_touches(&[(5.0, 6.0), (50.0, 60.0)]);
        assert_eq!(point, Some(Point::new(5.0, 6.0)));
        assert_eq!(Point::from_touches(&[]), None);
    }
}
