//! The two skylines, up and down, of one object.

use std::ops::{Index, IndexMut};

use crate::geometry::{Axis, BBox, Direction, Point};
use super::Skyline;

/// The up and down envelopes of the same set of boxes, along the same horizon axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SkylinePair {
    down : Skyline,
    up   : Skyline,
}

impl Default for SkylinePair {
    fn default() -> Self {
        Self::new()
    }
}

impl SkylinePair {
    /// A pair of empty skylines
    pub fn new() -> Self {
        Self {
            down : Skyline::new(Direction::Down),
            up   : Skyline::new(Direction::Up),
        }
    }

    pub fn from_boxes(boxes : &[BBox], horizon_padding : f64, horizon_axis : Axis) -> Self {
        Self {
            down : Skyline::from_boxes(boxes, horizon_padding, horizon_axis, Direction::Down),
            up   : Skyline::from_boxes(boxes, horizon_padding, horizon_axis, Direction::Up),
        }
    }

    pub fn from_box(b : &BBox, horizon_padding : f64, horizon_axis : Axis) -> Self {
        Self {
            down : Skyline::from_box(b, horizon_padding, horizon_axis, Direction::Down),
            up   : Skyline::from_box(b, horizon_padding, horizon_axis, Direction::Up),
        }
    }

    pub fn from_segments(segments : &[(Point, Point)], horizon_axis : Axis) -> Self {
        Self {
            down : Skyline::from_segments(segments, horizon_axis, Direction::Down),
            up   : Skyline::from_segments(segments, horizon_axis, Direction::Up),
        }
    }

    /// Merges each half with the half of `other` pointing the same way
    pub fn merge(&mut self, other : &SkylinePair) {
        self.down.merge(&other.down);
        self.up.merge(&other.up);
    }

    pub fn insert(&mut self, b : &BBox, horizon_padding : f64, horizon_axis : Axis) {
        self.down.insert(b, horizon_padding, horizon_axis);
        self.up.insert(b, horizon_padding, horizon_axis);
    }

    /// Moves both skylines by `r` perpendicularly to the horizon
    pub fn raise(&mut self, r : f64) {
        self.down.raise(r);
        self.up.raise(r);
    }

    /// Moves both skylines by `s` along the horizon
    pub fn shift(&mut self, s : f64) {
        self.down.shift(s);
        self.up.shift(s);
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty() && self.up.is_empty()
    }

    pub fn left(&self) -> f64 {
        self.down.left().min(self.up.left())
    }

    pub fn right(&self) -> f64 {
        self.down.right().max(self.up.right())
    }

    /// How far `self` must be raised to clear `below`, keeping `horizon_padding` between them along the horizon.
    pub fn distance(&self, below : &SkylinePair, horizon_padding : f64) -> f64 {
        self.down.distance(&below.up, horizon_padding)
    }

    /// Corners of both skylines, down first, for debugging output
    pub fn to_points(&self, horizon_axis : Axis) -> Vec<Point> {
        let mut points = self.down.to_points(horizon_axis);
        points.extend(self.up.to_points(horizon_axis));
        points
    }
}

impl Index<Direction> for SkylinePair {
    type Output = Skyline;

    fn index(&self, d : Direction) -> &Skyline {
        debug_assert!(!d.is_center());
        match d {
            Direction::Down => &self.down,
            _               => &self.up,
        }
    }
}

impl IndexMut<Direction> for SkylinePair {
    fn index_mut(&mut self, d : Direction) -> &mut Skyline {
        debug_assert!(!d.is_center());
        match d {
            Direction::Down => &mut self.down,
            _               => &mut self.up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;

    #[test]
    fn stacking() {
        let staff = SkylinePair::from_box(&BBox::new(Interval::new(0., 20.), Interval::new(-2., 2.)), 0., Axis::X);
        let mut script = SkylinePair::from_box(&BBox::new(Interval::new(4., 5.), Interval::new(0., 1.)), 0., Axis::X);

        let lift = script.distance(&staff, 0.);
        assert_eq!(lift, 2.);

        script.raise(lift);
        assert_eq!(script[Direction::Down].height(4.5), 2.);
        assert_eq!(script[Direction::Up].height(4.5), 3.);
        assert_eq!(script.distance(&staff, 0.), 0.);

        let mut merged = staff.clone();
        merged.merge(&script);
        assert_eq!(merged[Direction::Up].height(4.5), 3.);
        assert_eq!(merged[Direction::Down].height(4.5), -2.);
        assert_eq!(merged.left(), 0.);
        assert_eq!(merged.right(), 20.);
    }

    #[test]
    fn empty_pair() {
        let pair = SkylinePair::new();
        assert!(pair.is_empty());
        assert_eq!(pair.left(), f64::INFINITY);
        assert_eq!(pair.right(), f64::NEG_INFINITY);
    }
}
