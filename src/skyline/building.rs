//! A single straight roof segment of a skyline.

use crate::geometry::{Axis, BBox, Direction, Point};
use crate::interval::Interval;

/// The line `y = slope * x + y_intercept`, valid on `[start, end)`.
///
/// Heights are stored in the orientation of the owning skyline: buildings of a `Down` skyline hold negated heights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Building {
    pub start       : f64,
    pub end         : f64,
    pub y_intercept : f64,
    pub slope       : f64,
}

impl Building {
    /// The roof going from `(start, start_height)` to `(end, end_height)`.
    ///
    /// A building with an infinite end must be flat ; a slope that is not a finite number is a broken invariant.
    pub fn new(start : f64, start_height : f64, end_height : f64, end : f64) -> Self {
        if start.is_infinite() || end.is_infinite() {
            assert!(start_height == end_height, "infinite building must be flat");
        }

        let slope = if start_height == end_height {
            0.
        }
        else {
            (end_height - start_height) / (end - start)
        };
        assert!(slope.is_finite(), "building slope must be finite, got {}", slope);

        let y_intercept = if start.is_infinite() {
            start_height
        }
        else {
            start_height - slope * start
        };

        Self { start, end, y_intercept, slope }
    }

    /// A flat building at height `-∞` covering `[start, end)`
    pub fn empty(start : f64, end : f64) -> Self {
        Self { start, end, y_intercept : f64::NEG_INFINITY, slope : 0. }
    }

    /// The top of `b` (bottom for `sky = Down`) seen along `horizon_axis`, widened by `horizon_padding` on both sides.
    pub fn from_box(b : &BBox, horizon_padding : f64, horizon_axis : Axis, sky : Direction) -> Self {
        let horizon = b.extent(horizon_axis);
        let height = sky.sign() * b.extent(horizon_axis.other()).at(sky);
        Self::new(horizon.left - horizon_padding, height, height, horizon.right + horizon_padding)
    }

    /// The line between two points given in (horizon, height) coordinates ; `p1.x < p2.x` is expected.
    pub fn from_segment(p1 : Point, p2 : Point, sky : Direction) -> Self {
        let s = sky.sign();
        Self::new(p1.x, s * p1.y, s * p2.y, p2.x)
    }

    /// Height of the roof at `x`, extrapolating the line outside `[start, end)`.
    #[inline]
    pub fn height(&self, x : f64) -> f64 {
        if x.is_infinite() { self.y_intercept } else { self.slope * x + self.y_intercept }
    }

    /// Translates the building horizontally by `s`
    pub fn shift(&mut self, s : f64) {
        self.start += s;
        self.end   += s;
        self.y_intercept -= s * self.slope;
    }

    /// Truncates the building at `end`
    pub fn leading_part(&mut self, end : f64) {
        debug_assert!(end >= self.start);
        self.end = end;
    }

    /// Abscissa of the intersection of the two roof lines ; `-∞` if they are parallel.
    pub fn intersection_x(&self, other : &Building) -> f64 {
        let ret = (self.y_intercept - other.y_intercept) / (other.slope - self.slope);
        if ret.is_nan() { f64::NEG_INFINITY } else { ret }
    }

    /// Whether `self` lies above `other` just to the right of `x`.
    pub fn conceals(&self, other : &Building, x : f64) -> bool {
        if self.slope == other.slope {
            return self.y_intercept > other.y_intercept;
        }

        // their slopes were not equal, so there is an intersection point
        let i = self.intersection_x(other);
        (i <= x && self.slope > other.slope) || (i > x && self.slope < other.slope)
    }

    /// The abscissa in `[start, end]` where the roof reaches height `y`, if the roof is sloped and does.
    pub fn x_at_height(&self, y : f64) -> Option<f64> {
        if self.slope == 0. {
            return None;
        }
        let x = (y - self.y_intercept) / self.slope;
        if x >= self.start && x <= self.end && x.is_finite() { Some(x) } else { None }
    }

    /// The interval of horizontal shifts `s` for which this building (pointing up), moved by `s`,
    /// overlaps `other`, a building of the opposite skyline (pointing down, i.e. storing negated heights).
    ///
    /// The region under one roof and the region above the other floor are convex, so the forbidden shifts form
    /// an interval. Its ends are reached when the buildings' vertical sides touch, or when a corner of one
    /// building rests on the roof of the other.
    pub fn overlapping_shift_interval(&self, other : &Building) -> Interval {
        let mut iv = Interval::EMPTY;

        // if one building is empty, there will never be an overlap
        if self.y_intercept == f64::NEG_INFINITY || other.y_intercept == f64::NEG_INFINITY {
            return iv;
        }

        let my_y1  =  self.height(self.start);
        let my_y2  =  self.height(self.end);
        let his_y1 = -other.height(other.start);
        let his_y2 = -other.height(other.end);

        // both reach infinity on the same side: they are flat there, and either always or never overlap
        if (self.start.is_infinite() && other.start.is_infinite()) || (self.end.is_infinite() && other.end.is_infinite()) {
            return if self.y_intercept + other.y_intercept > 0. { Interval::FULL } else { iv };
        }

        // sides touching
        if my_y2 >= his_y1 {
            iv.add_point(other.start - self.end);
        }
        if my_y1 >= his_y2 {
            iv.add_point(other.end - self.start);
        }

        // one of my corners on the other floor
        for (x, y) in [(self.start, my_y1), (self.end, my_y2)] {
            if let Some(target) = other.x_at_height(-y) {
                iv.add_point(target - x);
            }
        }
        // one of the other's corners on my roof
        for (x, y) in [(other.start, his_y1), (other.end, his_y2)] {
            if let Some(target) = self.x_at_height(y) {
                iv.add_point(x - target);
            }
        }

        iv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_through_endpoints() {
        let b = Building::new(1., 2., 4., 3.);
        assert_eq!(b.slope, 1.);
        assert_eq!(b.y_intercept, 1.);
        assert_eq!(b.height(2.), 3.);

        let flat = Building::new(f64::NEG_INFINITY, 5., 5., 0.);
        assert_eq!(flat.slope, 0.);
        assert_eq!(flat.height(-100.), 5.);
        assert_eq!(flat.height(f64::NEG_INFINITY), 5.);
    }

    #[test]
    #[should_panic]
    fn sloped_infinite_building() {
        Building::new(f64::NEG_INFINITY, 0., 1., 0.);
    }

    #[test]
    fn concealment() {
        let low  = Building::new(0., 0., 0., 10.);
        let high = Building::new(0., 1., 1., 10.);
        assert!(high.conceals(&low, 0.));
        assert!(!low.conceals(&high, 0.));

        // crossing at x = 5
        let rising = Building::new(0., -5., 5., 10.);
        assert_eq!(rising.intersection_x(&low), 5.);
        assert!(!rising.conceals(&low, 2.));
        assert!(rising.conceals(&low, 6.));
    }

    #[test]
    fn shifting_preserves_roof() {
        let mut b = Building::new(0., 0., 2., 2.);
        b.shift(3.);
        assert_eq!(b.start, 3.);
        assert_eq!(b.end, 5.);
        assert_eq!(b.height(3.), 0.);
        assert_eq!(b.height(5.), 2.);
    }

    #[test]
    fn flat_shift_interval() {
        // a roof at height 1 on [0, 2], a floor at height 0 (stored as 0) on [5, 6]
        let roof  = Building::new(0., 1., 1., 2.);
        let floor = Building::new(5., 0., 0., 6.);
        let iv = roof.overlapping_shift_interval(&floor);
        assert_eq!(iv, Interval::new(3., 6.));

        // a floor above the roof never collides
        let high_floor = Building::new(5., -3., -3., 6.);
        assert!(roof.overlapping_shift_interval(&high_floor).is_empty());
    }

    #[test]
    fn infinite_on_the_same_side() {
        let roof = Building::new(f64::NEG_INFINITY, 1., 1., 0.);
        let low_floor = Building::new(f64::NEG_INFINITY, 0., 0., 2.);
        assert!(roof.overlapping_shift_interval(&low_floor).is_full());

        // a floor at height 3 is stored as -3
        let high_floor = Building::new(f64::NEG_INFINITY, -3., -3., 2.);
        assert!(roof.overlapping_shift_interval(&high_floor).is_empty());

        let right_roof = Building::new(0., 1., 1., f64::INFINITY);
        let right_floor = Building::new(5., 0., 0., f64::INFINITY);
        assert!(right_roof.overlapping_shift_interval(&right_floor).is_full());
    }
}
