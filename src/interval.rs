//! Closed real intervals and unions of intervals.
//!
//! Either bound of an [`Interval`] may be infinite. An interval is empty when `left > right` ; the canonical
//! empty interval is `[+∞, -∞]`, which is the neutral element for [`Interval::unite`].

use std::fmt;
use std::ops::{Add, Sub, Mul};

use crate::geometry::Direction;

/// A closed interval `[left, right]` of the real line.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// lower bound
    pub left  : f64,
    /// upper bound
    pub right : f64,
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "[empty]")
        }
        else {
            write!(f, "[{}, {}]", self.left, self.right)
        }
    }
}

impl Interval {
    /// The empty interval `[+∞, -∞]`
    pub const EMPTY : Self = Self { left : f64::INFINITY, right : f64::NEG_INFINITY };
    /// The whole real line
    pub const FULL  : Self = Self { left : f64::NEG_INFINITY, right : f64::INFINITY };

    /// Creates the interval `[left, right]` ; does not reorder its bounds.
    pub const fn new(left : f64, right : f64) -> Self {
        Self { left, right }
    }

    /// The degenerate interval `[x, x]`
    pub const fn point(x : f64) -> Self {
        Self { left : x, right : x }
    }

    /// The bound in direction `d` (left for `Down`, right for `Up`). The center for `Center`.
    #[inline]
    pub fn at(&self, d : Direction) -> f64 {
        match d {
            Direction::Down   => self.left,
            Direction::Up     => self.right,
            Direction::Center => self.center(),
        }
    }

    /// Sets the bound in direction `d`
    #[inline]
    pub fn set(&mut self, d : Direction, value : f64) {
        match d {
            Direction::Down   => self.left  = value,
            Direction::Up     => self.right = value,
            Direction::Center => debug_assert!(false, "cannot set the center of an interval"),
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.left <= self.right)
    }

    pub fn is_full(&self) -> bool {
        self.left == f64::NEG_INFINITY && self.right == f64::INFINITY
    }

    /// Length of the interval ; 0 for empty intervals.
    pub fn length(&self) -> f64 {
        if self.right <= self.left {
            0.
        }
        else {
            self.right - self.left
        }
    }

    /// Signed difference `right - left`, negative for empty intervals.
    pub fn delta(&self) -> f64 {
        self.right - self.left
    }

    /// Midpoint ; 0 for empty intervals and for intervals infinite on both sides.
    pub fn center(&self) -> f64 {
        if self.is_empty() {
            return 0.;
        }
        let c = (self.left + self.right) / 2.;
        if c.is_nan() { 0. } else { c }
    }

    /// The point `((1 - t) * left + (1 + t) * right) / 2`: `t = -1` is the left bound, `t = 0` the center and `t = 1` the right bound.
    pub fn linear_combination(&self, t : f64) -> f64 {
        if t == -1. {
            self.left
        }
        else if t == 1. {
            self.right
        }
        else if self.is_empty() {
            0.
        }
        else {
            ((1. - t) * self.left + (1. + t) * self.right) / 2.
        }
    }

    pub fn contains(&self, x : f64) -> bool {
        self.left <= x && x <= self.right
    }

    /// Smallest interval containing both `self` and `other`
    pub fn unite(&mut self, other : Interval) {
        self.left  = self.left.min(other.left);
        self.right = self.right.max(other.right);
    }

    /// Non-mutating version of [`Interval::unite`]
    pub fn union(mut self, other : Interval) -> Self {
        self.unite(other);
        self
    }

    pub fn intersect(&mut self, other : Interval) {
        self.left  = self.left.max(other.left);
        self.right = self.right.min(other.right);
    }

    /// Non-mutating version of [`Interval::intersect`]
    pub fn intersection(mut self, other : Interval) -> Self {
        self.intersect(other);
        self
    }

    /// Enlarges the interval so that it contains `x`
    pub fn add_point(&mut self, x : f64) {
        self.left  = self.left.min(x);
        self.right = self.right.max(x);
    }

    /// Moves both bounds outwards by `w` ; an empty interval stays empty.
    pub fn widen(&mut self, w : f64) {
        if self.is_empty() {
            return;
        }
        self.left  -= w;
        self.right += w;
    }

    pub fn translate(&mut self, t : f64) {
        self.left  += t;
        self.right += t;
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    /// Unites `self` with `h`, after moving `h` in direction `d` until it is at least `padding` away from `self`.
    /// `h` is only ever moved away from `self`, never towards it.
    pub fn union_disjoint(&self, mut h : Interval, padding : f64, d : Direction) -> Interval {
        if self.is_empty() || h.is_empty() {
            return self.union(h);
        }
        let dir = d.sign();
        let translation = dir * (self.at(d) + dir * padding - h.at(-d));
        if translation > 0. {
            h.translate(dir * translation);
        }
        h.unite(*self);
        h
    }
}

impl Add<f64> for Interval {
    type Output = Self;

    fn add(mut self, rhs : f64) -> Self {
        self.translate(rhs);
        self
    }
}

impl Sub<f64> for Interval {
    type Output = Self;

    fn sub(mut self, rhs : f64) -> Self {
        self.translate(-rhs);
        self
    }
}

impl Mul<f64> for Interval {
    type Output = Self;

    /// Scales both bounds ; a negative factor swaps them so the result stays well-ordered.
    fn mul(self, rhs : f64) -> Self {
        if self.is_empty() {
            return self;
        }
        let (a, b) = (self.left * rhs, self.right * rhs);
        if a <= b { Self::new(a, b) } else { Self::new(b, a) }
    }
}


/// A union of disjoint closed intervals, sorted by position.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct IntervalSet {
    intervals : Vec<Interval>,
}

impl IntervalSet {
    /// The empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// The whole real line
    pub fn full() -> Self {
        Self { intervals : vec![Interval::FULL] }
    }

    /// Union of a list of intervals. Empty intervals are ignored ; overlapping or touching intervals are coalesced.
    pub fn interval_union(mut intervals : Vec<Interval>) -> Self {
        intervals.retain(|iv| !iv.is_empty());
        intervals.sort_by(|a, b| a.left.total_cmp(&b.left));

        let mut result : Vec<Interval> = Vec::with_capacity(intervals.len());
        for iv in intervals {
            match result.last_mut() {
                Some(last) if iv.left <= last.right => last.right = last.right.max(iv.right),
                _ => result.push(iv),
            }
        }
        Self { intervals : result }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The closure of the complement of the set: boundary points belong to both the set and its complement.
    pub fn complement(&self) -> Self {
        if self.intervals.is_empty() {
            return Self::full();
        }

        let mut result = Vec::with_capacity(self.intervals.len() + 1);
        let mut last_right = f64::NEG_INFINITY;
        for iv in &self.intervals {
            if iv.left > last_right {
                result.push(Interval::new(last_right, iv.left));
            }
            last_right = iv.right;
        }
        if last_right < f64::INFINITY {
            result.push(Interval::new(last_right, f64::INFINITY));
        }
        Self { intervals : result }
    }

    /// Removes the open interior of `rm` from the set.
    pub fn remove_interval(&mut self, rm : Interval) {
        if rm.is_empty() {
            return;
        }
        let mut result = Vec::with_capacity(self.intervals.len() + 1);
        for iv in &self.intervals {
            if iv.right <= rm.left || iv.left >= rm.right {
                result.push(*iv);
                continue;
            }
            if iv.left < rm.left {
                result.push(Interval::new(iv.left, rm.left));
            }
            if iv.right > rm.right {
                result.push(Interval::new(rm.right, iv.right));
            }
        }
        self.intervals = result;
    }

    /// The point of the set closest to `x`, looking only towards `d` (both ways for `Center`).
    /// Returns `x` itself if it lies in the set, and `±∞` if there is no such point.
    pub fn nearest_point(&self, x : f64, d : Direction) -> f64 {
        let mut left  = f64::NEG_INFINITY;
        let mut right = f64::INFINITY;

        for iv in &self.intervals {
            if iv.contains(x) {
                return x;
            }
            if iv.left > x {
                right = iv.left;
                break;
            }
            left = iv.right;
        }

        match d {
            Direction::Up     => right,
            Direction::Down   => left,
            Direction::Center => if right - x < x - left { right } else { left },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_combination() {
        let iv = Interval::new(0., 10.);
        let cases = [(-1., 0.), (0., 5.), (1., 10.), (0.5, 7.5)];
        for (t, expected) in cases {
            eprintln!("t = {}", t);
            assert_eq!(iv.linear_combination(t), expected);
        }

        let half_infinite = Interval::new(f64::NEG_INFINITY, 3.);
        assert_eq!(half_infinite.linear_combination(1.), 3.);
        assert_eq!(half_infinite.linear_combination(-1.), f64::NEG_INFINITY);
    }

    #[test]
    fn empty_sentinel() {
        let empty = Interval::EMPTY;
        assert!(empty.is_empty());
        assert_eq!(empty.length(), 0.);
        assert_eq!(empty.center(), 0.);
        assert_eq!(empty.linear_combination(0.3), 0.);

        let mut iv = Interval::EMPTY;
        iv.unite(Interval::new(1., 2.));
        assert_eq!(iv, Interval::new(1., 2.));

        let disjoint = Interval::new(0., 1.).intersection(Interval::new(2., 3.));
        assert!(disjoint.is_empty());
    }

    #[test]
    fn union_disjoint() {
        let staff = Interval::new(-2., 2.);
        let above = staff.union_disjoint(Interval::new(0., 1.), 0.5, Direction::Up);
        assert_eq!(above, Interval::new(-2., 3.5));

        let below = staff.union_disjoint(Interval::new(-1., 0.), 0.5, Direction::Down);
        assert_eq!(below, Interval::new(-3.5, 2.));

        // already far enough away: not moved
        let far = staff.union_disjoint(Interval::new(5., 6.), 0.5, Direction::Up);
        assert_eq!(far, Interval::new(-2., 6.));
    }

    #[test]
    fn union_and_complement() {
        let set = IntervalSet::interval_union(vec![
            Interval::new(3., 4.),
            Interval::new(-1., 1.),
            Interval::new(0.5, 2.),
            Interval::EMPTY,
        ]);
        assert_eq!(set.intervals(), &[Interval::new(-1., 2.), Interval::new(3., 4.)]);

        let free = set.complement();
        assert_eq!(free.intervals(), &[
            Interval::new(f64::NEG_INFINITY, -1.),
            Interval::new(2., 3.),
            Interval::new(4., f64::INFINITY),
        ]);

        assert!(IntervalSet::new().complement().intervals()[0].is_full());
    }

    #[test]
    fn nearest_point() {
        let forbidden = IntervalSet::interval_union(vec![Interval::new(-1.5, 2.5)]);
        let allowed = forbidden.complement();

        assert_eq!(allowed.nearest_point(0., Direction::Up), 2.5);
        assert_eq!(allowed.nearest_point(0., Direction::Down), -1.5);
        assert_eq!(allowed.nearest_point(0., Direction::Center), -1.5);
        assert_eq!(allowed.nearest_point(3., Direction::Down), 3.);
    }

    #[test]
    fn remove_interval() {
        let mut set = IntervalSet::full();
        set.remove_interval(Interval::new(-2., 1.));
        set.remove_interval(Interval::new(4., 5.));
        assert_eq!(set.intervals(), &[
            Interval::new(f64::NEG_INFINITY, -2.),
            Interval::new(1., 4.),
            Interval::new(5., f64::INFINITY),
        ]);
    }
}
