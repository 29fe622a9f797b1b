//! Defines geometric primitives: axes, directions, points and boxes.

use std::ops::{Index, IndexMut, Neg};

use crate::interval::Interval;

/// One of the two axes of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    /// horizontal axis, along which time flows
    X,
    /// vertical axis, along which pitch goes
    Y,
}

impl Axis {
    /// Both axes, horizontal first
    pub const ALL : [Axis; 2] = [Axis::X, Axis::Y];

    /// The perpendicular axis
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Index of the axis in per-axis arrays
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// A direction along an axis. `Down` doubles as "left" and `Up` as "right" on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// towards `-∞` (down, or left)
    Down,
    /// neither
    Center,
    /// towards `+∞` (up, or right)
    Up,
}

impl Direction {
    /// Alias of `Down` for horizontal uses
    pub const LEFT  : Direction = Direction::Down;
    /// Alias of `Up` for horizontal uses
    pub const RIGHT : Direction = Direction::Up;
    /// The two non-center directions, in increasing order
    pub const BOTH  : [Direction; 2] = [Direction::Down, Direction::Up];

    /// `-1`, `0` or `1`
    pub fn sign(self) -> f64 {
        match self {
            Direction::Down   => -1.,
            Direction::Center =>  0.,
            Direction::Up     =>  1.,
        }
    }

    /// Same as [`Direction::sign`], as an integer
    pub fn to_i32(self) -> i32 {
        match self {
            Direction::Down   => -1,
            Direction::Center =>  0,
            Direction::Up     =>  1,
        }
    }

    /// The direction of the sign of `x` ; `Center` for zero and NaN.
    pub fn from_sign(x : f64) -> Self {
        if x > 0. {
            Direction::Up
        }
        else if x < 0. {
            Direction::Down
        }
        else {
            Direction::Center
        }
    }

    pub fn is_center(self) -> bool {
        self == Direction::Center
    }
}

impl Neg for Direction {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Direction::Down   => Direction::Up,
            Direction::Center => Direction::Center,
            Direction::Up     => Direction::Down,
        }
    }
}

/// A pair of values, one per non-center direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Drul<T> {
    /// value for `Down` (or left)
    pub down : T,
    /// value for `Up` (or right)
    pub up   : T,
}

impl<T> Drul<T> {
    pub fn new(down : T, up : T) -> Self {
        Self { down, up }
    }
}

impl<T> Index<Direction> for Drul<T> {
    type Output = T;

    fn index(&self, d : Direction) -> &T {
        debug_assert!(!d.is_center(), "indexing a pair with the center direction");
        match d {
            Direction::Down => &self.down,
            _               => &self.up,
        }
    }
}

impl<T> IndexMut<Direction> for Drul<T> {
    fn index_mut(&mut self, d : Direction) -> &mut T {
        debug_assert!(!d.is_center(), "indexing a pair with the center direction");
        match d {
            Direction::Down => &mut self.down,
            _               => &mut self.up,
        }
    }
}

/// A point of the page
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x : f64,
    pub y : f64,
}

impl Point {
    pub const fn new(x : f64, y : f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along axis `a`
    pub fn at(&self, a : Axis) -> f64 {
        match a {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Exchanges the two coordinates
    pub fn swapped(self) -> Self {
        Self::new(self.y, self.x)
    }
}

/// An axis-aligned box, given as one interval per axis. The box is empty if either interval is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// horizontal extent
    pub x : Interval,
    /// vertical extent
    pub y : Interval,
}

impl Default for BBox {
    fn default() -> Self {
        Self { x : Interval::EMPTY, y : Interval::EMPTY }
    }
}

impl BBox {
    /// Creates new bbox from its extents
    pub const fn new(x : Interval, y : Interval) -> Self {
        Self { x, y }
    }

    /// Creates a bbox from coordinates of extremal points
    pub fn from_corners(x_min : f64, y_min : f64, x_max : f64, y_max : f64) -> Self {
        debug_assert!(x_min <= x_max);
        debug_assert!(y_min <= y_max);
        Self::new(Interval::new(x_min, x_max), Interval::new(y_min, y_max))
    }

    /// Extent along axis `a`
    pub fn extent(&self, a : Axis) -> Interval {
        match a {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn extent_mut(&mut self, a : Axis) -> &mut Interval {
        match a {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }

    /// Whether any bound is NaN
    pub fn has_nan(&self) -> bool {
        self.x.left.is_nan() || self.x.right.is_nan() || self.y.left.is_nan() || self.y.right.is_nan()
    }

    pub fn translate(&mut self, t_x : f64, t_y : f64) {
        self.x.translate(t_x);
        self.y.translate(t_y);
    }

    /// Creates the smallest bbox containing `self` and `other`
    pub fn union(&self, other : &Self) -> Self {
        Self::new(self.x.union(other.x), self.y.union(other.y))
    }

    /// Enlarges the box so that it contains the point
    pub fn add_point(&mut self, p : Point) {
        self.x.add_point(p.x);
        self.y.add_point(p.y);
    }
}
