//! Types for quantities with units (staff spaces, staff positions)
//!
//! Most of the layout core works in plain `f64` layout units. Vertical positions measured against a staff
//! are either in staff spaces ([`Space`](units::Space)) or in staff positions ([`HalfSpace`](units::HalfSpace)),
//! and mixing the two up is a classic source of off-by-a-factor-two errors.
//! A function requiring a staff position asks for a [`Unit<HalfSpace>`](units::HalfSpace).


use std::ops::{Add, Sub, Mul, Neg};
use std::cmp::{PartialEq, PartialOrd};
use std::fmt::{Display, Debug};

use self::units::{Ratio, Space, HalfSpace};
pub mod units;

/// A f64 value with its unit represented in the type
#[derive(Serialize, Deserialize)]
pub struct Unit<U> {
    value : f64,
    #[serde(skip)]
    _phantom : std::marker::PhantomData<U>,
}


impl<U> PartialEq for Unit<U> {
    fn eq(&self, other: &Self) -> bool {
        self.value.eq(&other.value)
    }
}

impl<U> PartialOrd for Unit<U> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<U> Clone for Unit<U> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<U> Copy for Unit<U> {}
impl<U> Debug for Unit<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let type_name = std::any::type_name::<U>();
        write!(f, "Unit::<{}>::new({})", type_name, self.value)
    }
}

impl<U> Display for Unit<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.value, f)
    }
}


impl Unit<Ratio<HalfSpace, Space>> {
    /// There are two staff positions in a staff space: one on a line, one in a space.
    pub const HALF_SPACES_PER_SPACE : Self = Self::new(2.);
}

impl<U> Unit<U> {
    /// The zero value
    pub const ZERO : Self = Self::new(0.);

    /// Creates a value with unit from a unit-less value.
    /// To be used with care: you need to manually check that the value you pass is indeed in the right dimension.
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            _phantom: std::marker::PhantomData
        }
    }

    /// Converts a value to a unit-less value ("unsafe" since it removes information about dimensions)
    #[inline]
    pub const fn to_unitless(self) -> f64
    { self.value }

    /// Equivalent to [`f64::abs`] for values with units
    pub fn abs(self) -> Self {
        Self::new(self.value.abs())
    }

    /// Rounds towards `+∞` when `dir` is positive, towards `-∞` otherwise.
    pub fn directed_round(self, dir : f64) -> Self {
        if dir < 0. { Self::new(self.value.floor()) } else { Self::new(self.value.ceil()) }
    }
}

impl<U, V> Unit<Ratio<U, V>> {
    /// Inverts a ratio going from `x` (unit: U/V) to `1/x` (unit: V/U)
    #[inline]
    pub fn recip(self) -> Unit<Ratio<V, U>> {
        Unit::<Ratio<V, U>>::new(self.value.recip())
    }
}

impl Unit<Space> {
    /// Converts staff spaces to staff positions
    pub fn to_staff_position(self) -> Unit<HalfSpace> {
        self * Unit::HALF_SPACES_PER_SPACE
    }
}

impl Unit<HalfSpace> {
    /// Converts staff positions to staff spaces
    pub fn to_spaces(self) -> Unit<Space> {
        self * Unit::HALF_SPACES_PER_SPACE.recip()
    }
}

impl<U> Add for Unit<U> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.value + rhs.value)
    }
}

impl<U> Sub for Unit<U> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.value - rhs.value)
    }
}

impl<U> Neg for Unit<U> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(- self.value)
    }
}


impl<U, V> Mul<Unit<Ratio<U, V>>> for Unit<V> {
    type Output = Unit<U>;

    fn mul(self, rhs: Unit<Ratio<U, V>>) -> Self::Output {
        Unit::<U>::new(self.value * rhs.value)
    }
}
