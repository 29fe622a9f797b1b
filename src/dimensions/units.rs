//! Units in which vertical positions relative to a staff are measured.
//!
//! The conversion between staff spaces and layout units is staff-dependent (cf. the `staff-space` property
//! of staff symbols), so only the conversion between [`Space`] and [`HalfSpace`] is given here.

// ------------------------- BASIC UNITS --------------------------------

/// The distance between two adjacent staff lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Space;

/// A staff position: half the distance between two adjacent staff lines.
/// Position 0 is the middle line (or space) of the staff ; even positions fall on lines for staves with an odd line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfSpace;

// ------------------- UNIT COMBINATORS -------------------------

/// If U is a unit and V is a unit, Ratio<U, V> is the unit U . V⁻¹
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio<U, V> {
	_numerator    : std::marker::PhantomData<U>,
	_denominator  : std::marker::PhantomData<V>,
}
