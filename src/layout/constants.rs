//! Engraving constants used when a grob or the [`LayoutSettings`](super::LayoutSettings) do not say otherwise.
//!
//! Lengths are in staff spaces unless stated otherwise.

use crate::dimensions::{units::Space, Unit};
use crate::geometry::Direction;

/// Distance between two staff lines, in layout units, for grobs without a staff
pub const DEFAULT_STAFF_SPACE     : f64 = 1.0;
/// Number of lines of a staff symbol without a `LineCount`
pub const DEFAULT_LINE_COUNT      : i64 = 5;
/// Thickness of staff lines, in layout units
pub const DEFAULT_LINE_THICKNESS  : f64 = 0.1;

/// Horizontal padding of the boxes making up the skyline of an axis group, in layout units
pub const SKYLINE_HORIZONTAL_PADDING       : f64 = 0.1;
/// Vertical distance kept between outside-staff objects, in layout units
pub const OUTSIDE_STAFF_PADDING            : f64 = 0.5;
/// Horizontal distance kept between outside-staff objects, in layout units
pub const OUTSIDE_STAFF_HORIZONTAL_PADDING : f64 = 0.0;
/// Offsets larger than this (in layout units) are reported as improbable
pub const IMPROBABLE_OFFSET                : f64 = 1000.0;
/// Bound on the rounds of collision avoidance for one outside-staff object
pub const MAX_OUTSIDE_STAFF_ROUNDS         : usize = 16;

/// Thickness of a beam
pub const BEAM_THICKNESS    : Unit<Space> = Unit::<Space>::new(0.48);
/// Damping of beam slopes ; 0 means no damping.
pub const BEAM_DAMPING      : f64 = 1.0;
/// Beams with at least this concaveness are made horizontal
pub const FLAT_CONCAVENESS  : f64 = 10000.0;
/// Direction of beams and stems when nothing else decides
pub const NEUTRAL_DIRECTION : Direction = Direction::Down;

/// Covered objects shorter than this do not restrict the initial beam region
pub const MIN_COVERED_HEIGHT : Unit<Space> = Unit::<Space>::new(2.0);
/// Step used to push a beam out of a forbidden region
pub const REGION_EPSILON     : f64 = 1.0e-10;

/// Preferred length of a beamed stem, from the outer note head to the beam
pub const IDEAL_STEM_LENGTH    : Unit<Space> = Unit::<Space>::new(3.5);
/// Shortest acceptable length of a beamed stem
pub const SHORTEST_STEM_LENGTH : Unit<Space> = Unit::<Space>::new(2.5);

/// Default length of beamlets, in staff spaces, left and right
pub const BEAMLET_DEFAULT_LENGTH        : f64 = 1.1;
/// How far beamlets may reach towards the neighbouring stem
pub const BEAMLET_MAX_LENGTH_PROPORTION : f64 = 0.75;

/// Stem lengths shorter than ideal weigh this much more than longer ones
pub const SHRINK_EXTRA_WEIGHT : f64 = 1.5;
/// Exponent making the stem length demerit strictly convex
pub const STEM_LENGTH_POWER   : f64 = 1.1;
/// Clearance between beams and covered objects below which the collision demerit applies
pub const COLLISION_PADDING   : Unit<Space> = Unit::<Space>::new(0.35);
