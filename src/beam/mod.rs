//! Beams: direction, slope, quantized position and stem lengths.
//!
//! The layout of a beam is a pipeline, run once per beam by [`calc_positions`]:
//!
//!  1. [`calc_direction`] decides the direction of the beam and of its stems, possibly making a knee.
//!  2. [`calc_beaming`] numbers the beams between stems so that neighbours share as many as possible.
//!  3. [`calc_least_squares_positions`] fits a line through the ideal stem ends, and [`slope_damping`] flattens it.
//!  4. [`shift_region_to_valid`] moves it where stems are long enough and covered objects are clear.
//!  5. [`quanting`] picks the best position on the half-space grid around it.
//!  6. [`set_stem_lengths`] makes every stem reach its beams.
//!
//! Positions are the heights of the left and right end of the outer beam, in staff spaces, relative to the beam.
//! They are kept as a [`Drul`] since a descending beam has `left > right`.

pub mod stem;
mod direction;
mod positions;
mod quanting;
mod segments;

use crate::geometry::{Axis, Direction, Drul, Point};
use crate::grob::{GrobId, Grobs, Object, Property, Range};
use crate::interval::Interval;
use crate::layout::constants::BEAM_THICKNESS;
use crate::layout::staff;
use crate::skyline::SkylinePair;

pub use self::direction::{calc_beaming, calc_direction, consider_auto_knees, get_default_dir, set_stem_directions};
pub use self::positions::{
    calc_concaveness, calc_least_squares_positions, calc_stem_y, set_stem_lengths, shift_region_to_valid, slope_damping,
};
pub use self::quanting::quanting;
pub use self::segments::{get_beam_segments, BeamSegment};

/// All stems of the beam, left to right
pub fn stems(grobs : &Grobs, me : GrobId) -> &[GrobId] {
    grobs.objects(me, Object::Stems)
}

/// The stems taking part in the layout, see [`stem::is_normal_stem`]
pub fn normal_stems(grobs : &Grobs, me : GrobId) -> Vec<GrobId> {
    stems(grobs, me).iter().copied().filter(|&s| stem::is_normal_stem(grobs, s)).collect()
}

fn first_normal_stem(grobs : &Grobs, me : GrobId) -> Option<GrobId> {
    stems(grobs, me).iter().copied().find(|&s| stem::is_normal_stem(grobs, s))
}

fn last_normal_stem(grobs : &Grobs, me : GrobId) -> Option<GrobId> {
    stems(grobs, me).iter().copied().rev().find(|&s| stem::is_normal_stem(grobs, s))
}

/// Thickness of one beam, in layout units
pub fn get_beam_thickness(grobs : &Grobs, me : GrobId) -> f64 {
    grobs.robust_number(me, Property::BeamThickness, BEAM_THICKNESS.to_unitless()) * staff::staff_space(grobs, me)
}

/// Vertical distance between the centers of two stacked beams, in layout units
pub fn get_beam_translation(grobs : &Grobs, me : GrobId) -> f64 {
    let ss = staff::staff_space(grobs, me);
    let line = staff::line_thickness(grobs, me);
    let thickness = get_beam_thickness(grobs, me);
    let fraction = grobs.robust_number(me, Property::LengthFraction, 1.);

    let translation = if get_beam_count(grobs, me) < 4 {
        (2. * ss + line - thickness) / 2.
    }
    else {
        (3. * ss + line - thickness) / 3.
    };
    fraction * translation
}

/// Largest number of beams on one stem
pub fn get_beam_count(grobs : &Grobs, me : GrobId) -> i32 {
    stems(grobs, me).iter().map(|&s| stem::beam_count(grobs, s)).max().unwrap_or(0)
}

/// Whether the stems of the beam do not all point the same way
pub fn is_knee(grobs : &Grobs, me : GrobId) -> bool {
    let mut dirs = stems(grobs, me).iter().map(|&s| grobs.direction(s)).filter(|d| !d.is_center());
    match dirs.next() {
        Some(first) => dirs.any(|d| d != first),
        None => false,
    }
}

/// Whether some stem of the beam belongs to another staff than the beam
pub fn is_cross_staff(grobs : &Grobs, me : GrobId) -> bool {
    let staff_symbol = staff::get_staff_symbol(grobs, me);
    stems(grobs, me).iter().any(|&s| staff::get_staff_symbol(grobs, s) != staff_symbol)
}

/// Closest common reference points of the beam and `elements`, X then Y
fn common_refpoints(grobs : &Grobs, me : GrobId, elements : &[GrobId]) -> Option<[GrobId; 2]> {
    let x = grobs.common_refpoint_of_array(elements, me, Axis::X);
    let y = grobs.common_refpoint_of_array(elements, me, Axis::Y);
    match (x, y) {
        (Some(x), Some(y)) => Some([x, y]),
        _ => {
            error!("beam {} and its stems have no common reference point", grobs.name(me));
            None
        },
    }
}

fn to_drul(iv : Interval) -> Drul<f64> {
    Drul::new(iv.left, iv.right)
}

fn scale(pos : Drul<f64>, factor : f64) -> Drul<f64> {
    Drul::new(pos.down * factor, pos.up * factor)
}

/// Runs the beam pipeline and returns the positions of the beam, or `None` if the beam was removed.
///
/// The result is stored in the beam's `Positions` and returned as is by later calls. If `initial` positions are
/// given, they replace the least squares fit and the damping ; the direction and beam ranks computed by an earlier
/// call are kept.
pub fn calc_positions(grobs : &mut Grobs, me : GrobId, initial : Option<Interval>) -> Option<Interval> {
    if !grobs.is_live(me) {
        return None;
    }
    let previous = grobs.interval(me, Property::Positions);
    if let (Some(pos), None) = (previous, initial) {
        return Some(pos);
    }

    if previous.is_none() {
        if calc_direction(grobs, me).is_center() || !grobs.is_live(me) {
            return None;
        }
        calc_beaming(grobs, me);
    }

    let unquanted = match initial {
        Some(pos) => {
            if grobs.number(me, Property::LeastSquaresDy).is_none() {
                grobs.put(me, Property::LeastSquaresDy, pos.right - pos.left);
            }
            to_drul(pos)
        },
        None => {
            let pos = calc_least_squares_positions(grobs, me);
            slope_damping(grobs, me, pos)
        },
    };
    let region = shift_region_to_valid(grobs, me, unquanted);
    let quanted = quanting(grobs, me, region);
    debug!("beam {}: {:?} -> {:?} -> {:?}", grobs.name(me), unquanted, region, quanted);

    let pos = Interval::new(quanted.down, quanted.up);
    grobs.put(me, Property::Positions, pos);
    set_stem_lengths(grobs, me);
    Some(pos)
}

/// Skylines callback of beams: the outline of every beam segment, in the frame of the beam.
pub fn beam_skylines(grobs : &mut Grobs, me : GrobId, _range : Option<Range>) -> SkylinePair {
    let pos = match calc_positions(grobs, me, None) {
        Some(pos) => pos,
        None => return SkylinePair::new(),
    };
    let stems = stems(grobs, me).to_vec();
    let common_x = match grobs.common_refpoint_of_array(&stems, me, Axis::X) {
        Some(common_x) => common_x,
        None => return SkylinePair::new(),
    };
    let (first, last) = match (first_normal_stem(grobs, me), last_normal_stem(grobs, me)) {
        (Some(first), Some(last)) => (first, last),
        _ => return SkylinePair::new(),
    };

    let ss = staff::staff_space(grobs, me);
    let half_thickness = get_beam_thickness(grobs, me) / 2.;
    let translation = get_beam_translation(grobs, me);
    let xl = grobs.relative_coordinate(first, common_x, Axis::X);
    let xr = grobs.relative_coordinate(last, common_x, Axis::X);
    let slope = if xr != xl { (pos.right - pos.left) * ss / (xr - xl) } else { 0. };
    let my_x = grobs.relative_coordinate(me, common_x, Axis::X);

    let mut lines = Vec::new();
    for segment in get_beam_segments(grobs, me, common_x) {
        let y = |x : f64| pos.left * ss + slope * (x - xl) + translation * segment.vertical_count as f64;
        let (x0, x1) = (segment.horizontal.left, segment.horizontal.right);
        for side in [-half_thickness, half_thickness] {
            lines.push((Point::new(x0 - my_x, y(x0) + side), Point::new(x1 - my_x, y(x1) + side)));
        }
    }
    SkylinePair::from_segments(&lines, Axis::X)
}

/// Extent callback of beams, from their skylines
pub fn beam_extent(grobs : &mut Grobs, me : GrobId, axis : Axis, range : Option<Range>) -> Interval {
    let pair = grobs.vertical_skylines(me, range);
    if pair.is_empty() {
        return Interval::EMPTY;
    }
    match axis {
        Axis::X => Interval::new(pair.left(), pair.right()),
        Axis::Y => Interval::new(pair[Direction::Down].max_height(), pair[Direction::Up].max_height()),
    }
}
