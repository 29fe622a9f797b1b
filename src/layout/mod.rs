//! Vertical layout of grobs: extents of axis groups, outside-staff placement and side positioning.
//!
//! The functions of this module are the entry points of the layout core. They all work on a [`Grobs`] arena:
//!
//!  - [`compute_extent`] and [`compute_skyline_pair`] measure a grob, possibly for a range of columns ("pure" queries).
//!  - [`place_outside_staff`] stacks the outside-staff members of a staff group in priority order.
//!  - [`position_beside`] places an object next to a set of supports.
//!  - [`quant_beam`] runs the whole beam pipeline: direction, slope, quanting and stem lengths.
//!
//! How far things are kept from each other is controlled by the [`LayoutSettings`] the arena was created with,
//! unless a grob carries its own value.

pub mod constants;
pub mod staff;
pub mod axis_group;
pub mod outside_staff;
pub mod side_position;

use crate::error::LayoutResult;
use crate::geometry::{Axis, BBox};
use crate::grob::{GrobId, Grobs, Object, Range};
use crate::interval::Interval;
use crate::skyline::SkylinePair;
use crate::beam;

/// Global parameters of the layout core.
///
/// Every field has a default, so a partial settings file deserializes to sensible values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Log the skylines computed for staff groups
    pub debug_skylines                   : bool,
    /// Improbable offsets are errors instead of warnings
    pub strict_infinity_checking         : bool,
    /// Horizontal padding of boxes in the skyline of a staff group
    pub skyline_horizontal_padding       : f64,
    /// Vertical distance between outside-staff objects
    pub outside_staff_padding            : f64,
    /// Horizontal distance between outside-staff objects
    pub outside_staff_horizontal_padding : f64,
    /// Offsets beyond this are reported
    pub improbable_offset                : f64,
    /// Weights of the beam quanting demerits
    pub beam                             : BeamQuanting,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            debug_skylines                   : false,
            strict_infinity_checking         : false,
            skyline_horizontal_padding       : constants::SKYLINE_HORIZONTAL_PADDING,
            outside_staff_padding            : constants::OUTSIDE_STAFF_PADDING,
            outside_staff_horizontal_padding : constants::OUTSIDE_STAFF_HORIZONTAL_PADDING,
            improbable_offset                : constants::IMPROBABLE_OFFSET,
            beam                             : BeamQuanting::default(),
        }
    }
}

/// Weights of the demerits used to choose quantized beam positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamQuanting {
    /// Number of staff spaces explored on each side of the unquanted position
    pub region_size                : i32,
    pub stem_length_demerit_factor : f64,
    /// Demerit per staff space of stems shorter than their shortest length
    pub stem_length_limit_penalty  : f64,
    /// Demerit of a slope going against the damped slope
    pub damping_direction_penalty  : f64,
    /// Demerit of a horizontal beam where the damped slope is almost horizontal
    pub hint_direction_penalty     : f64,
    /// Demerit per staff space of slope beyond the least squares slope
    pub musical_direction_factor   : f64,
    /// Demerit per staff space of distance to the damped slope
    pub ideal_slope_factor         : f64,
    /// Damped slopes below this count as horizontal
    pub round_to_zero_slope        : f64,
    pub collision_penalty          : f64,
    /// Demerit per staff position crossed beyond the damped slope
    pub staff_crossing_penalty     : f64,
}

impl Default for BeamQuanting {
    fn default() -> Self {
        Self {
            region_size                : 2,
            stem_length_demerit_factor : 5.,
            stem_length_limit_penalty  : 5000.,
            damping_direction_penalty  : 800.,
            hint_direction_penalty     : 20.,
            musical_direction_factor   : 400.,
            ideal_slope_factor         : 10.,
            round_to_zero_slope        : 0.02,
            collision_penalty          : 500.,
            staff_crossing_penalty     : 20.,
        }
    }
}

/// What an object placed beside its supports is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideStrategy {
    /// The union of the supports' extents
    Extents,
    /// The supports' skylines, for a tighter fit
    Skylines,
}

/// Extent of `object` along `axis`, relative to `refp`, estimated for the columns of `range` if given.
pub fn compute_extent(grobs : &mut Grobs, object : GrobId, axis : Axis, refp : GrobId, range : Option<Range>) -> Interval {
    grobs.maybe_pure_extent(object, refp, axis, range)
}

/// Skylines of `object` in its own frame.
///
/// On `Axis::Y` these are the vertical skylines (horizon along X) ; on `Axis::X` the horizontal ones (horizon along Y),
/// which are always built from the object's extents.
pub fn compute_skyline_pair(grobs : &mut Grobs, object : GrobId, axis : Axis, range : Option<Range>) -> SkylinePair {
    match axis {
        Axis::Y => grobs.vertical_skylines(object, range),
        Axis::X => {
            let b = BBox::new(
                grobs.own_extent(object, Axis::X),
                grobs.maybe_pure_own_extent(object, Axis::Y, range),
            );
            SkylinePair::from_box(&b, 0., Axis::Y)
        },
    }
}

/// Places the outside-staff members of `children` around the rest of `group`, and returns the vertical offset of
/// every child relative to its parent after placement.
///
/// The children become elements of the group if they are not already.
pub fn place_outside_staff(grobs : &mut Grobs, group : GrobId, children : &[GrobId]) -> Vec<(GrobId, f64)> {
    for &child in children {
        axis_group::add_element(grobs, group, child);
    }
    let elements = grobs.objects(group, Object::Elements).to_vec();
    let skylines = outside_staff::skyline_spacing(grobs, group, &elements, None);
    grobs.set_skylines(group, skylines);

    children
        .iter()
        .map(|&child| (child, grobs.offset(child, Axis::Y)))
        .collect()
}

/// Offset of `object` along `axis` relative to its parent that puts it beside `supports`, in the object's `Direction`.
///
/// The supports are added to the object's side supports. The offset is returned, not stored.
pub fn position_beside(grobs : &mut Grobs, object : GrobId, supports : &[GrobId], axis : Axis, strategy : SideStrategy) -> LayoutResult<f64> {
    for &support in supports {
        side_position::add_support(grobs, object, support);
    }
    let use_skylines = strategy == SideStrategy::Skylines;
    side_position::aligned_side_with(grobs, object, axis, None, None, use_skylines)
}

/// Computes the quantized positions of `beam`, left and right end, in staff spaces relative to the beam.
///
/// When `initial` is given, it replaces the slope computed from the ideal stem lengths. Stem directions and stem
/// lengths are updated along the way. Returns `None` if the beam was removed (fewer than two normal stems).
pub fn quant_beam(grobs : &mut Grobs, beam : GrobId, initial : Option<(f64, f64)>) -> Option<(f64, f64)> {
    let initial = initial.map(|(left, right)| Interval::new(left, right));
    beam::calc_positions(grobs, beam, initial).map(|pos| (pos.left, pos.right))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings() {
        let settings : LayoutSettings = serde_json::from_str(r#"{ "outside_staff_padding" : 0.75, "beam" : { "region_size" : 3 } }"#).unwrap();
        assert_eq!(settings.outside_staff_padding, 0.75);
        assert_eq!(settings.skyline_horizontal_padding, constants::SKYLINE_HORIZONTAL_PADDING);
        assert_eq!(settings.beam.region_size, 3);
        assert_eq!(settings.beam.collision_penalty, 500.);
        assert!(!settings.strict_infinity_checking);
    }

    #[test]
    fn horizontal_skylines_follow_extents() {
        let mut grobs = Grobs::new(LayoutSettings::default());
        let g = grobs.add_grob("Accidental");
        grobs.set_extent(g, Axis::X, Interval::new(-1., 0.));
        grobs.set_extent(g, Axis::Y, Interval::new(-1.5, 1.5));

        let pair = compute_skyline_pair(&mut grobs, g, Axis::X, None);
        // horizon along Y: the up skyline is the right edge
        assert_eq!(pair[crate::geometry::Direction::Up].height(0.), 0.);
        assert_eq!(pair[crate::geometry::Direction::Down].height(0.), -1.);
        assert_eq!(pair.left(), -1.5);
        assert_eq!(pair.right(), 1.5);
    }
}
