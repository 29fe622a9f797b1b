//! What the beam needs to know about its stems.
//!
//! Stems are not laid out by this crate: their note heads (`HeadPositions`) and preferred lengths (`IdealY`, `ShortestY`)
//! are given by the caller. Missing lengths are derived from the outer note head.

use crate::geometry::Direction;
use crate::grob::{GrobId, Grobs, Object, Property};
use crate::interval::Interval;
use crate::layout::constants::{IDEAL_STEM_LENGTH, NEUTRAL_DIRECTION, SHORTEST_STEM_LENGTH};
use crate::layout::staff;

/// Where the beam would like a stem to end, relative to the stem, in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StemInfo {
    /// preferred end
    pub ideal_y    : f64,
    /// the stem may not end closer to its note heads than this
    pub shortest_y : f64,
}

/// Lowest and highest note head, in staff positions ; empty for stems without heads.
pub fn head_positions(grobs : &Grobs, stem : GrobId) -> Interval {
    grobs.interval(stem, Property::HeadPositions).unwrap_or(Interval::EMPTY)
}

/// A stem that takes part in the beam layout: live, not a grace note, and with note heads.
pub fn is_normal_stem(grobs : &Grobs, stem : GrobId) -> bool {
    grobs.is_live(stem) && !grobs.flag(stem, Property::Grace) && !head_positions(grobs, stem).is_empty()
}

pub fn is_invisible(grobs : &Grobs, stem : GrobId) -> bool {
    !grobs.is_live(stem) || grobs.flag(stem, Property::Transparent)
}

/// Whether the direction of the stem was given rather than computed by a beam
pub fn has_forced_direction(grobs : &Grobs, stem : GrobId) -> bool {
    !grobs.direction(stem).is_center()
}

/// The direction the stem would take on its own: away from the note head furthest from the middle line.
pub fn default_direction(grobs : &Grobs, stem : GrobId) -> Direction {
    let hp = head_positions(grobs, stem);
    if hp.is_empty() {
        return Direction::Center;
    }
    let up_distance = hp.right;
    let down_distance = -hp.left;
    Direction::from_sign(down_distance - up_distance)
}

/// The direction of the stem, falling back on its default and neutral directions.
pub fn direction(grobs : &Grobs, stem : GrobId) -> Direction {
    let dir = grobs.direction(stem);
    if !dir.is_center() {
        return dir;
    }
    match default_direction(grobs, stem) {
        Direction::Center => grobs.direction_property(stem, Property::NeutralDirection).unwrap_or(NEUTRAL_DIRECTION),
        dir => dir,
    }
}

/// Height of the note head at the beam end of the stem, relative to the stem's staff
pub fn chord_start_y(grobs : &Grobs, stem : GrobId) -> f64 {
    let hp = head_positions(grobs, stem);
    if hp.is_empty() {
        return 0.;
    }
    hp.at(direction(grobs, stem)) * staff::staff_space(grobs, stem) / 2.
}

pub fn stem_info(grobs : &Grobs, stem : GrobId) -> StemInfo {
    let dir = direction(grobs, stem).sign();
    let ss = staff::staff_space(grobs, stem);
    let ideal_y = grobs
        .number(stem, Property::IdealY)
        .unwrap_or_else(|| chord_start_y(grobs, stem) + dir * IDEAL_STEM_LENGTH.to_unitless() * ss);
    let shortest_y = grobs
        .number(stem, Property::ShortestY)
        .unwrap_or(ideal_y - dir * (IDEAL_STEM_LENGTH - SHORTEST_STEM_LENGTH).to_unitless() * ss);
    StemInfo { ideal_y, shortest_y }
}

/// Lowest and highest beam rank on the stem, both sides together
pub fn beam_multiplicity(grobs : &Grobs, stem : GrobId) -> Option<(i32, i32)> {
    let beaming = grobs.beaming(stem)?;
    let ranks = beaming.left.iter().chain(beaming.right.iter());
    let lo = ranks.clone().min()?;
    let hi = ranks.max()?;
    Some((*lo, *hi))
}

/// Number of beams the stem carries
pub fn beam_count(grobs : &Grobs, stem : GrobId) -> i32 {
    beam_multiplicity(grobs, stem).map_or(0, |(lo, hi)| hi - lo + 1)
}

/// The beam ranks present on both sides of the stem
pub fn whole_beams(grobs : &Grobs, stem : GrobId) -> Option<(i32, i32)> {
    let beaming = grobs.beaming(stem)?;
    let shared = beaming.left.iter().filter(|r| beaming.right.contains(r));
    let lo = shared.clone().min()?;
    let hi = shared.max()?;
    Some((*lo, *hi))
}

/// Records the end of the stem, in staff positions
pub fn set_stem_end(grobs : &mut Grobs, stem : GrobId, position : f64) {
    grobs.put(stem, Property::StemEndPosition, position);
}

/// The beam of the stem, if it has one
pub fn get_beam(grobs : &Grobs, stem : GrobId) -> Option<GrobId> {
    grobs.object(stem, Object::Beam)
}
