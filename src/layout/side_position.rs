//! Side positioning: placing an object (a script, a fingering, a dynamic) next to a set of supports.
//!
//! The object is placed in its `Direction` along its side axis, just clear of its supports, plus `Padding` staff
//! spaces. Along Y, it is also kept `StaffPadding` staff spaces away from the staff, or snapped between staff lines
//! when `QuantizePosition` is set.

use crate::dimensions::{units::HalfSpace, Unit};
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{Axis, BBox, Direction};
use crate::grob::{GrobId, Grobs, Interface, Object, Property, Range};
use crate::interval::Interval;
use crate::skyline::Skyline;
use super::staff;

/// Adds `support` to the objects `me` is placed against
pub fn add_support(grobs : &mut Grobs, me : GrobId, support : GrobId) {
    grobs.add_object(me, Object::SideSupportElements, support);
}

/// Places `me` along `axis`, unless it already has a side axis.
pub fn set_axis(grobs : &mut Grobs, me : GrobId, axis : Axis) {
    if grobs.axis(me, Property::SideAxis).is_some() {
        return;
    }
    grobs.put(me, Property::SideAxis, axis);
    grobs.set_offset_callback(me, axis, Some(aligned_side_callback));
}

pub fn get_axis(grobs : &Grobs, me : GrobId) -> Option<Axis> {
    let axis = grobs.axis(me, Property::SideAxis);
    if axis.is_none() {
        error!("side axis not set for grob {}", grobs.name(me));
    }
    axis
}

/// Whether `me` is placed against objects on another staff than its own
pub fn calc_cross_staff(grobs : &Grobs, me : GrobId) -> bool {
    let supports = grobs.objects(me, Object::SideSupportElements);
    if supports.iter().any(|&s| grobs.flag(s, Property::CrossStaff)) {
        return true;
    }
    let parent = grobs.parent(me, Axis::Y);
    match parent {
        Some(parent) => grobs.common_refpoint_of_array(supports, parent, Axis::Y) != Some(parent),
        None => false,
    }
}

/// Offset callback of side-positioned objects ; errors are logged and give a zero offset.
pub fn aligned_side_callback(grobs : &mut Grobs, me : GrobId, axis : Axis, range : Option<Range>) -> f64 {
    match aligned_side(grobs, me, axis, range, None) {
        Ok(offset) => offset,
        Err(e) => {
            error!("{}", e);
            0.
        },
    }
}

/// Offset callback placing `me` on the reference points of its supports, ignoring their extents and its own.
pub fn aligned_on_support_refpoints(grobs : &mut Grobs, me : GrobId, axis : Axis, range : Option<Range>) -> f64 {
    match general_side_position(grobs, me, axis, false, false, range, None) {
        Ok(offset) => offset,
        Err(e) => {
            error!("{}", e);
            0.
        },
    }
}

/// Offset of `me` along `axis` relative to its parent, using skylines if its `UseSkylines` flag is set.
///
/// `current_offset`, if given, is a minimum: the object is never moved back towards the supports.
pub fn aligned_side(grobs : &mut Grobs, me : GrobId, axis : Axis, range : Option<Range>, current_offset : Option<f64>) -> LayoutResult<f64> {
    let use_skylines = grobs.flag(me, Property::UseSkylines);
    aligned_side_with(grobs, me, axis, range, current_offset, use_skylines)
}

pub(crate) fn aligned_side_with(
    grobs          : &mut Grobs,
    me             : GrobId,
    axis           : Axis,
    range          : Option<Range>,
    current_offset : Option<f64>,
    use_skylines   : bool,
) -> LayoutResult<f64> {
    let dir = grobs.direction(me);
    let mut o = if use_skylines && range.is_none() {
        skyline_side_position(grobs, me, axis, current_offset)?
    }
    else {
        general_side_position(grobs, me, axis, true, true, range, current_offset)?
    };

    let staff = match staff::get_staff_symbol(grobs, me) {
        Some(staff) if axis == Axis::Y => staff,
        _ => return Ok(o),
    };
    let (parent, common) = match (grobs.parent(me, Axis::Y), grobs.common_refpoint(me, staff, Axis::Y)) {
        (Some(parent), Some(common)) => (parent, common),
        _ => return Ok(o),
    };

    if grobs.flag(me, Property::QuantizePosition) {
        let my_off = grobs.maybe_pure_coordinate(parent, common, Axis::Y, range);
        let staff_off = grobs.maybe_pure_coordinate(staff, common, Axis::Y, range);
        let ss = staff::staff_space(grobs, staff);
        let position = Unit::<HalfSpace>::new(2. * (my_off + o - staff_off) / ss);
        let rounded = position.directed_round(dir.sign());

        // below ledger lines, quantize even outside the staff
        let head_is_further = match grobs.parent(me, Axis::X) {
            Some(head) if grobs.has_interface(head, Interface::NoteHead) =>
                staff::get_position(grobs, head).abs() > position.abs(),
            _ => false,
        };
        let radius = staff::staff_radius(grobs, me).to_staff_position();
        if position.abs() <= radius + Unit::new(1.) || head_is_further {
            o += (rounded - position).to_spaces().to_unitless() * ss;
            if staff::on_line(grobs, me, rounded.to_unitless() as i64) {
                o += dir.sign() * 0.5 * ss;
            }
        }
    }
    else if let (Some(staff_padding), false) = (grobs.number(me, Property::StaffPadding), dir.is_center()) {
        let d = dir.sign();
        let iv = grobs.maybe_pure_own_extent(me, axis, range);
        let staff_padding = staff::staff_space(grobs, me) * staff_padding;
        let parent_position = grobs.maybe_pure_coordinate(parent, common, Axis::Y, range);
        let staff_position = grobs.maybe_pure_coordinate(staff, common, Axis::Y, range);
        let staff_extent = grobs.maybe_pure_own_extent(staff, axis, range);
        let my_edge = if iv.is_empty() { 0. } else { iv.at(-dir) };
        let diff = d * staff_extent.at(dir) + staff_padding - d * (o + my_edge) + d * (staff_position - parent_position);
        o += d * diff.max(0.);
    }
    Ok(o)
}

/// Offset of `me` relative to its parent along `axis` that puts it just beside the union of its supports' extents
/// (or reference points, without `use_extents`).
pub fn general_side_position(
    grobs             : &mut Grobs,
    me                : GrobId,
    axis              : Axis,
    use_extents       : bool,
    include_my_extent : bool,
    range             : Option<Range>,
    current_offset    : Option<f64>,
) -> LayoutResult<f64> {
    let supports = live_supports(grobs, me);
    let parent = match grobs.parent(me, axis) {
        Some(parent) => parent,
        None => {
            error!("side-positioned grob {} has no parent", grobs.name(me));
            return Ok(0.);
        },
    };
    let mut common = match grobs.common_refpoint_of_array(&supports, parent, axis) {
        Some(common) => common,
        None => {
            error!("supports of grob {} have no common reference point", grobs.name(me));
            return Ok(0.);
        },
    };

    let mut dir = grobs.direction(me);
    let staff_symbol = staff::get_staff_symbol(grobs, me);
    let include_staff = axis == Axis::Y
        && grobs.number(me, Property::StaffPadding).is_some()
        && !grobs.flag(me, Property::QuantizePosition);

    let mut dim = Interval::EMPTY;
    if let (Some(staff), true) = (staff_symbol, include_staff) {
        if let Some(with_staff) = grobs.common_refpoint(staff, common, Axis::Y) {
            common = with_staff;
            dim.unite(grobs.maybe_pure_extent(staff, common, Axis::Y, range));
        }
    }

    for e in supports {
        // stems pointing away from me are placed against their heads instead
        if axis == Axis::Y && grobs.has_interface(e, Interface::Stem) && dir == -grobs.direction(e) {
            continue;
        }
        if use_extents {
            dim.unite(grobs.maybe_pure_extent(e, common, axis, range));
        }
        else {
            dim.add_point(grobs.maybe_pure_coordinate(e, common, axis, range));
        }
    }
    if dim.is_empty() {
        dim = Interval::point(0.);
    }

    let off = grobs.maybe_pure_coordinate(parent, common, axis, range);
    let mut total = dim.linear_combination(dir.sign()) - off;

    if include_my_extent {
        let iv = grobs.maybe_pure_own_extent(me, axis, range);
        if !iv.is_empty() {
            if dir.is_center() {
                error!("direction unknown for grob {}", grobs.name(me));
                dir = Direction::Down;
            }
            total += -iv.at(-dir);
        }
    }

    finish_offset(grobs, me, dir, total, current_offset)
}

/// Offset of `me` relative to its parent along `axis` that puts its skyline just clear of its supports' skylines.
pub fn skyline_side_position(grobs : &mut Grobs, me : GrobId, axis : Axis, current_offset : Option<f64>) -> LayoutResult<f64> {
    let dir = grobs.direction(me);
    if dir.is_center() {
        return general_side_position(grobs, me, axis, true, true, None, current_offset);
    }
    let supports = live_supports(grobs, me);
    let parent = match grobs.parent(me, axis) {
        Some(parent) => parent,
        None => {
            error!("side-positioned grob {} has no parent", grobs.name(me));
            return Ok(0.);
        },
    };

    let mut common = [me; 2];
    for ax in Axis::ALL {
        let start = if ax == axis { parent } else { me };
        match grobs.common_refpoint_of_array(&supports, start, ax) {
            Some(c) => common[ax.index()] = c,
            None => {
                error!("supports of grob {} have no common reference point", grobs.name(me));
                return Ok(0.);
            },
        }
    }

    let staff_symbol = staff::get_staff_symbol(grobs, me);
    let include_staff = axis == Axis::Y
        && grobs.number(me, Property::StaffPadding).is_some()
        && !grobs.flag(me, Property::QuantizePosition);
    let staff_symbol = staff_symbol.filter(|_| include_staff);
    if let Some(staff) = staff_symbol {
        if let Some(c) = grobs.common_refpoint(staff, common[Axis::Y.index()], Axis::Y) {
            common[Axis::Y.index()] = c;
        }
    }
    let horizon = axis.other();

    // my own outline, at offset 0
    let my_dim = if axis == Axis::Y && grobs.has_skylines(me) {
        let mut pair = grobs.vertical_skylines(me, None);
        let x = grobs.relative_coordinate(me, common[Axis::X.index()], Axis::X);
        let y = grobs.relative_coordinate(parent, common[Axis::Y.index()], Axis::Y);
        pair.shift(x);
        pair.raise(y);
        pair[-dir].clone()
    }
    else {
        let mut b = BBox::default();
        for ax in Axis::ALL {
            *b.extent_mut(ax) = if ax == axis {
                grobs.own_extent(me, ax) + grobs.relative_coordinate(parent, common[ax.index()], ax)
            }
            else {
                grobs.extent(me, common[ax.index()], ax)
            };
        }
        if b.is_empty() {
            return Ok(0.);
        }
        Skyline::from_box(&b, 0., horizon, -dir)
    };

    // the supports' outline
    let mut boxes = Vec::new();
    let mut pairs = Vec::new();
    let mut min_h = if dir == Direction::Down { f64::INFINITY } else { f64::NEG_INFINITY };
    let mut note_columns : Vec<(GrobId, BBox)> = Vec::new();
    let add_stem_support = grobs.flag(me, Property::AddStemSupport);
    for e in supports {
        if axis == Axis::Y && grobs.has_interface(e, Interface::Stem) && dir == -grobs.direction(e) {
            continue;
        }

        let mut b = BBox::default();
        for ax in Axis::ALL {
            *b.extent_mut(ax) = grobs.extent(e, common[ax.index()], ax);
        }

        let column = grobs.parent(e, Axis::X).filter(|&p| grobs.has_interface(p, Interface::NoteColumn));
        if let (true, Some(column)) = (add_stem_support, column) {
            match note_columns.iter_mut().find(|(c, _)| *c == column) {
                Some((_, united)) => *united = united.union(&b),
                None => note_columns.push((column, b)),
            }
            continue;
        }

        if axis == Axis::Y && grobs.has_skylines(e) {
            let mut pair = grobs.vertical_skylines(e, None);
            let x = grobs.relative_coordinate(e, common[Axis::X.index()], Axis::X);
            let y = grobs.relative_coordinate(e, common[Axis::Y.index()], Axis::Y);
            pair.shift(x);
            pair.raise(y);
            pairs.push(pair);
            continue;
        }

        if b.is_empty() {
            continue;
        }
        let bottom = b.extent(axis).at(-dir);
        min_h = if dir == Direction::Up { min_h.max(bottom) } else { min_h.min(bottom) };
        boxes.push(b);
    }
    boxes.extend(note_columns.into_iter().map(|(_, b)| b).filter(|b| !b.is_empty()));

    let mut dim = Skyline::from_boxes(&boxes, 0., horizon, dir);
    if !pairs.is_empty() {
        dim.merge(&Skyline::from_pairs(&pairs, dir));
    }
    dim.set_minimum_height(if boxes.is_empty() { 0. } else { min_h });

    if let Some(staff) = staff_symbol {
        let staff_extent = grobs.extent(staff, common[Axis::Y.index()], Axis::Y);
        if !staff_extent.is_empty() {
            let edge = staff_extent.at(dir);
            dim.set_minimum_height(if dir == Direction::Up { min_h.max(edge) } else { min_h.min(edge) });
        }
    }

    let dist = dim.distance(&my_dim, 0.);
    let total = if dist.is_finite() { dir.sign() * dist } else { 0. };
    finish_offset(grobs, me, dir, total, current_offset)
}

/// Adds the padding, enforces the minimum space and the current offset, and checks the result is plausible.
pub fn finish_offset(grobs : &Grobs, me : GrobId, dir : Direction, total : f64, current_offset : Option<f64>) -> LayoutResult<f64> {
    let ss = staff::staff_space(grobs, me);
    let d = dir.sign();
    let minimum_space = ss * grobs.robust_number(me, Property::MinimumSpace, -1.);
    let mut total = total + d * ss * grobs.robust_number(me, Property::Padding, 0.);

    if minimum_space >= 0. && !dir.is_center() && total * d < minimum_space {
        total = minimum_space * d;
    }
    if let Some(current) = current_offset {
        total = d * (d * total).max(d * current);
    }

    if total.abs() > grobs.settings().improbable_offset {
        error!("improbable offset for grob {}: {}", grobs.name(me), total);
        if grobs.settings().strict_infinity_checking {
            return Err(LayoutError::ImprobableOffset { grob : grobs.name(me).to_string(), offset : total });
        }
    }
    Ok(total)
}

fn live_supports(grobs : &Grobs, me : GrobId) -> Vec<GrobId> {
    grobs
        .objects(me, Object::SideSupportElements)
        .iter()
        .copied()
        .filter(|&s| grobs.is_live(s))
        .collect()
}
