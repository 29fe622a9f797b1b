//! Axis groups: grobs whose extent is the union of their elements' extents.
//!
//! The vertical axis group of a staff additionally owns the skylines of everything in the staff, and the pure
//! heights used to space staves before line breaking.

use std::cmp::Ordering;

use crate::geometry::{Axis, Direction};
use crate::grob::{GrobId, Grobs, Interface, Object, Property, Range};
use crate::interval::Interval;
use crate::skyline::SkylinePair;
use super::outside_staff;

/// Makes `child` an element of `group`, and a child of it along the group's axes where it has no parent yet.
pub fn add_element(grobs : &mut Grobs, group : GrobId, child : GrobId) {
    for axis in grobs.axes(group) {
        if grobs.parent(child, axis).is_none() {
            grobs.set_parent(child, group, axis);
        }
    }
    grobs.add_object(group, Object::Elements, child);
}

/// Whether `g` belongs to another staff than its parent
pub fn is_cross_staff(grobs : &Grobs, g : GrobId) -> bool {
    grobs.flag(g, Property::CrossStaff)
}

/// Whether `g` or one of its vertical ancestors is an outside-staff object
pub fn has_outside_staff_parent(grobs : &Grobs, g : GrobId) -> bool {
    outside_staff_ancestor(grobs, g).is_some()
}

/// The closest of `g` and its vertical ancestors that is an outside-staff object
pub fn outside_staff_ancestor(grobs : &Grobs, g : GrobId) -> Option<GrobId> {
    grobs
        .ancestors(g, Axis::Y)
        .into_iter()
        .find(|&a| grobs.number(a, Property::OutsideStaffPriority).is_some())
}

/// Extent callback of axis groups
pub fn group_extent(grobs : &mut Grobs, me : GrobId, axis : Axis, range : Option<Range>) -> Interval {
    match range {
        Some(range) if axis == Axis::Y => pure_group_height(grobs, me, range),
        _ => generic_group_extent(grobs, me, axis),
    }
}

/// Union of the extents of the live, non cross-staff grobs of `elts`, relative to `common`.
pub fn relative_group_extent(grobs : &mut Grobs, elts : &[GrobId], common : GrobId, axis : Axis, range : Option<Range>) -> Interval {
    let mut r = Interval::EMPTY;
    for &e in elts {
        if !grobs.is_live(e) || is_cross_staff(grobs, e) {
            continue;
        }
        r.unite(grobs.maybe_pure_extent(e, common, axis, range));
    }
    r
}

/// Extent of the group in its own frame, from the actual positions of its elements
pub fn generic_group_extent(grobs : &mut Grobs, me : GrobId, axis : Axis) -> Interval {
    // placing the outside-staff elements moves them
    if axis == Axis::Y && grobs.has_interface(me, Interface::VerticalAxisGroup) {
        grobs.vertical_skylines(me, None);
    }

    let elts = grobs.objects(me, Object::Elements).to_vec();
    let common = match grobs.common_refpoint_of_array(&elts, me, axis) {
        Some(common) => common,
        None => {
            error!("elements of axis group {} have no common reference point", grobs.name(me));
            return Interval::EMPTY;
        },
    };
    let my_coord = grobs.relative_coordinate(me, common, axis);
    relative_group_extent(grobs, &elts, common, axis, None) - my_coord
}

/// Extent of the elements of `me` that live on `staff`, relative to `refp`.
pub fn staff_extent(grobs : &mut Grobs, me : GrobId, refp : GrobId, ext_axis : Axis, staff : GrobId, parent_axis : Axis) -> Interval {
    let elts : Vec<_> = grobs
        .objects(me, Object::Elements)
        .iter()
        .copied()
        .filter(|&e| grobs.common_refpoint(e, staff, parent_axis) == Some(staff))
        .collect();
    relative_group_extent(grobs, &elts, refp, ext_axis, None)
}

/// Estimated height of the group for any line break within `range`, in its own frame
pub fn pure_group_height(grobs : &mut Grobs, me : GrobId, range : Range) -> Interval {
    let elts = grobs.objects(me, Object::Elements).to_vec();
    let common = match grobs.common_refpoint_of_array(&elts, me, Axis::Y) {
        Some(common) => common,
        None => {
            error!("elements of axis group {} have no common reference point", grobs.name(me));
            return Interval::EMPTY;
        },
    };
    let my_coord = grobs.maybe_pure_coordinate(me, common, Axis::Y, Some(range));
    relative_pure_height(grobs, me, common, range) - my_coord
}

/// Estimated height of the elements of `me` visible in `range`, relative to `common`.
///
/// Outside-staff elements are stacked, in priority order, on top of (or below) the height of everything with a lower
/// priority, keeping their `OutsideStaffPadding` from it.
pub fn relative_pure_height(grobs : &mut Grobs, me : GrobId, common : GrobId, range : Range) -> Interval {
    let mut elts : Vec<(f64, GrobId)> = grobs
        .objects(me, Object::Elements)
        .iter()
        .map(|&e| (priority(grobs, e), e))
        .collect();
    elts.sort_by(|a, b| a.0.total_cmp(&b.0));

    let default_padding = grobs.settings().outside_staff_padding;
    let mut r = Interval::EMPTY;
    let mut staff_part : Option<Interval> = None;
    for (_, g) in elts {
        if !grobs.in_range(g, range) || !grobs.is_live(g) {
            continue;
        }
        if is_cross_staff(grobs, g) && grobs.has_interface(g, Interface::Stem) {
            continue;
        }

        let outside_staff = grobs.number(g, Property::OutsideStaffPriority).is_some();
        if outside_staff && staff_part.is_none() {
            staff_part = Some(r);
        }

        let dims = grobs.maybe_pure_extent(g, common, Axis::Y, Some(range));
        if dims.is_empty() {
            continue;
        }
        match staff_part {
            Some(staff_part) if outside_staff => {
                let padding = grobs.robust_number(g, Property::OutsideStaffPadding, default_padding);
                let dir = match grobs.direction(g) {
                    Direction::Center => Direction::Up,
                    dir => dir,
                };
                r.unite(staff_part.union_disjoint(dims, padding, dir));
            },
            _ => r.unite(dims),
        }
    }
    r
}

/// Outside-staff priority, `-∞` for grobs inside the staff
pub(crate) fn priority(grobs : &Grobs, g : GrobId) -> f64 {
    grobs.number(g, Property::OutsideStaffPriority).unwrap_or(f64::NEG_INFINITY)
}

/// Sort key of outside-staff placement: priority, then left edge, then creation order.
/// Grobs without priority only keep their creation order.
pub(crate) fn staff_priority_key(grobs : &mut Grobs, g : GrobId, x_common : GrobId) -> (f64, f64, GrobId) {
    let p = priority(grobs, g);
    let left = if p.is_infinite() { 0. } else { grobs.extent(g, x_common, Axis::X).left };
    (p, left, g)
}

/// Compares keys made by [`staff_priority_key`] ; computing them before sorting keeps lazy extents out of the sort.
pub(crate) fn staff_priority_cmp(a : &(f64, f64, GrobId), b : &(f64, f64, GrobId)) -> Ordering {
    a.0.total_cmp(&b.0)
        .then(a.1.total_cmp(&b.1))
        .then(a.2.cmp(&b.2))
}

/// Skylines callback of vertical axis groups: places the outside-staff elements and returns the skylines of the
/// whole group.
pub fn calc_skylines(grobs : &mut Grobs, me : GrobId, range : Option<Range>) -> SkylinePair {
    let elts = grobs.objects(me, Object::Elements).to_vec();
    outside_staff::skyline_spacing(grobs, me, &elts, range)
}

/// Skylines callback merging the skylines of the elements, without moving any of them.
///
/// For groups whose elements are already placed, such as a group of staves.
pub fn combine_skylines(grobs : &mut Grobs, me : GrobId, range : Option<Range>) -> SkylinePair {
    let elts = grobs.objects(me, Object::Elements).to_vec();
    let y_common = grobs.common_refpoint_of_array(&elts, me, Axis::Y);
    let x_common = grobs.common_refpoint_of_array(&elts, me, Axis::X);
    if y_common != Some(me) {
        error!("combining skylines that do not belong to group {}", grobs.name(me));
        return SkylinePair::new();
    }
    let x_common = x_common.unwrap_or(me);

    let mut ret = SkylinePair::new();
    for e in elts {
        if !grobs.is_live(e) {
            continue;
        }
        let mut pair = grobs.vertical_skylines(e, range);
        let y = grobs.maybe_pure_coordinate(e, me, Axis::Y, range);
        let x = grobs.relative_coordinate(e, x_common, Axis::X);
        pair.raise(y);
        pair.shift(x);
        ret.merge(&pair);
    }
    let my_x = grobs.relative_coordinate(me, x_common, Axis::X);
    ret.shift(-my_x);
    ret
}

/// Vertical distance between the bottom of `g1` and the top of `g2`, from their skylines ; 0 if either has none.
///
/// Along X, the distance between the right edge of `g1` and the left edge of `g2`.
pub fn minimum_distance(grobs : &mut Grobs, g1 : GrobId, g2 : GrobId, axis : Axis) -> f64 {
    match axis {
        Axis::Y => {
            if !grobs.has_skylines(g1) || !grobs.has_skylines(g2) {
                return 0.;
            }
            let s1 = grobs.vertical_skylines(g1, None);
            let s2 = grobs.vertical_skylines(g2, None);
            s1[Direction::Down].distance(&s2[Direction::Up], 0.)
        },
        Axis::X => {
            let s1 = super::compute_skyline_pair(grobs, g1, Axis::X, None);
            let s2 = super::compute_skyline_pair(grobs, g2, Axis::X, None);
            let d = s1[Direction::RIGHT].distance(&s2[Direction::LEFT], 0.);
            if d.is_finite() { d } else { 0. }
        },
    }
}

/// `me` followed by everything below it in the tree of axis groups, depth first.
pub fn get_children(grobs : &Grobs, me : GrobId) -> Vec<GrobId> {
    let mut found = Vec::new();
    let mut stack = vec![me];
    while let Some(g) = stack.pop() {
        if found.contains(&g) {
            continue;
        }
        found.push(g);
        if grobs.has_interface(g, Interface::AxisGroup) || grobs.has_interface(g, Interface::VerticalAxisGroup) {
            stack.extend(grobs.objects(g, Object::Elements).iter().rev());
        }
    }
    found
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutSettings;

    fn staff_group(grobs : &mut Grobs) -> GrobId {
        let group = grobs.add_grob("VerticalAxisGroup");
        grobs.add_interface(group, Interface::AxisGroup);
        grobs.add_interface(group, Interface::VerticalAxisGroup);
        group
    }

    fn leaf(grobs : &mut Grobs, name : &str, x : (f64, f64), y : (f64, f64)) -> GrobId {
        let g = grobs.add_grob(name);
        grobs.set_extent(g, Axis::X, Interval::new(x.0, x.1));
        grobs.set_extent(g, Axis::Y, Interval::new(y.0, y.1));
        g
    }

    #[test]
    fn extent_is_union_of_elements() {
        let mut grobs = Grobs::new(LayoutSettings::default());
        let group = grobs.add_grob("NoteColumn");
        grobs.add_interface(group, Interface::AxisGroup);
        let a = leaf(&mut grobs, "NoteHead", (0., 1.), (-0.5, 0.5));
        let b = leaf(&mut grobs, "NoteHead", (0., 1.), (-0.5, 0.5));
        add_element(&mut grobs, group, a);
        add_element(&mut grobs, group, b);
        grobs.set_offset(b, Axis::Y, 2.);

        assert_eq!(grobs.parent(a, Axis::X), Some(group));
        assert_eq!(grobs.own_extent(group, Axis::Y), Interval::new(-0.5, 2.5));
        assert_eq!(grobs.own_extent(group, Axis::X), Interval::new(0., 1.));
    }

    #[test]
    fn cross_staff_elements_are_ignored() {
        let mut grobs = Grobs::new(LayoutSettings::default());
        let group = grobs.add_grob("NoteColumn");
        grobs.add_interface(group, Interface::AxisGroup);
        let a = leaf(&mut grobs, "NoteHead", (0., 1.), (-0.5, 0.5));
        let b = leaf(&mut grobs, "Stem", (0., 0.1), (-8., 0.));
        grobs.set_property(b, Property::CrossStaff, true).unwrap();
        add_element(&mut grobs, group, a);
        add_element(&mut grobs, group, b);

        assert_eq!(grobs.own_extent(group, Axis::Y), Interval::new(-0.5, 0.5));
    }

    #[test]
    fn pure_height_stacks_outside_staff_elements() {
        let mut grobs = Grobs::new(LayoutSettings::default());
        let group = staff_group(&mut grobs);
        let staff = leaf(&mut grobs, "StaffSymbol", (0., 20.), (-2., 2.));
        // overlaps the staff, but is stacked above it
        let script = leaf(&mut grobs, "TextScript", (3., 5.), (1., 2.));
        grobs.set_property(script, Property::OutsideStaffPriority, 450.).unwrap();
        grobs.set_property(script, Property::Direction, Direction::Up).unwrap();
        // only visible from column 10
        let late = leaf(&mut grobs, "TextScript", (3., 5.), (-10., -9.));
        grobs.set_rank_span(late, 10, 12);
        for g in [script, staff, late] {
            add_element(&mut grobs, group, g);
        }

        let range = Range::new(0, 5);
        let height = grobs.maybe_pure_own_extent(group, Axis::Y, Some(range));
        assert_eq!(height, Interval::new(-2., 3.5));
        // the unpure extent is not affected by the estimate
        assert_eq!(grobs.own_extent(staff, Axis::Y), Interval::new(-2., 2.));
    }

    #[test]
    fn priority_order() {
        let mut grobs = Grobs::new(LayoutSettings::default());
        let group = staff_group(&mut grobs);
        let inside = leaf(&mut grobs, "NoteHead", (0., 1.), (0., 1.));
        let right = leaf(&mut grobs, "TextScript", (6., 7.), (0., 1.));
        let left = leaf(&mut grobs, "TextScript", (2., 3.), (0., 1.));
        let high = leaf(&mut grobs, "DynamicText", (0., 1.), (0., 1.));
        for (g, p) in [(right, 100.), (left, 100.), (high, 200.)] {
            grobs.set_property(g, Property::OutsideStaffPriority, p).unwrap();
        }
        for g in [inside, right, left, high] {
            add_element(&mut grobs, group, g);
        }

        let mut keys : Vec<_> = [high, right, inside, left]
            .iter()
            .map(|&g| staff_priority_key(&mut grobs, g, group))
            .collect();
        keys.sort_by(staff_priority_cmp);
        let elts : Vec<GrobId> = keys.iter().map(|k| k.2).collect();
        assert_eq!(elts, vec![inside, left, right, high]);
    }

    #[test]
    fn children_of_nested_groups() {
        let mut grobs = Grobs::new(LayoutSettings::default());
        let system = grobs.add_grob("System");
        grobs.add_interface(system, Interface::AxisGroup);
        let staff = staff_group(&mut grobs);
        let column = grobs.add_grob("NoteColumn");
        grobs.add_interface(column, Interface::AxisGroup);
        let head = leaf(&mut grobs, "NoteHead", (0., 1.), (0., 1.));
        let other = leaf(&mut grobs, "BarLine", (0., 1.), (0., 1.));

        add_element(&mut grobs, system, staff);
        add_element(&mut grobs, staff, column);
        add_element(&mut grobs, column, head);
        add_element(&mut grobs, staff, other);

        assert_eq!(get_children(&grobs, system), vec![system, staff, column, head, other]);
    }

    #[test]
    fn distance_between_staves() {
        let mut grobs = Grobs::new(LayoutSettings::default());
        let system = grobs.add_grob("System");
        let upper = staff_group(&mut grobs);
        let lower = staff_group(&mut grobs);
        let a = leaf(&mut grobs, "StaffSymbol", (0., 20.), (-2., 2.));
        let b = leaf(&mut grobs, "StaffSymbol", (0., 20.), (-2., 2.));
        add_element(&mut grobs, upper, a);
        add_element(&mut grobs, lower, b);
        grobs.set_parent(upper, system, Axis::Y);
        grobs.set_parent(lower, system, Axis::Y);

        assert_eq!(minimum_distance(&mut grobs, upper, lower, Axis::Y), 4.);
        let lonely = leaf(&mut grobs, "TextScript", (0., 1.), (0., 1.));
        assert_eq!(minimum_distance(&mut grobs, upper, lonely, Axis::Y), 0.);
    }

    #[test]
    fn skylines_of_a_system() {
        let mut grobs = Grobs::new(LayoutSettings::default());
        let system = grobs.add_grob("System");
        grobs.add_interface(system, Interface::AxisGroup);
        grobs.set_skylines_callback(system, Some(combine_skylines));
        let upper = staff_group(&mut grobs);
        let lower = staff_group(&mut grobs);
        let a = leaf(&mut grobs, "StaffSymbol", (0., 20.), (-2., 2.));
        let b = leaf(&mut grobs, "StaffSymbol", (0., 20.), (-2., 2.));
        add_element(&mut grobs, upper, a);
        add_element(&mut grobs, lower, b);
        add_element(&mut grobs, system, upper);
        add_element(&mut grobs, system, lower);
        grobs.set_offset(lower, Axis::Y, -8.);

        let skylines = grobs.vertical_skylines(system, None);
        assert_eq!(skylines[Direction::Up].height(10.), 2.);
        assert_eq!(skylines[Direction::Down].height(10.), -10.);
        // the staves did not move
        assert_eq!(grobs.offset(upper, Axis::Y), 0.);
    }
}
