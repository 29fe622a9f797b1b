//! Outside-staff placement: stacking dynamics, text scripts and the like around a staff.
//!
//! Everything inside the staff (notes, stems, staff lines) is collected in one skyline pair. The outside-staff
//! objects are then placed tier by tier, in increasing priority. Each object is moved away from the staff, in its
//! direction, until it clears the staff and every object already placed on the same side.
//! Objects of the same priority are placed left to right ; an object overlapping horizontally with the previous one
//! of its tier is deferred to a later pass, so that both end up stacked rather than side by side.

use crate::geometry::{Axis, BBox, Direction};
use crate::grob::{GrobId, Grobs, Object, Property, Range};
use crate::interval::IntervalSet;
use crate::skyline::{SkylinePair, EPS};
use super::axis_group::{self, is_cross_staff, priority};
use super::constants::MAX_OUTSIDE_STAFF_ROUNDS;

/// An outside-staff object already placed, with its skylines in the frame of the group
struct Placed {
    dir      : Direction,
    skylines : SkylinePair,
}

/// Frames the group works in
#[derive(Clone, Copy)]
struct Frame {
    me       : GrobId,
    x_common : GrobId,
    range    : Option<Range>,
}

/// Places the outside-staff elements of `me` and returns the skylines of all of `elements`, in the frame of `me`.
///
/// In pure mode (`range` given) the placement is only simulated: the returned skylines are an estimate and no grob
/// is moved.
pub fn skyline_spacing(grobs : &mut Grobs, me : GrobId, elements : &[GrobId], range : Option<Range>) -> SkylinePair {
    let elements : Vec<GrobId> = elements.iter().copied().filter(|&e| grobs.is_live(e)).collect();

    // outside-staff objects inside outside-staff objects move with their ancestor
    for &e in &elements {
        if grobs.number(e, Property::OutsideStaffPriority).is_none() {
            continue;
        }
        let nested = grobs.parent(e, Axis::Y).map_or(false, |p| axis_group::has_outside_staff_parent(grobs, p));
        if nested {
            warn!("outside-staff object {} is inside another outside-staff object ; dropping its priority", grobs.name(e));
            grobs.remove_property(e, Property::OutsideStaffPriority);
        }
    }

    if grobs.common_refpoint_of_array(&elements, me, Axis::Y) != Some(me) {
        error!("placing outside-staff objects that do not belong to group {}", grobs.name(me));
    }
    let x_common = match grobs.common_refpoint_of_array(&elements, me, Axis::X) {
        Some(x_common) => x_common,
        None => {
            error!("elements of group {} have no common horizontal reference point", grobs.name(me));
            return SkylinePair::new();
        },
    };
    let frame = Frame { me, x_common, range };

    let mut keys : Vec<_> = elements.iter().map(|&e| axis_group::staff_priority_key(grobs, e, x_common)).collect();
    keys.sort_by(axis_group::staff_priority_cmp);
    let elements : Vec<GrobId> = keys.into_iter().map(|k| k.2).collect();

    // the staff and everything in it
    let mut boxes = Vec::new();
    let mut skylines = SkylinePair::new();
    let first_outside = elements
        .iter()
        .position(|&e| grobs.number(e, Property::OutsideStaffPriority).is_some())
        .unwrap_or(elements.len());
    for &e in &elements[.. first_outside] {
        if is_cross_staff(grobs, e) || axis_group::has_outside_staff_parent(grobs, e) {
            continue;
        }
        add_boxes(grobs, e, frame, &mut boxes, &mut skylines);
    }
    let padding = grobs.robust_number(me, Property::SkylineHorizontalPadding, grobs.settings().skyline_horizontal_padding);
    skylines.merge(&SkylinePair::from_boxes(&boxes, padding, Axis::X));

    // objects riding on an outside-staff object, keyed by that object
    let riders : Vec<(GrobId, GrobId)> = elements[.. first_outside]
        .iter()
        .filter_map(|&e| axis_group::outside_staff_ancestor(grobs, e).map(|a| (a, e)))
        .collect();

    let mut placed = Vec::new();
    let mut i = first_outside;
    while i < elements.len() {
        let tier_priority = priority(grobs, elements[i]);
        let mut j = i;
        while j < elements.len() && priority(grobs, elements[j]) == tier_priority {
            j += 1;
        }
        let tier : Vec<GrobId> = elements[i .. j]
            .iter()
            .copied()
            .filter(|&e| !is_cross_staff(grobs, e))
            .collect();
        add_grobs_of_one_priority(grobs, frame, &skylines, &mut placed, &tier, &riders);
        i = j;
    }

    for p in &placed {
        skylines.merge(&p.skylines);
    }
    let my_x = grobs.relative_coordinate(me, x_common, Axis::X);
    skylines.shift(-my_x);

    if grobs.settings().debug_skylines {
        debug!("skylines of {}: {:?}", grobs.name(me), skylines.to_points(Axis::X));
    }
    skylines
}

/// Adds the footprint of `e` to the staff: its own skylines if it has some, else the footprints of its elements,
/// else its extent box.
fn add_boxes(grobs : &mut Grobs, e : GrobId, frame : Frame, boxes : &mut Vec<BBox>, skylines : &mut SkylinePair) {
    let mut stack = vec![e];
    while let Some(g) = stack.pop() {
        if !grobs.is_live(g) {
            continue;
        }
        if grobs.has_skylines(g) {
            let mut pair = grobs.vertical_skylines(g, frame.range);
            let x = grobs.relative_coordinate(g, frame.x_common, Axis::X);
            let y = grobs.maybe_pure_coordinate(g, frame.me, Axis::Y, frame.range);
            pair.shift(x);
            pair.raise(y);
            skylines.merge(&pair);
        }
        else if !grobs.objects(g, Object::Elements).is_empty() {
            stack.extend(grobs.objects(g, Object::Elements).iter().rev());
        }
        else if grobs.number(g, Property::OutsideStaffPriority).is_none() && !is_cross_staff(grobs, g) {
            boxes.push(BBox::new(
                grobs.extent(g, frame.x_common, Axis::X),
                grobs.maybe_pure_extent(g, frame.me, Axis::Y, frame.range),
            ));
        }
    }
}

/// Skylines of an outside-staff object and the objects riding on it, in the frame of the group
fn outside_skylines(grobs : &mut Grobs, e : GrobId, frame : Frame, riders : &[(GrobId, GrobId)]) -> SkylinePair {
    let mut pair = SkylinePair::new();
    let members = std::iter::once(e).chain(riders.iter().filter(|r| r.0 == e).map(|r| r.1));
    for g in members.collect::<Vec<_>>() {
        let mut part = grobs.vertical_skylines(g, frame.range);
        let x = grobs.relative_coordinate(g, frame.x_common, Axis::X);
        let y = grobs.maybe_pure_coordinate(g, frame.me, Axis::Y, frame.range);
        part.shift(x);
        part.raise(y);
        pair.merge(&part);
    }
    pair
}

/// Places one tier of outside-staff objects, all of the same priority.
fn add_grobs_of_one_priority(
    grobs    : &mut Grobs,
    frame    : Frame,
    staff    : &SkylinePair,
    placed   : &mut Vec<Placed>,
    elements : &[GrobId],
    riders   : &[(GrobId, GrobId)],
) {
    let default_hpad = grobs.robust_number(frame.me, Property::OutsideStaffHorizontalPadding, grobs.settings().outside_staff_horizontal_padding);
    let default_pad = grobs.robust_number(frame.me, Property::OutsideStaffPadding, grobs.settings().outside_staff_padding);

    let mut pending = elements.to_vec();
    while !pending.is_empty() {
        let mut deferred = Vec::new();
        let mut last_end = [f64::NEG_INFINITY; 2];

        for e in pending {
            let dir = match grobs.direction(e) {
                Direction::Center => {
                    warn!("outside-staff object {} has no direction ; placing it above", grobs.name(e));
                    Direction::Up
                },
                dir => dir,
            };
            let side = (dir == Direction::Up) as usize;
            let hpad = grobs.robust_number(e, Property::OutsideStaffHorizontalPadding, default_hpad);
            let pad = grobs.robust_number(e, Property::OutsideStaffPadding, default_pad);

            let mut pair = outside_skylines(grobs, e, frame, riders);
            if pair.is_empty() {
                continue;
            }
            if pair.left() - 2. * hpad < last_end[side] {
                deferred.push(e);
                continue;
            }

            let shift = avoid_outside_staff_collisions(staff, placed, &pair, dir, hpad, pad);
            if shift != 0. {
                pair.raise(shift);
                if frame.range.is_none() {
                    grobs.translate_axis(e, shift, Axis::Y);
                }
            }
            last_end[side] = pair.right();
            placed.push(Placed { dir, skylines : pair });
        }
        pending = deferred;
    }
}

/// How far to move `pair` in direction `dir` so that it clears the staff and the objects already placed on the same
/// side, keeping `vertical_padding` from them.
///
/// The staff only ever pushes the object towards `dir`. Each placed object then forbids an open interval of shifts ;
/// the answer is the first point outside all of them, looking from 0 towards `dir`. That search is repeated until the
/// shift found is 0, within a bounded number of rounds.
fn avoid_outside_staff_collisions(
    staff            : &SkylinePair,
    placed           : &[Placed],
    pair             : &SkylinePair,
    dir              : Direction,
    horizon_padding  : f64,
    vertical_padding : f64,
) -> f64 {
    let mut current = pair.clone();
    let mut total = 0.;

    let dist = staff[dir].distance(&current[-dir], horizon_padding) + vertical_padding;
    if dist.is_finite() && dist > 0. {
        total = dir.sign() * dist;
        current.raise(total);
    }

    let obstacles : Vec<&SkylinePair> = placed.iter().filter(|p| p.dir == dir).map(|p| &p.skylines).collect();
    if obstacles.is_empty() {
        return total;
    }
    let mut settled = false;
    for _ in 0 .. MAX_OUTSIDE_STAFF_ROUNDS {
        let forbidden = obstacles
            .iter()
            .filter_map(|other| {
                let up = current[Direction::Down].distance(&other[Direction::Up], horizon_padding) + vertical_padding;
                let down = current[Direction::Up].distance(&other[Direction::Down], horizon_padding) + vertical_padding;
                if up.is_finite() && down.is_finite() && -down < up {
                    Some(crate::interval::Interval::new(-down, up))
                }
                else {
                    None
                }
            })
            .collect();
        // the closed complement: touching is allowed
        let allowed = IntervalSet::interval_union(forbidden).complement();
        // only looks towards `dir`, so never back into the staff
        let shift = allowed.nearest_point(0., dir);
        if !shift.is_finite() {
            warn!("no room to place an outside-staff object");
            settled = true;
            break;
        }
        if shift.abs() < EPS {
            settled = true;
            break;
        }
        current.raise(shift);
        total += shift;
    }
    if !settled {
        warn!("outside-staff object still colliding after {} rounds ; keeping shift {}", MAX_OUTSIDE_STAFF_ROUNDS, total);
    }
    total
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BBox;
    use crate::interval::Interval;

    fn pair(x : (f64, f64), y : (f64, f64)) -> SkylinePair {
        SkylinePair::from_box(&BBox::new(Interval::new(x.0, x.1), Interval::new(y.0, y.1)), 0., Axis::X)
    }

    #[test]
    fn clears_the_staff() {
        let staff = pair((0., 20.), (-2., 2.));
        let cases = [
            // (object, direction, expected shift)
            (pair((3., 5.), (0., 1.)),    Direction::Up,   2.5),
            (pair((3., 5.), (0., 1.)),    Direction::Down, -3.5),
            (pair((3., 5.), (4., 5.)),    Direction::Up,   0.),
            (pair((30., 35.), (0., 1.)),  Direction::Up,   0.),
            // on the wrong side of the staff
            (pair((3., 5.), (-10., -9.)), Direction::Up,   12.5),
            (pair((3., 5.), (9., 10.)),   Direction::Down, -12.5),
        ];
        for (object, dir, expected) in cases.iter() {
            let shift = avoid_outside_staff_collisions(&staff, &[], object, *dir, 0., 0.5);
            eprintln!("{:?} -> {}", dir, shift);
            assert_eq!(shift, *expected);
        }
    }

    #[test]
    fn finds_gaps_between_placed_objects() {
        let staff = pair((0., 20.), (-2., 2.));
        let placed = vec![
            Placed { dir : Direction::Up, skylines : pair((0., 10.), (4., 5.)) },
            // on the other side: ignored
            Placed { dir : Direction::Down, skylines : pair((0., 10.), (2.5, 3.5)) },
        ];
        // fits between the staff and the first object
        let small = pair((3., 4.), (0., 0.5));
        assert_eq!(avoid_outside_staff_collisions(&staff, &placed, &small, Direction::Up, 0., 0.5), 2.5);

        // too tall for the gap: goes above
        let tall = pair((3., 4.), (0., 2.));
        assert_eq!(avoid_outside_staff_collisions(&staff, &placed, &tall, Direction::Up, 0., 0.5), 5.5);
    }

    #[test]
    fn deep_stacks_settle() {
        let staff = pair((0., 20.), (-2., 2.));
        // more objects than rounds, one unit apart: no gap is wide enough
        let placed : Vec<Placed> = (0 .. 2 * MAX_OUTSIDE_STAFF_ROUNDS)
            .map(|k| {
                let bottom = 4. + 2. * k as f64;
                Placed { dir : Direction::Up, skylines : pair((0., 10.), (bottom, bottom + 1.)) }
            })
            .collect();
        let top = 5. + 2. * (placed.len() - 1) as f64;

        let object = pair((3., 4.), (0., 2.));
        let shift = avoid_outside_staff_collisions(&staff, &placed, &object, Direction::Up, 0., 0.5);
        assert_eq!(shift, top + 0.5);
    }
}
