//! Direction of a beam and of its stems, and the vertical order of the beams between stems.

use crate::geometry::{Axis, Direction, Drul};
use crate::grob::{GrobId, Grobs, Property, Range};
use crate::interval::{Interval, IntervalSet};
use crate::layout::constants::NEUTRAL_DIRECTION;
use crate::layout::staff;
use super::stem;
use super::{get_beam_count, get_beam_thickness, get_beam_translation, normal_stems, stems};

/// Computes the direction of the beam and sets the direction of its stems.
///
/// A beam with fewer than two normal stems removes itself and gets `Center`. The result is stored in the beam's
/// `Direction`, so stems are only redirected once.
pub fn calc_direction(grobs : &mut Grobs, me : GrobId) -> Direction {
    if !grobs.is_live(me) {
        return Direction::Center;
    }
    let count = normal_stems(grobs, me).len();
    if count < 2 {
        warn!("removing beam {} with {} normal stem(s)", grobs.name(me), count);
        grobs.suicide(me);
        return Direction::Center;
    }

    let dir = match grobs.direction(me) {
        Direction::Center => {
            let dir = get_default_dir(grobs, me);
            consider_auto_knees(grobs, me);
            dir
        },
        dir => dir,
    };
    set_stem_directions(grobs, me, dir);
    grobs.put(me, Property::Direction, dir);
    dir
}

/// The direction the beam takes when no stem forces one.
///
/// Without forced stems, the note head sticking out furthest from the middle line decides. Otherwise, or on a tie,
/// the majority of stem directions, then the average and total distance of the heads from the middle line.
pub fn get_default_dir(grobs : &Grobs, me : GrobId) -> Direction {
    let stems = stems(grobs, me);

    let mut extremes = Drul::new(0f64, 0f64);
    for &s in stems {
        let positions = stem::head_positions(grobs, s);
        if positions.is_empty() {
            continue;
        }
        for d in Direction::BOTH {
            if Direction::from_sign(positions.at(d)) == d {
                extremes[d] = d.sign() * (d.sign() * positions.at(d)).max(d.sign() * extremes[d]);
            }
        }
    }

    let mut total = Drul::new(0f64, 0f64);
    let mut count = Drul::new(0i32, 0i32);
    let mut force_dir = false;
    for &s in stems {
        let stem_dir = if stem::has_forced_direction(grobs, s) {
            force_dir = true;
            grobs.direction(s)
        }
        else {
            stem::direction(grobs, s)
        };
        if stem_dir.is_center() {
            continue;
        }
        count[stem_dir] += 1;
        let hp = stem::head_positions(grobs, s);
        if !hp.is_empty() {
            total[stem_dir] += (-stem_dir.sign() * hp.at(-stem_dir)).trunc().max(0.);
        }
    }

    if !force_dir {
        if extremes.up.abs() > -extremes.down {
            return Direction::Down;
        }
        else if extremes.up < -extremes.down {
            return Direction::Up;
        }
    }

    let by_count = Direction::from_sign((count.up - count.down) as f64);
    if !by_count.is_center() {
        return by_count;
    }
    if count.up > 0 && count.down > 0 {
        let by_average = Direction::from_sign(total.up / count.up as f64 - total.down / count.down as f64);
        if !by_average.is_center() {
            return by_average;
        }
    }
    let by_total = Direction::from_sign(total.up - total.down);
    if !by_total.is_center() {
        return by_total;
    }
    grobs.direction_property(me, Property::NeutralDirection).unwrap_or(NEUTRAL_DIRECTION)
}

/// Points every stem without a forced direction in direction `d`
pub fn set_stem_directions(grobs : &mut Grobs, me : GrobId, d : Direction) {
    for s in stems(grobs, me).to_vec() {
        if !stem::has_forced_direction(grobs, s) {
            grobs.put(s, Property::Direction, d);
        }
    }
}

/// Turns the beam into a knee when there is a large enough vertical gap between its note heads.
///
/// Only considered when the beam has an `AutoKneeGap`. Stems above the largest inner gap point down, the others up.
pub fn consider_auto_knees(grobs : &mut Grobs, me : GrobId) {
    let threshold = match grobs.number(me, Property::AutoKneeGap) {
        Some(gap) => gap,
        None => return,
    };

    let stems = normal_stems(grobs, me);
    let common = match grobs.common_refpoint_of_array(&stems, me, Axis::Y) {
        Some(common) => common,
        None => {
            error!("stems of beam {} have no common vertical reference point", grobs.name(me));
            return;
        },
    };
    let ss = staff::staff_space(grobs, me);

    let mut gaps = IntervalSet::full();
    let mut head_extents = Vec::with_capacity(stems.len());
    for &s in &stems {
        let mut extent = stem::head_positions(grobs, s);
        if !extent.is_empty() {
            extent.widen(1.);
            extent = extent * (ss * 0.5);
            // a pure estimate: the stems may not be placed yet
            extent.translate(grobs.maybe_pure_coordinate(s, common, Axis::Y, Some(Range::new(0, i32::MAX))));
            if stem::has_forced_direction(grobs, s) {
                let stem_dir = grobs.direction(s);
                extent.set(-stem_dir, -stem_dir.sign() * f64::INFINITY);
            }
        }
        gaps.remove_interval(extent);
        head_extents.push(extent);
    }

    let mut max_gap = Interval::EMPTY;
    let mut max_gap_len = 0.;
    for gap in gaps.intervals().iter().rev() {
        // the outer gaps are not knees
        if gap.left.is_infinite() || gap.right.is_infinite() {
            continue;
        }
        if gap.length() >= max_gap_len {
            max_gap_len = gap.length();
            max_gap = *gap;
        }
    }

    let height_of_beams = get_beam_thickness(grobs, me) / 2.
        + (get_beam_count(grobs, me) - 1).max(0) as f64 * get_beam_translation(grobs, me);
    if max_gap_len > threshold + height_of_beams {
        debug!("beam {} is a knee around {:?}", grobs.name(me), max_gap);
        for (&s, extent) in stems.iter().zip(head_extents.iter()) {
            let d = if extent.center() < max_gap.center() { Direction::Up } else { Direction::Down };
            grobs.put(s, Property::Direction, d);
        }
    }
}

/// Renumbers the beam ranks of the stems so that neighbouring stems share as many beams as possible.
///
/// Before, each stem counts its beams from 0 on each side. After, ranks are positions in the beam stack: 0 is the
/// outer beam, and ranks grow towards the note heads (negative for stems pointing up).
pub fn calc_beaming(grobs : &mut Grobs, me : GrobId) {
    let mut last_right : Vec<i32> = vec![0];
    let mut last_dir = Direction::Center;

    for s in stems(grobs, me).to_vec() {
        let mut beaming = match grobs.beaming(s) {
            Some(beaming) => beaming.clone(),
            None => continue,
        };
        let this_dir = match stem::direction(grobs, s) {
            Direction::Center => Direction::Up,
            dir => dir,
        };
        let left_dir = if last_dir.is_center() { this_dir } else { last_dir };
        let start = position_with_maximal_common_beams(&last_right, &beaming.left, left_dir, this_dir);

        for d in Direction::BOTH {
            for rank in beaming.side_mut(d).iter_mut() {
                *rank = start - this_dir.to_i32() * *rank;
            }
        }

        if !beaming.right.is_empty() {
            last_right = beaming.right.clone();
            last_dir = this_dir;
        }
        grobs.put(s, Property::Beaming, beaming);
    }
}

/// The rank of the first beam on the left side of a stem that maximises the beams it shares with its left neighbour.
///
/// `left` are the ranks on the right side of the neighbour, `right` the unnumbered beams on the left side of the stem.
/// Among equal counts, the position closest to the end of the neighbour's stem wins.
fn position_with_maximal_common_beams(left : &[i32], right : &[i32], left_dir : Direction, right_dir : Direction) -> i32 {
    let (lo, hi) = match (left.iter().min(), left.iter().max()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => return 0,
    };
    let step = left_dir.to_i32();
    let (first, last) = if step > 0 { (lo, hi) } else { (hi, lo) };

    let mut best_count = 0;
    let mut best_start = 0;
    let mut i = first;
    loop {
        let count = right
            .iter()
            .filter(|&&k| left.contains(&(i - right_dir.to_i32() * k)))
            .count();
        if count >= best_count {
            best_count = count;
            best_start = i;
        }
        if i == last {
            break;
        }
        i += step;
    }
    best_start
}
