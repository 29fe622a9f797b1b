//! Unquantized beam positions, and the stem lengths that follow from the final ones.

use crate::geometry::{Axis, Direction, Drul, Point};
use crate::grob::{GrobId, Grobs, Interface, Object, Property};
use crate::interval::Interval;
use crate::layout::constants::{BEAM_DAMPING, FLAT_CONCAVENESS, MIN_COVERED_HEIGHT, REGION_EPSILON};
use crate::layout::staff;
use super::stem;
use super::{
    common_refpoints, first_normal_stem, get_beam_thickness, get_beam_translation, is_cross_staff, is_knee,
    last_normal_stem, normal_stems, scale, stems,
};

/// The line `y = slope * x + intercept` closest to `points`, as `(slope, intercept)`.
fn minimise_least_squares(points : &[Point]) -> (f64, f64) {
    let n = points.len() as f64;
    let (mut sx, mut sy, mut sxx, mut sxy) = (0., 0., 0., 0.);
    for p in points {
        sx += p.x;
        sy += p.y;
        sxx += p.x * p.x;
        sxy += p.x * p.y;
    }
    let den = n * sxx - sx * sx;
    if n == 0. {
        (0., 0.)
    }
    else if den.abs() < 1e-12 {
        (0., sy / n)
    }
    else {
        let slope = (n * sxy - sx * sy) / den;
        (slope, (sy - slope * sx) / n)
    }
}

/// Slopes smaller than the smallest quant get absurd direction penalties: make them at least that large.
fn set_minimum_dy(grobs : &Grobs, me : GrobId, dy : f64) -> f64 {
    if dy == 0. {
        return dy;
    }
    let ss = staff::staff_space(grobs, me);
    let thickness = get_beam_thickness(grobs, me) / ss;
    let line = staff::line_thickness(grobs, me) / ss;
    let sit = (thickness - line) / 2.;
    let inter = 0.5;
    let hang = 1. - (thickness - line) / 2.;

    dy.signum() * dy.abs().max(sit.min(inter).min(hang) * ss)
}

/// Line through the ideal ends of the normal stems, in staff spaces relative to the beam.
///
/// Also records the slope of that line in the beam's `LeastSquaresDy`.
pub fn calc_least_squares_positions(grobs : &mut Grobs, me : GrobId) -> Drul<f64> {
    let stems = normal_stems(grobs, me);
    let (first, last) = match (stems.first(), stems.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Drul::new(0., 0.),
    };
    let [common_x, common_y] = match common_refpoints(grobs, me, &stems) {
        Some(common) => common,
        None => return Drul::new(0., 0.),
    };

    let my_y = grobs.relative_coordinate(me, common_y, Axis::Y);
    let ideal_at = |grobs : &mut Grobs, s : GrobId| {
        stem::stem_info(grobs, s).ideal_y + grobs.relative_coordinate(s, common_y, Axis::Y) - my_y
    };
    let ideal = Drul::new(ideal_at(grobs, first), ideal_at(grobs, last));

    let x0 = grobs.relative_coordinate(first, common_x, Axis::X);
    let dx = grobs.relative_coordinate(last, common_x, Axis::X) - x0;

    let mut pos;
    let least_squares_dy;
    if ideal.up - ideal.down == 0. {
        let chord = Drul::new(stem::chord_start_y(grobs, first), stem::chord_start_y(grobs, last));
        let chord_dy = chord.up - chord.down;
        // both ends on the middle line: give simple beams a small slope
        if ideal.down == 0. && chord_dy != 0. && stems.len() == 2 {
            let d = Direction::from_sign(chord_dy);
            pos = Drul::new(0., 0.);
            pos[d] = get_beam_thickness(grobs, me) / 2.;
            pos[-d] = -pos[d];
        }
        else {
            pos = ideal;
        }
        least_squares_dy = pos.up - pos.down;
    }
    else {
        let mut ideals = Vec::with_capacity(stems.len());
        for &s in &stems {
            let x = grobs.relative_coordinate(s, common_x, Axis::X) - x0;
            ideals.push(Point::new(x, ideal_at(grobs, s)));
        }
        let (slope, y) = minimise_least_squares(&ideals);
        let dy = set_minimum_dy(grobs, me, slope * dx);
        pos = Drul::new(y, y + dy);
        least_squares_dy = dy;
    }

    let ss = staff::staff_space(grobs, me);
    grobs.put(me, Property::LeastSquaresDy, least_squares_dy / ss);
    scale(pos, 1. / ss)
}

/// Whether the inner notes of a beam stick out towards the beam far enough that only a horizontal beam looks right.
fn is_concave_single_notes(positions : &[f64], beam_dir : Direction) -> bool {
    let (first, last) = match (positions.first(), positions.last()) {
        (Some(&first), Some(&last)) if positions.len() > 2 => (first, last),
        _ => return false,
    };
    let inner = &positions[1 .. positions.len() - 1];
    let d = beam_dir.sign();

    // inner notes both above and below the outer ones
    let covering = Interval::new(first.min(last), first.max(last));
    let above = inner.iter().any(|&p| p > covering.right);
    let below = inner.iter().any(|&p| p < covering.left);
    if above && below {
        return true;
    }

    // a turn in the melody at least as close to the beam as the outer notes
    let dy = last - first;
    let closest = (d * first).max(d * last);
    for w in positions[1 .. positions.len() - 1].windows(2) {
        let inner_dy = w[1] - w[0];
        if inner_dy.signum() != dy.signum() && (d * w[1] >= closest || d * w[0] >= closest) {
            return true;
        }
    }

    // all inner notes closer to the beam than the outer ones
    !inner.is_empty() && inner.iter().all(|&p| d * p > closest)
}

/// Mean distance, towards the beam, of the inner notes to the line through the outer ones
fn positions_concaveness(positions : &[f64], beam_dir : Direction) -> f64 {
    let (first, last) = match (positions.first(), positions.last()) {
        (Some(&first), Some(&last)) if positions.len() > 2 => (first, last),
        _ => return 0.,
    };
    let slope = (last - first) / (positions.len() - 1) as f64;
    let sum : f64 = positions[1 .. positions.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, &p)| (beam_dir.sign() * (p - (slope * (i + 1) as f64 + first))).max(0.))
        .sum();
    sum / positions.len() as f64
}

/// How much the note heads bulge towards the beam ; the beam's `Concaveness` if it has one.
pub fn calc_concaveness(grobs : &Grobs, me : GrobId) -> f64 {
    if let Some(concaveness) = grobs.number(me, Property::Concaveness) {
        return concaveness;
    }
    if is_knee(grobs, me) {
        return 0.;
    }
    let stems = normal_stems(grobs, me);
    if stems.len() <= 2 {
        return 0.;
    }
    let beam_dir = match grobs.direction(me) {
        Direction::Center => stem::direction(grobs, stems[0]),
        dir => dir,
    };

    let mut close = Vec::with_capacity(stems.len());
    let mut far = Vec::with_capacity(stems.len());
    for &s in &stems {
        let hp = stem::head_positions(grobs, s);
        close.push(hp.at(beam_dir).round());
        far.push(hp.at(-beam_dir).round());
    }

    if is_concave_single_notes(&close, beam_dir) {
        FLAT_CONCAVENESS
    }
    else {
        (positions_concaveness(&far, beam_dir) + positions_concaveness(&close, beam_dir)) / 2.
    }
}

/// Flattens the slope of `pos`: `slope' = 0.6 tanh(slope) / (damping + concaveness)`.
///
/// Beams over concave note heads are made horizontal.
pub fn slope_damping(grobs : &mut Grobs, me : GrobId, mut pos : Drul<f64>) -> Drul<f64> {
    let (first, last) = match (first_normal_stem(grobs, me), last_normal_stem(grobs, me)) {
        (Some(first), Some(last)) if first != last => (first, last),
        _ => return pos,
    };

    let mut damping = grobs.robust_number(me, Property::Damping, BEAM_DAMPING);
    let concaveness = calc_concaveness(grobs, me);
    if concaveness >= FLAT_CONCAVENESS {
        pos.down = pos.up;
        grobs.put(me, Property::LeastSquaresDy, 0.);
        damping = 0.;
    }
    if damping == 0. {
        return pos;
    }

    let ss = staff::staff_space(grobs, me);
    let mut pos = scale(pos, ss);
    let dy = pos.up - pos.down;

    let common_x = match grobs.common_refpoint(first, last, Axis::X) {
        Some(common_x) => common_x,
        None => return scale(pos, 1. / ss),
    };
    let dx = grobs.relative_coordinate(last, common_x, Axis::X) - grobs.relative_coordinate(first, common_x, Axis::X);

    let mut slope = if dy != 0. && dx != 0. { dy / dx } else { 0. };
    slope = 0.6 * slope.tanh() / (damping + concaveness);
    let damped_dy = set_minimum_dy(grobs, me, slope * dx);

    pos.down += (dy - damped_dy) / 2.;
    pos.up -= (dy - damped_dy) / 2.;
    scale(pos, 1. / ss)
}

/// A point of a non-empty interval, `dist` inside its finite end if it has only one.
fn point_in_interval(v : Interval, dist : f64) -> f64 {
    if v.left.is_infinite() {
        v.right - dist
    }
    else if v.right.is_infinite() {
        v.left + dist
    }
    else {
        v.center()
    }
}

/// Moves the beam up or down, keeping its slope, to where stems are not too short and large covered objects are
/// clear, so that quanting has a chance of finding good positions.
///
/// Covered objects that do not overlap the beam horizontally, or are less than two staff spaces tall, are dropped
/// from the beam's `CoveredGrobs`. Note heads of other beamed stems count as reaching infinitely far along their stem.
pub fn shift_region_to_valid(grobs : &mut Grobs, me : GrobId, pos : Drul<f64>) -> Drul<f64> {
    let stems = stems(grobs, me).to_vec();
    let covered = grobs.objects(me, Object::CoveredGrobs).to_vec();
    let all : Vec<GrobId> = stems.iter().chain(covered.iter()).copied().collect();
    let [common_x, common_y] = match common_refpoints(grobs, me, &all) {
        Some(common) => common,
        None => return pos,
    };
    let (first, last) = match (first_normal_stem(grobs, me), last_normal_stem(grobs, me)) {
        (Some(first), Some(last)) => (first, last),
        _ => return pos,
    };

    let x_span = Interval::new(
        grobs.relative_coordinate(first, common_x, Axis::X),
        grobs.relative_coordinate(last, common_x, Axis::X),
    );
    let my_y = grobs.relative_coordinate(me, common_y, Axis::Y);

    let ss = staff::staff_space(grobs, me);
    let beam_dy = (pos.up - pos.down) * ss;
    let mut beam_left_y = pos.down * ss;
    let slope = if x_span.delta() != 0. { beam_dy / x_span.delta() } else { 0. };

    // where the left end may go without making any stem too short
    let mut feasible_left_point = Interval::FULL;
    for &s in &stems {
        if stem::is_invisible(grobs, s) || !stem::is_normal_stem(grobs, s) {
            continue;
        }
        let d = stem::direction(grobs, s);
        let x = grobs.relative_coordinate(s, common_x, Axis::X) - x_span.left;
        let left_y = stem::stem_info(grobs, s).shortest_y - slope * x
            + grobs.relative_coordinate(s, common_y, Axis::Y) - my_y;

        let mut flp = Interval::FULL;
        flp.set(-d, left_y);
        feasible_left_point.intersect(flp);
    }

    let mut filtered = Vec::new();
    let mut forbidden_intervals = Vec::new();
    for &c in &covered {
        if !grobs.is_live(c) {
            continue;
        }
        if grobs.has_interface(c, Interface::Beam) && is_cross_staff(grobs, c) {
            continue;
        }
        let bx = grobs.extent(c, common_x, Axis::X);
        let mut by = grobs.extent(c, common_y, Axis::Y);
        if bx.is_empty() || by.is_empty() || bx.intersection(x_span).is_empty() {
            continue;
        }
        filtered.push(c);

        if let Some(head_stem) = grobs.object(c, Object::Stem) {
            let beamed = stem::get_beam(grobs, head_stem).is_some();
            if beamed && stem::is_normal_stem(grobs, head_stem) && grobs.has_interface(c, Interface::NoteHead) {
                // asking for the length of that stem would be circular
                let stem_dir = stem::direction(grobs, head_stem);
                by.set(stem_dir, stem_dir.sign() * f64::INFINITY);
            }
        }
        if by.length() < MIN_COVERED_HEIGHT.to_unitless() * ss {
            continue;
        }

        for d in Direction::BOTH {
            let dy = slope * (bx.at(d) - x_span.left);
            forbidden_intervals.push(Interval::new(by.left - dy - my_y, by.right - dy - my_y));
        }
    }
    grobs.set_objects(me, Object::CoveredGrobs, filtered);

    forbidden_intervals.sort_by(|a, b| a.left.total_cmp(&b.left));
    let mut feasible_beam_placements = Drul::new(beam_left_y, beam_left_y);
    let mut dirty = true;
    while dirty {
        dirty = false;
        for forbidden in &forbidden_intervals {
            for d in Direction::BOTH {
                if forbidden.at(d) == d.sign() * f64::INFINITY {
                    feasible_beam_placements[d] = d.sign() * f64::INFINITY;
                }
                else if forbidden.contains(feasible_beam_placements[d]) {
                    feasible_beam_placements[d] = d.sign() * REGION_EPSILON + forbidden.at(d);
                    dirty = true;
                }
            }
        }
    }

    // placements that make stems too short are never candidates
    for d in Direction::BOTH {
        if !feasible_left_point.contains(feasible_beam_placements[d]) {
            feasible_beam_placements[d] = d.sign() * f64::INFINITY;
        }
    }

    let nowhere = feasible_beam_placements.up == f64::INFINITY && feasible_beam_placements.down == f64::NEG_INFINITY;
    if feasible_left_point.is_empty() {
        warn!("no viable initial configuration found for beam {}: may not find good beam slope", grobs.name(me));
    }
    else if nowhere {
        // colliding anyway, but stems can at least be long enough
        beam_left_y = point_in_interval(feasible_left_point, 2. * ss);
    }
    else if (beam_left_y - feasible_beam_placements.down).abs() > (beam_left_y - feasible_beam_placements.up).abs() {
        beam_left_y = feasible_beam_placements.up;
    }
    else {
        beam_left_y = feasible_beam_placements.down;
    }

    scale(Drul::new(beam_left_y, beam_left_y + beam_dy), 1. / ss)
}

/// End of `stem`, relative to the stem, for a beam at `pos` (in layout units) spanning `x_span`.
///
/// The stem reaches the beam closest to its end, or with `french` beaming the closest beam that goes on to both
/// sides of it. Feathered beams spread towards `feather_dir`.
pub fn calc_stem_y(
    grobs       : &mut Grobs,
    me          : GrobId,
    s           : GrobId,
    common      : [GrobId; 2],
    x_span      : Interval,
    feather_dir : Direction,
    pos         : Drul<f64>,
    french      : bool,
) -> f64 {
    let [common_x, common_y] = common;
    let translation = get_beam_translation(grobs, me);
    let stem_dir = stem::direction(grobs, s);

    let dx = x_span.delta();
    let relx = if dx != 0. { (grobs.relative_coordinate(s, common_x, Axis::X) - x_span.left) / dx } else { 0. };
    let mut stem_y = pos.down + (pos.up - pos.down) * relx;

    let multiplicity = if french { stem::whole_beams(grobs, s) } else { stem::beam_multiplicity(grobs, s) };
    let (lo, hi) = multiplicity.unwrap_or((0, 0));
    let side = if french { -stem_dir.to_i32() } else { stem_dir.to_i32() };
    let rank = if side < 0 { lo } else { hi };

    let feather_factor = match feather_dir {
        Direction::Up     => relx,
        Direction::Down   => 1. - relx,
        Direction::Center => 1.,
    };
    stem_y += feather_factor * translation * rank as f64;

    let id = grobs.relative_coordinate(me, common_y, Axis::Y) - grobs.relative_coordinate(s, common_y, Axis::Y);
    stem_y + id
}

/// Writes the `StemEndPosition` of every stem of the beam, from the beam's `Positions`.
///
/// Invisible stems get one too, for objects that slope along with the beam.
pub fn set_stem_lengths(grobs : &mut Grobs, me : GrobId) {
    let stems = stems(grobs, me).to_vec();
    let pos = match grobs.interval(me, Property::Positions) {
        Some(pos) if !stems.is_empty() => pos,
        _ => return,
    };
    let common = match common_refpoints(grobs, me, &stems) {
        Some(common) => common,
        None => return,
    };

    let ss = staff::staff_space(grobs, me);
    let pos = Drul::new(pos.left * ss, pos.right * ss);
    let gap = grobs.integer(me, Property::GapCount).unwrap_or(0) != 0;
    let thickness = get_beam_thickness(grobs, me);

    let first = first_normal_stem(grobs, me);
    let last = last_normal_stem(grobs, me);
    let x_of = |grobs : &mut Grobs, s : Option<GrobId>| s.map_or(0., |s| grobs.relative_coordinate(s, common[0], Axis::X));
    let x_span = Interval::new(x_of(grobs, first), x_of(grobs, last));
    let feather_dir = grobs.direction_property(me, Property::GrowDirection).unwrap_or(Direction::Center);

    for s in stems {
        let french = grobs.flag(s, Property::FrenchBeaming) && Some(s) != first && Some(s) != last;
        let mut stem_y = calc_stem_y(grobs, me, s, common, x_span, feather_dir, pos, french);

        // tremolo beams: make the stems reach the end of the beam
        if gap && !stem::is_invisible(grobs, s) {
            stem_y += thickness * 0.5 * stem::direction(grobs, s).sign();
        }
        stem::set_stem_end(grobs, s, 2. * stem_y / ss);
    }
}
