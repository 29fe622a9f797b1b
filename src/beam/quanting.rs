//! Choosing the final beam position among candidates on the half-space grid.
//!
//! Every pair of (left, right) positions within `region_size` staff spaces of the unquanted ones is scored with
//! demerits for bad stem lengths, a slope far from the damped one, staff positions crossed and collisions with covered
//! objects. The candidate with the fewest demerits wins ; on a tie, the first one found.

use crate::geometry::{Axis, BBox, Direction, Drul};
use crate::grob::{GrobId, Grobs, Object, Property};
use crate::interval::Interval;
use crate::layout::constants::{COLLISION_PADDING, SHRINK_EXTRA_WEIGHT, STEM_LENGTH_POWER};
use crate::layout::{staff, BeamQuanting};
use super::stem::{self, StemInfo};
use super::{common_refpoints, get_beam_count, get_beam_thickness, get_beam_translation, is_cross_staff, normal_stems};

/// A stem as seen from the beam: `x` from the first normal stem, heights relative to the beam, in layout units.
struct StemData {
    x    : f64,
    dir  : Direction,
    info : StemInfo,
}

/// Everything quanting needs, gathered once
struct ScoringProblem {
    params      : BeamQuanting,
    dir         : Direction,
    ss          : f64,
    thickness   : f64,
    translation : f64,
    beam_count  : i32,
    dx          : f64,
    stems       : Vec<StemData>,
    /// covered objects, in the same frame as the stems
    covered     : Vec<BBox>,
    /// unquanted slope, in staff spaces
    dy_damp     : f64,
    /// least squares slope, in staff spaces
    dy_mus      : f64,
    cross_staff : bool,
}

impl ScoringProblem {
    fn new(grobs : &mut Grobs, me : GrobId, pos : Drul<f64>) -> Option<Self> {
        let stems = normal_stems(grobs, me);
        let covered_grobs : Vec<GrobId> = grobs
            .objects(me, Object::CoveredGrobs)
            .iter()
            .copied()
            .filter(|&c| grobs.is_live(c))
            .collect();
        let all : Vec<GrobId> = stems.iter().chain(covered_grobs.iter()).copied().collect();
        let [common_x, common_y] = common_refpoints(grobs, me, &all)?;
        let first = *stems.first()?;

        let x0 = grobs.relative_coordinate(first, common_x, Axis::X);
        let my_y = grobs.relative_coordinate(me, common_y, Axis::Y);

        let mut data = Vec::with_capacity(stems.len());
        for &s in &stems {
            if stem::is_invisible(grobs, s) {
                continue;
            }
            let x = grobs.relative_coordinate(s, common_x, Axis::X) - x0;
            let shift = grobs.relative_coordinate(s, common_y, Axis::Y) - my_y;
            let info = stem::stem_info(grobs, s);
            data.push(StemData {
                x,
                dir  : stem::direction(grobs, s),
                info : StemInfo { ideal_y : info.ideal_y + shift, shortest_y : info.shortest_y + shift },
            });
        }
        let dx = match stems.last() {
            Some(&last) => grobs.relative_coordinate(last, common_x, Axis::X) - x0,
            None => 0.,
        };

        let mut covered = Vec::with_capacity(covered_grobs.len());
        for &c in &covered_grobs {
            // the note heads of this beam are never in the way
            let own = grobs.object(c, Object::Stem).and_then(|s| stem::get_beam(grobs, s)) == Some(me);
            if own {
                continue;
            }
            let x = grobs.extent(c, common_x, Axis::X) - x0;
            let y = grobs.extent(c, common_y, Axis::Y) - my_y;
            if !x.is_empty() && !y.is_empty() {
                covered.push(BBox::new(x, y));
            }
        }

        let dir = match grobs.direction(me) {
            Direction::Center => data.first().map_or(Direction::Up, |s| s.dir),
            dir => dir,
        };
        let dy_damp = pos.up - pos.down;
        Some(Self {
            params      : grobs.settings().beam.clone(),
            dir,
            ss          : staff::staff_space(grobs, me),
            thickness   : get_beam_thickness(grobs, me),
            translation : get_beam_translation(grobs, me),
            beam_count  : get_beam_count(grobs, me),
            dx,
            stems       : data,
            covered,
            dy_damp,
            dy_mus      : grobs.robust_number(me, Property::LeastSquaresDy, dy_damp),
            cross_staff : is_cross_staff(grobs, me),
        })
    }

    /// Height of the beam at `x`, in layout units, for ends at `left` and `right` staff spaces
    fn beam_y(&self, left : f64, right : f64, x : f64) -> f64 {
        let t = if self.dx != 0. { x / self.dx } else { 0. };
        (left + (right - left) * t) * self.ss
    }

    fn score_stem_lengths(&self, left : f64, right : f64) -> f64 {
        let mut score = Drul::new(0., 0.);
        let mut count = Drul::new(0, 0);
        for s in &self.stems {
            if s.dir.is_center() {
                continue;
            }
            let d = s.dir.sign();
            let y = self.beam_y(left, right, s.x);

            let too_short = (d * (s.info.shortest_y - y)).max(0.) / self.ss;
            let diff = d * (y - s.info.ideal_y) / self.ss;
            let length = if diff < 0. { -diff * SHRINK_EXTRA_WEIGHT } else { diff };

            score[s.dir] += self.params.stem_length_limit_penalty * too_short
                + self.params.stem_length_demerit_factor * length.powf(STEM_LENGTH_POWER);
            count[s.dir] += 1;
        }

        Direction::BOTH
            .iter()
            .filter(|&&d| count[d] > 0)
            .map(|&d| score[d] / count[d] as f64)
            .sum()
    }

    fn score_slope(&self, left : f64, right : f64) -> f64 {
        let p = &self.params;
        let dy = right - left;
        let dx = self.dx / self.ss;
        let mut dem = 0.;

        if Direction::from_sign(self.dy_damp) != Direction::from_sign(dy) {
            let damped_slope = if dx != 0. { (self.dy_damp / dx).abs() } else { 0. };
            dem += if dy == 0. && damped_slope <= p.round_to_zero_slope {
                p.hint_direction_penalty
            }
            else {
                p.damping_direction_penalty
            };
        }

        dem += p.musical_direction_factor * (dy.abs() - self.dy_mus.abs()).max(0.);

        let mut slope_penalty = p.ideal_slope_factor;
        // cross-staff beams like steep slopes for short stems
        if self.cross_staff {
            slope_penalty *= 10.;
        }
        let ideal = slope_penalty * (dy - self.dy_damp).abs();
        dem += if dy.abs() > self.dy_damp.abs() { ideal * SHRINK_EXTRA_WEIGHT } else { ideal };
        dem
    }

    fn score_staff_crossing(&self, left : f64, right : f64) -> f64 {
        let crossed = ((right - left) * 2.).round().abs();
        let ideal = (self.dy_damp * 2.).round().abs();
        self.params.staff_crossing_penalty * (crossed - ideal).abs()
    }

    fn score_collisions(&self, left : f64, right : f64) -> f64 {
        let padding = COLLISION_PADDING.to_unitless() * self.ss;
        let stacked = (self.beam_count - 1).max(0) as f64 * self.translation;

        let mut dem = 0.;
        for b in &self.covered {
            let x0 = b.x.left.max(0.);
            let x1 = b.x.right.min(self.dx);
            if x0 > x1 {
                continue;
            }
            let (y0, y1) = (self.beam_y(left, right, x0), self.beam_y(left, right, x1));
            let mut beams = Interval::new(y0.min(y1), y0.max(y1));
            beams.widen(self.thickness / 2.);
            // the other beams are stacked towards the note heads
            let inner = -self.dir;
            beams.set(inner, beams.at(inner) + inner.sign() * stacked);

            let clearance = (beams.left - b.y.right).max(b.y.left - beams.right);
            if clearance < padding {
                dem += self.params.collision_penalty * (padding - clearance) / padding;
            }
        }
        dem
    }

    fn demerits(&self, left : f64, right : f64) -> f64 {
        self.score_stem_lengths(left, right)
            + self.score_slope(left, right)
            + self.score_staff_crossing(left, right)
            + self.score_collisions(left, right)
    }

    /// Quants within the region around `y`, in staff spaces
    fn candidates(&self, y : f64) -> Vec<f64> {
        let base = (y * 2.).round() / 2.;
        let steps = 2 * self.params.region_size.max(0);
        (-steps ..= steps).map(|k| base + k as f64 / 2.).collect()
    }

    fn solve(&self, pos : Drul<f64>) -> Drul<f64> {
        let lefts = self.candidates(pos.down);
        let rights = self.candidates(pos.up);

        let mut best = pos;
        let mut best_demerits = f64::INFINITY;
        for &left in &lefts {
            for &right in &rights {
                let dem = self.demerits(left, right);
                if dem < best_demerits {
                    best_demerits = dem;
                    best = Drul::new(left, right);
                }
            }
        }
        trace!("best quant {:?} with demerits {}", best, best_demerits);
        best
    }
}

/// The quantized positions closest in quality to `pos`, in staff spaces relative to the beam
pub fn quanting(grobs : &mut Grobs, me : GrobId, pos : Drul<f64>) -> Drul<f64> {
    if !pos.down.is_finite() || !pos.up.is_finite() {
        error!("unquanted positions of beam {} are not finite", grobs.name(me));
        return pos;
    }
    match ScoringProblem::new(grobs, me, pos) {
        Some(problem) => problem.solve(pos),
        None => pos,
    }
}
