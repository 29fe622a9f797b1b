//! Piecewise-linear outlines of sets of boxes.
//!
//! A [`Skyline`] is the upper (or lower) envelope of a set of boxes and segments, seen along a horizon axis.
//! It is a list of contiguous [`Building`]s covering the whole real line: the first one starts at `-∞`, the last
//! one ends at `+∞`, and a building at height `-∞` means "nothing here".
//!
//! `Down` skylines are stored upside-down (every height is negated), so that the merging and distance
//! algorithms are written once, for skylines pointing up. [`Skyline::height`] undoes the negation.
//!
//! Example: the up skyline of boxes `[0, 2] × [0, 1]`, `[1, 3] × [0, 3]` and `[5, 6] × [0, 2]` is
//!
//! ```text
//!          ___
//!       __|   |      _
//!      |      |     | |
//! -∞ __|      |_____| |__ +∞
//! ```

mod building;
mod pair;

use std::collections::VecDeque;

use crate::geometry::{Axis, BBox, Direction, Point};
use crate::interval::IntervalSet;

pub use self::building::Building;
pub use self::pair::SkylinePair;

/// Buildings narrower than this are dropped, and intersections closer than this to the current position are not split off.
pub const EPS : f64 = 1e-5;

const INF : f64 = f64::INFINITY;

/// The envelope of a set of boxes, in direction `sky`.
#[derive(Debug, Clone, PartialEq)]
pub struct Skyline {
    buildings : Vec<Building>,
    sky       : Direction,
}

impl Skyline {
    /// The empty skyline pointing in direction `sky`
    pub fn new(sky : Direction) -> Self {
        debug_assert!(!sky.is_center());
        Self { buildings : empty_skyline(), sky }
    }

    /// The envelope of `boxes`, each widened by `horizon_padding` along `horizon_axis`.
    ///
    /// Boxes that are empty, have a NaN bound or are narrower than [`EPS`] along the horizon are ignored.
    pub fn from_boxes(boxes : &[BBox], horizon_padding : f64, horizon_axis : Axis, sky : Direction) -> Self {
        let buildings = boxes
            .iter()
            .filter(|b| usable_box(b, horizon_axis))
            .map(|b| Building::from_box(b, horizon_padding, horizon_axis, sky))
            .collect();

        Self { buildings : internal_build_skyline(buildings), sky }
    }

    /// The envelope of a single box
    pub fn from_box(b : &BBox, horizon_padding : f64, horizon_axis : Axis, sky : Direction) -> Self {
        let buildings = if usable_box(b, horizon_axis) {
            single_skyline(Building::from_box(b, horizon_padding, horizon_axis, sky))
        }
        else {
            empty_skyline()
        };
        Self { buildings, sky }
    }

    /// The envelope of a set of line segments, given as pairs of endpoints.
    /// Segments (almost) perpendicular to the horizon contribute nothing.
    pub fn from_segments(segments : &[(Point, Point)], horizon_axis : Axis, sky : Direction) -> Self {
        let mut buildings = Vec::with_capacity(segments.len());
        for &(p1, p2) in segments {
            let (mut p1, mut p2) = match horizon_axis {
                Axis::X => (p1, p2),
                Axis::Y => (p1.swapped(), p2.swapped()),
            };
            if p1.x.is_nan() || p1.y.is_nan() || p2.x.is_nan() || p2.y.is_nan() {
                error!("skyline given a segment with NaN coordinates");
                continue;
            }
            if p1.x > p2.x {
                std::mem::swap(&mut p1, &mut p2);
            }
            if p1.x + EPS < p2.x && p1.x.is_finite() && p2.x.is_finite() {
                buildings.push(Building::from_segment(p1, p2, sky));
            }
        }

        Self { buildings : internal_build_skyline(buildings), sky }
    }

    /// The merge of the `sky` halves of a list of skyline pairs
    pub fn from_pairs(pairs : &[SkylinePair], sky : Direction) -> Self {
        let mut partials : VecDeque<Vec<Building>> = pairs
            .iter()
            .map(|p| &p[sky])
            .filter(|s| !s.is_empty())
            .map(|s| s.buildings.clone())
            .collect();

        while partials.len() > 1 {
            if let (Some(one), Some(two)) = (partials.pop_front(), partials.pop_front()) {
                partials.push_back(internal_merge_skyline(one.into(), two.into()));
            }
        }

        Self { buildings : partials.pop_front().unwrap_or_else(empty_skyline), sky }
    }

    /// Buildings already in stored orientation, in any order and possibly overlapping.
    fn from_buildings(mut buildings : Vec<Building>, sky : Direction) -> Self {
        buildings.retain(|b| b.end > b.start + EPS);
        Self { buildings : internal_build_skyline(buildings), sky }
    }

    pub fn direction(&self) -> Direction {
        self.sky
    }

    /// Buildings in stored orientation (heights negated for `Down` skylines)
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Replaces `self` by the envelope of `self` and `other`
    pub fn merge(&mut self, other : &Skyline) {
        if other.sky != self.sky {
            error!("cannot merge skylines pointing in opposite directions");
            return;
        }
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            self.buildings = other.buildings.clone();
            return;
        }

        let mine = std::mem::take(&mut self.buildings);
        self.buildings = internal_merge_skyline(mine.into(), other.buildings.iter().copied().collect());
    }

    /// Adds a box to the envelope
    pub fn insert(&mut self, b : &BBox, horizon_padding : f64, horizon_axis : Axis) {
        if !usable_box(b, horizon_axis) {
            return;
        }

        let other = single_skyline(Building::from_box(b, horizon_padding, horizon_axis, self.sky));
        let mine = std::mem::take(&mut self.buildings);
        self.buildings = internal_merge_skyline(mine.into(), other.into());
    }

    /// Moves the skyline by `r` perpendicularly to the horizon
    pub fn raise(&mut self, r : f64) {
        let r = self.sky.sign() * r;
        for b in self.buildings.iter_mut() {
            b.y_intercept += r;
        }
    }

    /// Moves the skyline by `s` along the horizon
    pub fn shift(&mut self, s : f64) {
        for b in self.buildings.iter_mut() {
            b.shift(s);
        }
    }

    /// Empties the skyline
    pub fn clear(&mut self) {
        self.buildings = empty_skyline();
    }

    /// How far `other` (pointing the other way) must be moved in direction `sky` to not overlap `self`,
    /// with at least `horizon_padding` between them along the horizon.
    /// This is `-∞` when the skylines have no horizontal overlap.
    pub fn distance(&self, other : &Skyline, horizon_padding : f64) -> f64 {
        self.internal_distance(other, horizon_padding).0
    }

    /// A point of the horizon where the distance to `other` is attained
    pub fn touching_point(&self, other : &Skyline, horizon_padding : f64) -> f64 {
        self.internal_distance(other, horizon_padding).1
    }

    fn internal_distance(&self, other : &Skyline, horizon_padding : f64) -> (f64, f64) {
        if self.sky == other.sky {
            error!("distance between skylines pointing in the same direction");
        }

        if horizon_padding != 0. {
            // padding one side is enough
            return self.padded(horizon_padding).internal_distance(other, 0.);
        }

        let mut dist  = f64::NEG_INFINITY;
        let mut start = f64::NEG_INFINITY;
        let mut touch = INF;

        let (mut i, mut j) = (0, 0);
        while i < self.buildings.len() && j < other.buildings.len() {
            let bi = &self.buildings[i];
            let bj = &other.buildings[j];

            let end = bi.end.min(bj.end);
            let start_dist = bi.height(start) + bj.height(start);
            let end_dist   = bi.height(end)   + bj.height(end);
            dist = dist.max(start_dist.max(end_dist));

            if end_dist == dist {
                touch = end;
            }
            else if start_dist == dist {
                touch = start;
            }

            if bi.end <= bj.end {
                i += 1;
            }
            else {
                j += 1;
            }
            start = end;
        }

        (dist, touch)
    }

    /// Height of the envelope at `x`. `-∞` (`+∞` for `Down` skylines) where there is nothing.
    ///
    /// Querying an infinite `x` is a programming error ; the height of the outermost building on that side is returned.
    pub fn height(&self, x : f64) -> f64 {
        let sky = self.sky.sign();
        if x.is_infinite() {
            error!("skyline height queried at {}", x);
            let outer = if x < 0. { self.buildings.first() } else { self.buildings.last() };
            return sky * outer.map_or(f64::NEG_INFINITY, |b| b.y_intercept);
        }

        match self.buildings.iter().find(|b| b.end > x) {
            Some(b) => sky * b.height(x),
            None    => sky * f64::NEG_INFINITY,
        }
    }

    /// Highest point of the envelope (lowest for `Down` skylines)
    pub fn max_height(&self) -> f64 {
        let ret = self.buildings
            .iter()
            .map(|b| b.height(b.start).max(b.height(b.end)))
            .fold(f64::NEG_INFINITY, f64::max);
        self.sky.sign() * ret
    }

    /// A point of the horizon where [`Skyline::max_height`] is attained
    pub fn max_height_position(&self) -> f64 {
        let mut s = Skyline::new(-self.sky);
        s.set_minimum_height(0.);
        self.touching_point(&s, 0.)
    }

    /// Raises every part of the envelope lower than `h` to `h` (lowers, for `Down` skylines).
    pub fn set_minimum_height(&mut self, h : f64) {
        let floor = Skyline {
            buildings : vec![Building { start : -INF, end : INF, y_intercept : self.sky.sign() * h, slope : 0. }],
            sky       : self.sky,
        };
        self.merge(&floor);
    }

    /// The skyline with each building widened by `horizon_padding` on both sides, heights unchanged.
    pub fn padded(&self, horizon_padding : f64) -> Skyline {
        if horizon_padding <= 0. {
            return self.clone();
        }

        let mut pads = Vec::with_capacity(2 * self.buildings.len());
        let mut last_end = f64::NEG_INFINITY;
        for b in &self.buildings {
            if last_end > f64::NEG_INFINITY {
                let h = b.height(last_end);
                if h > f64::NEG_INFINITY {
                    pads.push(Building::new(last_end - horizon_padding, h, h, last_end));
                }
            }

            if b.end < INF {
                let h = b.height(b.end);
                if h > f64::NEG_INFINITY {
                    pads.push(Building::new(b.end, h, h, b.end + horizon_padding));
                }
            }
            last_end = b.end;
        }

        let mut padded = Skyline::from_buildings(pads, self.sky);
        padded.merge(self);
        padded
    }

    /// The smallest shift of `self` along the horizon, in direction `d`, after which it no longer overlaps `other`
    /// (pointing the other way), keeping `horizon_padding` and `vertical_padding` between them.
    /// Returns `0` if they do not overlap and `±∞` if no shift in direction `d` separates them.
    ///
    /// This compares every pair of buildings: quadratic in the number of buildings, use sparingly.
    pub fn horizontal_distance(&self, other : &Skyline, d : Direction, horizon_padding : f64, vertical_padding : f64) -> f64 {
        let mut padded_me = self.padded(horizon_padding);
        padded_me.raise(self.sky.sign() * vertical_padding);

        let mut forbidden_shifts = Vec::new();
        for i in padded_me.buildings.iter().filter(|b| b.y_intercept != f64::NEG_INFINITY) {
            for j in &other.buildings {
                let iv = i.overlapping_shift_interval(j);
                if !iv.is_empty() {
                    forbidden_shifts.push(iv);
                }
            }
        }

        IntervalSet::interval_union(forbidden_shifts)
            .complement()
            .nearest_point(0., d)
    }

    /// Start of the first non-empty building ; `+∞` for the empty skyline.
    pub fn left(&self) -> f64 {
        self.buildings
            .iter()
            .find(|b| b.y_intercept > f64::NEG_INFINITY)
            .map_or(INF, |b| b.start)
    }

    /// End of the last non-empty building ; `-∞` for the empty skyline.
    pub fn right(&self) -> f64 {
        self.buildings
            .iter()
            .rev()
            .find(|b| b.y_intercept > f64::NEG_INFINITY)
            .map_or(f64::NEG_INFINITY, |b| b.end)
    }

    pub fn is_empty(&self) -> bool {
        match self.buildings.first() {
            None    => true,
            Some(b) => b.end == INF && b.y_intercept == f64::NEG_INFINITY,
        }
    }

    /// Corners of the envelope, in page coordinates (actual heights, horizon along `horizon_axis`).
    pub fn to_points(&self, horizon_axis : Axis) -> Vec<Point> {
        let sky = self.sky.sign();
        let mut out = Vec::with_capacity(2 * self.buildings.len());
        for b in &self.buildings {
            out.push(Point::new(b.start, sky * b.height(b.start)));
            out.push(Point::new(b.end,   sky * b.height(b.end)));
        }

        if horizon_axis == Axis::Y {
            for p in out.iter_mut() {
                *p = p.swapped();
            }
        }
        out
    }
}


fn usable_box(b : &BBox, horizon_axis : Axis) -> bool {
    if b.has_nan() {
        error!("skyline given a box with NaN bounds");
        return false;
    }
    b.extent(horizon_axis).length() > EPS && !b.extent(horizon_axis.other()).is_empty()
}

fn empty_skyline() -> Vec<Building> {
    vec![Building::empty(f64::NEG_INFINITY, INF)]
}

fn single_skyline(b : Building) -> Vec<Building> {
    if !(b.end > b.start + EPS) {
        return empty_skyline();
    }

    let mut result = Vec::with_capacity(3);
    if b.start > f64::NEG_INFINITY {
        result.push(Building::empty(f64::NEG_INFINITY, b.start));
    }
    result.push(b);
    if b.end < INF {
        result.push(Building::empty(b.end, INF));
    }
    result
}

/// Takes from `buildings` (sorted by start) a maximal set of non-overlapping buildings, and turns them into a skyline.
/// Buildings concealed by the last one taken are dropped ; the others stay in `buildings` for the next round.
fn non_overlapping_skyline(buildings : &mut Vec<Building>) -> Vec<Building> {
    let mut result    = Vec::new();
    let mut remaining = Vec::new();
    let mut last_end  = f64::NEG_INFINITY;
    let mut last_building = Building::empty(f64::NEG_INFINITY, INF);

    for mut b in buildings.drain(..) {
        let x1 = b.start;
        let y1 = b.height(x1);
        let x2 = b.end;
        let y2 = b.height(x2);

        // entirely below the last building: useless
        if last_building.height(x1) >= y1 && last_building.end >= x2 && last_building.height(x2) >= y2 {
            continue;
        }

        if x1 < last_end {
            remaining.push(b);
            continue;
        }

        if x1 > last_end + EPS {
            result.push(Building::empty(last_end, x1));
        }
        else {
            b.start = last_end;
        }

        result.push(b);
        last_building = b;
        last_end = b.end;
    }

    if last_end < INF {
        result.push(Building::empty(last_end, INF));
    }

    *buildings = remaining;
    result
}

/// The position of the first point after `start_x` where `b` stops being the top building of `b ∪ s`.
/// Buildings of `s` that end before that point are consumed.
fn first_intersection(b : &Building, s : &mut VecDeque<Building>, mut start_x : f64) -> f64 {
    while let Some(&c) = s.front() {
        if start_x >= b.end {
            break;
        }

        // skip the geometry if we can
        if c.y_intercept == f64::NEG_INFINITY {
            if c.end > b.end {
                return b.end;
            }
            start_x = c.end;
            s.pop_front();
            continue;
        }

        if c.conceals(b, start_x) {
            return start_x;
        }

        let i = b.intersection_x(&c);
        if i > start_x && i <= b.end && i <= c.end {
            return i;
        }

        start_x = c.end;
        if b.end > c.end {
            s.pop_front();
        }
    }
    b.end
}

fn internal_merge_skyline(mut s1 : VecDeque<Building>, mut s2 : VecDeque<Building>) -> Vec<Building> {
    if s1.is_empty() || s2.is_empty() {
        error!("tried to merge an empty list of buildings");
        return empty_skyline();
    }

    let mut result : Vec<Building> = Vec::with_capacity(s1.len() + s2.len());
    let mut x = f64::NEG_INFINITY;

    while let Some(&front1) = s1.front() {
        let concealed = match s2.front() {
            Some(front2) => front2.conceals(&front1, x),
            None         => {
                result.extend(s1.drain(..));
                break;
            }
        };
        if concealed {
            std::mem::swap(&mut s1, &mut s2);
        }

        let (mut b, c) = match (s1.front(), s2.front()) {
            (Some(&b), Some(&c)) => (b, c),
            _                    => break,
        };
        let last_end = result.last().map_or(x, |l| l.end);

        // optimization: if the other skyline is empty here, take everything from s1 that fits
        if c.y_intercept == f64::NEG_INFINITY && c.end >= b.end {
            let mut n = 1;
            while n < s1.len() && s1[n].end <= c.end {
                n += 1;
            }
            if let Some(first) = s1.front_mut() {
                first.start = last_end;
            }
            result.extend(s1.drain(..n));
            x = result.last().map_or(x, |l| l.end);
            continue;
        }

        let end = first_intersection(&b, &mut s2, x);
        if s2.is_empty() {
            b.start = last_end;
            result.push(b);
            break;
        }

        // slivers are not worth a building
        if end > x + EPS {
            b.leading_part(end);
            b.start = last_end;
            result.push(b);
        }

        if s1.front().map_or(false, |f| end >= f.end) {
            s1.pop_front();
        }

        x = end;
    }

    result
}

fn internal_build_skyline(mut buildings : Vec<Building>) -> Vec<Building> {
    match buildings.len() {
        0 => return empty_skyline(),
        1 => return single_skyline(buildings[0]),
        _ => (),
    }

    buildings.sort_by(|a, b| {
        a.start
            .total_cmp(&b.start)
            .then_with(|| b.height(b.start).total_cmp(&a.height(a.start)))
    });

    let mut partials = VecDeque::new();
    while !buildings.is_empty() {
        partials.push_back(non_overlapping_skyline(&mut buildings));
    }

    while partials.len() > 1 {
        if let (Some(one), Some(two)) = (partials.pop_front(), partials.pop_front()) {
            partials.push_back(internal_merge_skyline(one.into(), two.into()));
        }
    }

    partials.pop_front().unwrap_or_else(empty_skyline)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;

    fn bbox(x1 : f64, x2 : f64, y1 : f64, y2 : f64) -> BBox {
        BBox::new(Interval::new(x1, x2), Interval::new(y1, y2))
    }

    fn three_boxes(sky : Direction) -> Skyline {
        let boxes = [
            bbox(0., 2., 0., 1.),
            bbox(1., 3., 0., 3.),
            bbox(5., 6., 0., 2.),
        ];
        Skyline::from_boxes(&boxes, 0., Axis::X, sky)
    }

    fn assert_well_formed(s : &Skyline) {
        let b = s.buildings();
        assert_eq!(b[0].start, f64::NEG_INFINITY);
        assert_eq!(b[b.len() - 1].end, INF);
        for pair in b.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "buildings are not contiguous: {:?}", b);
        }
        for building in b {
            if building.start.is_infinite() || building.end.is_infinite() {
                assert_eq!(building.slope, 0.);
            }
        }
    }

    #[test]
    fn heights_of_three_boxes() {
        let s = three_boxes(Direction::Up);
        assert_well_formed(&s);

        let cases = [
            (-1.,  f64::NEG_INFINITY),
            (0.5,  1.),
            (1.5,  3.),
            (2.5,  3.),
            (4.,   f64::NEG_INFINITY),
            (5.5,  2.),
            (7.,   f64::NEG_INFINITY),
        ];
        for (x, expected) in cases {
            eprintln!("height at {}", x);
            assert_eq!(s.height(x), expected);
        }

        assert_eq!(s.max_height(), 3.);
        assert_eq!(s.left(), 0.);
        assert_eq!(s.right(), 6.);
        assert!(!s.is_empty());
    }

    #[test]
    fn down_skylines() {
        let s = three_boxes(Direction::Down);
        assert_well_formed(&s);
        assert_eq!(s.height(1.5), 0.);
        assert_eq!(s.height(4.), INF);
        assert_eq!(s.max_height(), 0.);
    }

    #[test]
    fn degenerate_boxes_are_ignored() {
        let boxes = [
            bbox(1., 1., 0., 5.),
            bbox(0., 1., 2., 1.),
            bbox(f64::NAN, 1., 0., 1.),
        ];
        let s = Skyline::from_boxes(&boxes, 0., Axis::X, Direction::Up);
        assert!(s.is_empty());
        assert_eq!(s.left(), INF);
        assert_eq!(s.right(), f64::NEG_INFINITY);
    }

    #[test]
    fn merge_and_insert() {
        let mut s = Skyline::new(Direction::Up);
        s.insert(&bbox(0., 2., 0., 1.), 0., Axis::X);
        s.insert(&bbox(1., 3., 0., 3.), 0., Axis::X);
        s.insert(&bbox(5., 6., 0., 2.), 0., Axis::X);
        assert_well_formed(&s);
        assert_eq!(s, three_boxes(Direction::Up));

        let empty = Skyline::new(Direction::Up);
        let mut merged = s.clone();
        merged.merge(&empty);
        assert_eq!(merged, s);

        let mut other = Skyline::new(Direction::Up);
        other.merge(&s);
        assert_eq!(other, s);
    }

    #[test]
    fn sloped_segments() {
        let segments = [
            (Point::new(0., 0.), Point::new(4., 4.)),
            (Point::new(4., 0.), Point::new(0., 4.)),
        ];
        let s = Skyline::from_segments(&segments, Axis::X, Direction::Up);
        assert_well_formed(&s);
        assert_eq!(s.height(1.), 3.);
        assert_eq!(s.height(2.), 2.);
        assert_eq!(s.height(3.), 3.);
    }

    #[test]
    fn raise_and_shift() {
        let mut s = three_boxes(Direction::Up);
        s.raise(2.);
        s.shift(10.);
        assert_eq!(s.height(11.5), 5.);
        assert_eq!(s.left(), 10.);

        s.shift(-10.);
        s.raise(-2.);
        assert_eq!(s, three_boxes(Direction::Up));
    }

    #[test]
    fn distance_between_stacked_boxes() {
        // staff-like box below, a box above it that must be lifted
        let below = Skyline::from_box(&bbox(0., 10., -2., 2.), 0., Axis::X, Direction::Up);
        let above = Skyline::from_box(&bbox(3., 4., 1., 1.5), 0., Axis::X, Direction::Down);

        assert_eq!(below.distance(&above, 0.), 1.);
        assert_eq!(above.distance(&below, 0.), 1.);

        // no horizontal overlap
        let aside = Skyline::from_box(&bbox(20., 21., 0., 1.), 0., Axis::X, Direction::Down);
        assert_eq!(below.distance(&aside, 0.), f64::NEG_INFINITY);
        // unless padded enough
        assert_eq!(below.distance(&aside, 10.5), 2.);
    }

    #[test]
    fn touching_point() {
        let below = three_boxes(Direction::Up);
        let mut above = Skyline::new(Direction::Down);
        above.set_minimum_height(10.);
        assert_eq!(below.distance(&above, 0.), -7.);
        let touch = below.touching_point(&above, 0.);
        assert!(touch >= 1. && touch <= 3.);
        let position = below.max_height_position();
        assert!(position >= 1. && position <= 3.);
    }

    #[test]
    fn minimum_height() {
        let mut s = three_boxes(Direction::Up);
        s.set_minimum_height(1.5);
        assert_eq!(s.height(0.5), 1.5);
        assert_eq!(s.height(1.5), 3.);
        assert_eq!(s.height(-100.), 1.5);
    }

    #[test]
    fn padding() {
        let s = three_boxes(Direction::Up);
        assert_eq!(s.padded(0.), s);

        let p = s.padded(0.5);
        assert_well_formed(&p);
        assert_eq!(p.height(-0.25), 1.);
        assert_eq!(p.height(3.25), 3.);
        assert_eq!(p.height(4.), f64::NEG_INFINITY);
        assert_eq!(p.height(4.75), 2.);
    }

    #[test]
    fn horizontal_distance() {
        let left  = Skyline::from_box(&bbox(0., 2., 0., 2.), 0., Axis::X, Direction::Up);
        let right = Skyline::from_box(&bbox(1., 3., 0., 2.), 0., Axis::X, Direction::Down);

        // `left` has to move left by one to clear `right`, or right by three.
        assert_eq!(left.horizontal_distance(&right, Direction::LEFT, 0., 0.), -1.);
        assert_eq!(left.horizontal_distance(&right, Direction::RIGHT, 0., 0.), 3.);

        let far = Skyline::from_box(&bbox(10., 11., 0., 2.), 0., Axis::X, Direction::Down);
        assert_eq!(left.horizontal_distance(&far, Direction::LEFT, 0., 0.), 0.);
    }

    #[test]
    fn points() {
        let s = Skyline::from_box(&bbox(0., 1., 0., 2.), 0., Axis::Y, Direction::Up);
        let points = s.to_points(Axis::Y);
        // the right edge of the box, seen from the right
        assert!(points.contains(&Point::new(1., 0.)));
        assert!(points.contains(&Point::new(1., 2.)));
    }
}
