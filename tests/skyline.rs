extern crate engrave;
extern crate rand;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use engrave::geometry::{Axis, BBox, Direction};
use engrave::interval::Interval;
use engrave::skyline::{Skyline, SkylinePair};

const SEED : u64 = 0x5ce7_1e5;
const N_ROUNDS : usize = 50;

fn random_boxes(rng : &mut StdRng, n : usize) -> Vec<BBox> {
    (0 .. n)
        .map(|_| {
            let x = rng.gen_range(0.0 .. 100.0);
            let w = rng.gen_range(1.0 .. 10.0);
            let y = rng.gen_range(-10.0 .. 10.0);
            let h = rng.gen_range(0.5 .. 5.0);
            BBox::new(Interval::new(x, x + w), Interval::new(y, y + h))
        })
        .collect()
}

/// Samples too close to an edge are skipped: slivers narrower than the skyline precision may be dropped
fn near_edge(boxes : &[BBox], x : f64) -> bool {
    boxes.iter().any(|b| (b.x.left - x).abs() < 1e-4 || (b.x.right - x).abs() < 1e-4)
}

fn covers(b : &BBox, x : f64) -> bool {
    b.x.left < x && x < b.x.right
}

/// Highest top (lowest bottom for `Down`) among the boxes over `x`
fn brute_height(boxes : &[BBox], x : f64, sky : Direction) -> f64 {
    let tops = boxes.iter().filter(|b| covers(b, x)).map(|b| sky.sign() * b.y.at(sky));
    sky.sign() * tops.fold(f64::NEG_INFINITY, f64::max)
}

fn brute_distance(above : &[BBox], below : &[BBox]) -> f64 {
    let mut dist = f64::NEG_INFINITY;
    for a in above {
        for b in below {
            if a.x.left.max(b.x.left) < a.x.right.min(b.x.right) {
                dist = dist.max(a.y.right - b.y.left);
            }
        }
    }
    dist
}

#[test]
fn envelope_of_random_boxes() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for round in 0 .. N_ROUNDS {
        let n = rng.gen_range(1 .. 30);
        let boxes = random_boxes(&mut rng, n);

        for &sky in Direction::BOTH.iter() {
            let skyline = Skyline::from_boxes(&boxes, 0., Axis::X, sky);
            for k in 0 .. 250 {
                let x = -5. + 0.4631 * k as f64;
                if near_edge(&boxes, x) {
                    continue;
                }
                let expected = brute_height(&boxes, x, sky);
                let found = skyline.height(x);
                if found != expected && (found - expected).abs() > 1e-9 {
                    panic!("round {}: {:?} skyline at {} is {}, expected {}", round, sky, x, found, expected);
                }
            }
        }
    }
}

#[test]
fn merging_is_building_at_once() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    for _ in 0 .. N_ROUNDS {
        let boxes = random_boxes(&mut rng, 20);
        let (first, second) = boxes.split_at(7);

        let whole = Skyline::from_boxes(&boxes, 0., Axis::X, Direction::Up);
        let mut merged = Skyline::from_boxes(first, 0., Axis::X, Direction::Up);
        merged.merge(&Skyline::from_boxes(second, 0., Axis::X, Direction::Up));

        for k in 0 .. 200 {
            let x = 0.5731 * k as f64;
            if near_edge(&boxes, x) {
                continue;
            }
            let (a, b) = (whole.height(x), merged.height(x));
            assert!(a == b || (a - b).abs() < 1e-9, "{} vs {} at {}", a, b, x);
        }
    }
}

#[test]
fn distance_of_random_boxes() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    for round in 0 .. N_ROUNDS {
        let above = random_boxes(&mut rng, 10);
        let below = random_boxes(&mut rng, 10);

        let up = Skyline::from_boxes(&below, 0., Axis::X, Direction::Up);
        let down = Skyline::from_boxes(&above, 0., Axis::X, Direction::Down);
        // how far `above` must rise to clear `below`
        let expected = brute_distance(&below, &above);
        let found = down.distance(&up, 0.);
        eprintln!("round {}: {} / {}", round, found, expected);
        assert!(found == expected || (found - expected).abs() < 1e-9);
    }
}

#[test]
fn raising_pairs() {
    let mut rng = StdRng::seed_from_u64(SEED + 3);
    let boxes = random_boxes(&mut rng, 15);
    let mut pair = SkylinePair::from_boxes(&boxes, 0., Axis::X);
    let before = pair.clone();
    pair.raise(2.5);
    pair.shift(-1.);

    for k in 0 .. 100 {
        let x = 1.137 * k as f64;
        if near_edge(&boxes, x + 1.) {
            continue;
        }
        for &d in Direction::BOTH.iter() {
            let (a, b) = (before[d].height(x + 1.), pair[d].height(x));
            if a.is_finite() {
                assert!((b - a - 2.5).abs() < 1e-9);
            }
            else {
                assert_eq!(a, b);
            }
        }
    }
}
