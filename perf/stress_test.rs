/// This executable builds skylines out of a very large number of boxes
/// Its performance is monitored with `perf` to find out the main
/// cost centers of the `skyline` module
///
/// Takes path to a .json file representing a list of boxes, each given as
/// `[left, right, bottom, top]`, and reports the time spent building,
/// merging and measuring skylines
///
/// ```json
/// [
///   [0.0, 1.3, -0.5, 0.5],
///   [1.5, 2.8, 0.0, 1.0],
///   [2.0, 12.0, 3.76, 4.24],
///   ...
///  ]
///  ```
///
///
/// Run with:
///
/// ```bash
/// CARGO_PROFILE_RELEASE_DEBUG=true cargo flamegraph --root --example stress-test -- PATH_TO_FILE
/// ```

use std::time::Instant;

use engrave::geometry::{Axis, BBox, Direction};
use engrave::interval::Interval;
use engrave::skyline::{Skyline, SkylinePair};

/// Boxes are merged in chunks of this size, as the skylines of a staff are
const CHUNK : usize = 64;


fn main() {
	let boxes_file_path = std::env::args().nth(1).expect("Usage: stress-test PATH");
	eprintln!("Boxes from: {}", boxes_file_path);

	let boxes_file = std::fs::File::open(&boxes_file_path).unwrap();
	let boxes_buffer = std::io::BufReader::new(boxes_file);
	let raw : Vec<[f64; 4]> = serde_json::from_reader(boxes_buffer).unwrap();
	let boxes : Vec<BBox> = raw
		.iter()
		.map(|&[left, right, bottom, top]| BBox::new(Interval::new(left, right), Interval::new(bottom, top)))
		.collect();

	let start = Instant::now();
	let whole = SkylinePair::from_boxes(&boxes, 0.1, Axis::X);
	eprintln!("built from {} boxes in {:?}", boxes.len(), start.elapsed());

	let start = Instant::now();
	let mut merged = Skyline::new(Direction::Up);
	let mut n_chunks = 0;
	for chunk in boxes.chunks(CHUNK) {
		merged.merge(&Skyline::from_boxes(chunk, 0.1, Axis::X, Direction::Up));
		n_chunks += 1;
	}
	eprintln!("merged {} chunks in {:?}", n_chunks, start.elapsed());

	let start = Instant::now();
	let mut n_distances = 0;
	let mut max_distance = f64::NEG_INFINITY;
	for chunk in boxes.chunks(CHUNK) {
		let above = SkylinePair::from_boxes(chunk, 0., Axis::X);
		max_distance = max_distance.max(above[Direction::Down].distance(&whole[Direction::Up], 0.));
		n_distances += 1;
	}
	eprintln!("{} distances in {:?}, largest {}", n_distances, start.elapsed(), max_distance);
}
