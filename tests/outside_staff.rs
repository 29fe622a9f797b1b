extern crate engrave;
#[macro_use]
extern crate serde_derive;
extern crate serde_yaml;

use std::fs::File;
use std::io::BufReader;

use engrave::geometry::{Axis, Direction};
use engrave::grob::{Interface, Property, Range};
use engrave::interval::Interval;
use engrave::layout::{compute_extent, place_outside_staff};

mod common;
use common::{approx, arena, leaf, staff};

const OUTSIDE_STAFF_YAML : &str = "tests/data/outside_staff.yaml";
const STAFF_WIDTH : f64 = 20.;

#[derive(Debug, Deserialize)]
struct Case {
    description : String,
    objects     : Vec<Object>,
}

#[derive(Debug, Deserialize)]
struct Object {
    name      : String,
    x         : (f64, f64),
    y         : (f64, f64),
    direction : Direction,
    priority  : f64,
    #[serde(default)]
    padding   : Option<f64>,
    expected  : f64,
}

fn collect_cases() -> Vec<Case> {
    let file = File::open(OUTSIDE_STAFF_YAML).expect("failed to open outside-staff cases");
    let reader = BufReader::new(file);
    serde_yaml::from_reader(reader).expect("failed to parse outside-staff cases")
}

#[test]
fn outside_staff_cases() {
    let cases = collect_cases();
    assert!(!cases.is_empty());
    let mut failed = 0;

    for case in cases.iter() {
        let mut grobs = arena();
        let s = staff(&mut grobs, STAFF_WIDTH);

        let mut children = Vec::new();
        for object in case.objects.iter() {
            let g = leaf(&mut grobs, &object.name, object.x, object.y);
            grobs.set_property(g, Property::Direction, object.direction).unwrap();
            grobs.set_property(g, Property::OutsideStaffPriority, object.priority).unwrap();
            if let Some(padding) = object.padding {
                grobs.set_property(g, Property::OutsideStaffPadding, padding).unwrap();
            }
            children.push(g);
        }

        let offsets = place_outside_staff(&mut grobs, s.group, &children);
        for ((g, offset), object) in offsets.into_iter().zip(case.objects.iter()) {
            if !approx(offset, object.expected) {
                eprintln!("{}: {} ({}) placed at {}, expected {}", case.description, object.name, g.index(), offset, object.expected);
                failed += 1;
            }
        }
    }
    assert_eq!(failed, 0);
}

#[test]
fn group_extent_includes_placed_objects() {
    let mut grobs = arena();
    let s = staff(&mut grobs, STAFF_WIDTH);
    let script = leaf(&mut grobs, "TextScript", (3., 5.), (0., 1.));
    grobs.set_property(script, Property::Direction, Direction::Up).unwrap();
    grobs.set_property(script, Property::OutsideStaffPriority, 100.).unwrap();

    place_outside_staff(&mut grobs, s.group, &[script]);
    let height = compute_extent(&mut grobs, s.group, Axis::Y, s.group, None);
    assert!(approx(height.left, -2.05));
    assert!(approx(height.right, 3.55));
}

#[test]
fn pure_height_does_not_move_objects() {
    let mut grobs = arena();
    let s = staff(&mut grobs, STAFF_WIDTH);
    let script = leaf(&mut grobs, "TextScript", (3., 5.), (0., 1.));
    grobs.set_property(script, Property::Direction, Direction::Up).unwrap();
    grobs.set_property(script, Property::OutsideStaffPriority, 100.).unwrap();
    engrave::layout::axis_group::add_element(&mut grobs, s.group, script);

    let pure = compute_extent(&mut grobs, s.group, Axis::Y, s.group, Some(Range::new(0, 10)));
    assert!(approx(pure.right, 3.55));
    assert_eq!(grobs.offset(script, Axis::Y), 0.);
}

#[test]
fn skylines_of_the_staff_group() {
    let mut grobs = arena();
    let s = staff(&mut grobs, STAFF_WIDTH);
    let low = leaf(&mut grobs, "TextScript", (12., 14.), (0., 1.));
    grobs.set_property(low, Property::Direction, Direction::Down).unwrap();
    grobs.set_property(low, Property::OutsideStaffPriority, 100.).unwrap();
    engrave::layout::axis_group::add_element(&mut grobs, s.group, low);
    assert!(grobs.has_interface(s.group, Interface::VerticalAxisGroup));

    let skylines = grobs.vertical_skylines(s.group, None);
    assert!(approx(skylines[Direction::Down].height(13.), -3.55));
    assert!(approx(skylines[Direction::Up].height(13.), 2.05));
    assert_eq!(grobs.own_extent(low, Axis::Y), Interval::new(0., 1.));
    assert!(approx(grobs.offset(low, Axis::Y), -3.55));
}
