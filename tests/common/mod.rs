#![allow(dead_code)]

use engrave::geometry::{Axis, Direction};
use engrave::grob::{Beaming, GrobId, Grobs, Interface, Object, Property};
use engrave::interval::Interval;
use engrave::layout::LayoutSettings;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn arena() -> Grobs {
    init_logger();
    Grobs::new(LayoutSettings::default())
}

pub fn approx(a : f64, b : f64) -> bool {
    (a - b).abs() < 1e-9
}

/// A grob with fixed extents
pub fn leaf(grobs : &mut Grobs, name : &str, x : (f64, f64), y : (f64, f64)) -> GrobId {
    let g = grobs.add_grob(name);
    grobs.set_extent(g, Axis::X, Interval::new(x.0, x.1));
    grobs.set_extent(g, Axis::Y, Interval::new(y.0, y.1));
    g
}

/// The axis group of a staff, with a five-line staff symbol `width` long
pub struct Staff {
    pub group  : GrobId,
    pub symbol : GrobId,
}

pub fn staff(grobs : &mut Grobs, width : f64) -> Staff {
    let group = grobs.add_grob("VerticalAxisGroup");
    grobs.add_interface(group, Interface::AxisGroup);
    grobs.add_interface(group, Interface::VerticalAxisGroup);

    let symbol = grobs.add_grob("StaffSymbol");
    grobs.add_interface(symbol, Interface::StaffSymbol);
    grobs.set_extent(symbol, Axis::X, Interval::new(0., width));
    engrave::layout::axis_group::add_element(grobs, group, symbol);
    grobs.add_object(group, Object::StaffSymbol, symbol);
    Staff { group, symbol }
}

/// A stem at `x` with its note heads between staff positions `heads`
pub struct StemSpec {
    pub x       : f64,
    pub heads   : (f64, f64),
    pub ideal_y : Option<f64>,
    pub dir     : Option<Direction>,
}

impl StemSpec {
    pub fn new(x : f64, heads : (f64, f64)) -> Self {
        Self { x, heads, ideal_y : None, dir : None }
    }

    pub fn ideal(mut self, y : f64) -> Self {
        self.ideal_y = Some(y);
        self
    }

    pub fn forced(mut self, dir : Direction) -> Self {
        self.dir = Some(dir);
        self
    }
}

/// A beam of eighth notes over the given stems, in the staff of `group`
pub fn beam(grobs : &mut Grobs, group : GrobId, stems : &[StemSpec]) -> GrobId {
    let beam = grobs.add_grob("Beam");
    grobs.set_parent(beam, group, Axis::X);
    grobs.set_parent(beam, group, Axis::Y);

    for (i, spec) in stems.iter().enumerate() {
        let stem = grobs.add_grob("Stem");
        grobs.add_interface(stem, Interface::Stem);
        grobs.set_parent(stem, group, Axis::X);
        grobs.set_parent(stem, group, Axis::Y);
        grobs.set_offset(stem, Axis::X, spec.x);
        grobs.set_property(stem, Property::HeadPositions, Interval::new(spec.heads.0, spec.heads.1)).unwrap();
        if let Some(y) = spec.ideal_y {
            grobs.set_property(stem, Property::IdealY, y).unwrap();
        }
        if let Some(dir) = spec.dir {
            grobs.set_property(stem, Property::Direction, dir).unwrap();
        }
        let beaming = Beaming {
            left  : if i == 0 { vec![] } else { vec![0] },
            right : if i + 1 == stems.len() { vec![] } else { vec![0] },
        };
        grobs.set_property(stem, Property::Beaming, beaming).unwrap();

        grobs.add_object(beam, Object::Stems, stem);
        grobs.add_object(stem, Object::Beam, beam);
    }
    grobs.add_interface(beam, Interface::Beam);
    beam
}
