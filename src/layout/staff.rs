//! Staff symbols, and measuring grobs against the staff they belong to.

use crate::dimensions::{units::{HalfSpace, Space}, Unit};
use crate::geometry::Axis;
use crate::grob::{GrobId, Grobs, Interface, Object, Property, Range};
use crate::interval::Interval;
use super::constants::{DEFAULT_LINE_COUNT, DEFAULT_LINE_THICKNESS, DEFAULT_STAFF_SPACE};

/// The staff symbol `me` is measured against: `me` itself if it is a staff symbol, else the one it or its closest
/// vertical ancestor links to.
pub fn get_staff_symbol(grobs : &Grobs, me : GrobId) -> Option<GrobId> {
    if grobs.has_interface(me, Interface::StaffSymbol) {
        return Some(me);
    }
    grobs
        .ancestors(me, Axis::Y)
        .into_iter()
        .find_map(|g| grobs.object(g, Object::StaffSymbol))
}

/// Distance between two lines of the staff of `me`, in layout units
pub fn staff_space(grobs : &Grobs, me : GrobId) -> f64 {
    match get_staff_symbol(grobs, me) {
        Some(staff) => grobs.robust_number(staff, Property::StaffSpace, DEFAULT_STAFF_SPACE),
        None        => DEFAULT_STAFF_SPACE,
    }
}

/// Thickness of the lines of the staff of `me`, in layout units
pub fn line_thickness(grobs : &Grobs, me : GrobId) -> f64 {
    match get_staff_symbol(grobs, me) {
        Some(staff) => grobs.robust_number(staff, Property::LineThickness, DEFAULT_LINE_THICKNESS),
        None        => DEFAULT_LINE_THICKNESS,
    }
}

pub fn line_count(grobs : &Grobs, staff : GrobId) -> i64 {
    grobs.integer(staff, Property::LineCount).unwrap_or(DEFAULT_LINE_COUNT)
}

/// Half the height of the staff of `me` ; 0 without a staff.
pub fn staff_radius(grobs : &Grobs, me : GrobId) -> Unit<Space> {
    match get_staff_symbol(grobs, me) {
        Some(staff) => Unit::<Space>::new((line_count(grobs, staff) - 1) as f64 / 2.),
        None        => Unit::ZERO,
    }
}

/// Whether staff position `pos` falls on a line of the staff of `me`
pub fn on_line(grobs : &Grobs, me : GrobId, pos : i64) -> bool {
    match get_staff_symbol(grobs, me) {
        Some(staff) => (pos + line_count(grobs, staff)).abs() % 2 == 1,
        None        => false,
    }
}

/// Vertical position of `me` on its staff: its `StaffPosition` if set, else computed from its coordinate.
pub fn get_position(grobs : &mut Grobs, me : GrobId) -> Unit<HalfSpace> {
    if let Some(pos) = grobs.number(me, Property::StaffPosition) {
        return Unit::new(pos);
    }
    match get_staff_symbol(grobs, me) {
        Some(staff) => {
            let y = grobs.relative_coordinate(me, staff, Axis::Y);
            Unit::<Space>::new(y / staff_space(grobs, staff)).to_staff_position()
        },
        None => Unit::ZERO,
    }
}

/// Extent callback of staff symbols: the lines, plus half a line thickness on each side.
pub fn symbol_height(grobs : &mut Grobs, me : GrobId, _axis : Axis, _range : Option<Range>) -> Interval {
    let radius = staff_radius(grobs, me).to_unitless() * staff_space(grobs, me);
    let mut height = Interval::new(-radius, radius);
    height.widen(line_thickness(grobs, me) / 2.);
    height
}
