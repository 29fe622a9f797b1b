//! Interfaces: capability tags of grobs, and the callbacks each of them installs.

use crate::geometry::Axis;
use crate::layout::{axis_group, side_position, staff};
use crate::beam;
use super::{ExtentCallback, OffsetCallback, SkylinesCallback};

/// Capability tags. A grob may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Interface {
    /// Extent is the union of the members' extents
    AxisGroup,
    /// Axis group of a staff: places its outside-staff members with skylines
    VerticalAxisGroup,
    /// Placed next to its supports
    SidePosition,
    /// The lines of a staff
    StaffSymbol,
    NoteHead,
    NoteColumn,
    Stem,
    Beam,
}

/// Callbacks installed on a grob when it gains an interface.
/// Callbacks already present on the grob are not replaced.
#[derive(Default)]
pub struct CallbackTable {
    /// extent callbacks, X then Y
    pub extent   : [Option<ExtentCallback>; 2],
    /// offset callbacks, X then Y
    pub offset   : [Option<OffsetCallback>; 2],
    /// vertical skylines callback
    pub skylines : Option<SkylinesCallback>,
}

impl Interface {
    pub fn callbacks(self) -> CallbackTable {
        let mut table = CallbackTable::default();
        match self {
            Interface::AxisGroup => {
                table.extent = [Some(axis_group::group_extent), Some(axis_group::group_extent)];
            },
            Interface::VerticalAxisGroup => {
                table.extent[Axis::Y.index()] = Some(axis_group::group_extent);
                table.skylines = Some(axis_group::calc_skylines);
            },
            Interface::SidePosition => {
                table.offset[Axis::Y.index()] = Some(side_position::aligned_side_callback);
            },
            Interface::Beam => {
                table.extent = [Some(beam::beam_extent), Some(beam::beam_extent)];
                table.skylines = Some(beam::beam_skylines);
            },
            Interface::StaffSymbol => {
                table.extent[Axis::Y.index()] = Some(staff::symbol_height);
            },
            Interface::NoteHead | Interface::NoteColumn | Interface::Stem => (),
        }
        table
    }
}
