//! Typed properties and object links of grobs.

use crate::geometry::{Axis, Direction};
use crate::interval::Interval;

/// The kind of value a [`Property`] holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Integer,
    Bool,
    Direction,
    Axis,
    Axes,
    Interval,
    Beaming,
}

/// Which beams a stem carries on each side, as beam ranks.
///
/// Before [`calc_beaming`](crate::beam::calc_beaming) runs, the ranks of a stem with `n` beams are simply `0 .. n` on the
/// sides where it connects ; afterwards they are positions in the beam stack, shared between neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Beaming {
    pub left  : Vec<i32>,
    pub right : Vec<i32>,
}

impl Beaming {
    /// A stem with `count` beams on both sides
    pub fn uniform(count : i32) -> Self {
        Self {
            left  : (0 .. count).collect(),
            right : (0 .. count).collect(),
        }
    }

    pub fn side(&self, d : Direction) -> &[i32] {
        match d {
            Direction::Down => &self.left,
            _               => &self.right,
        }
    }

    pub fn side_mut(&mut self, d : Direction) -> &mut Vec<i32> {
        match d {
            Direction::Down => &mut self.left,
            _               => &mut self.right,
        }
    }
}

/// A property value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Integer(i64),
    Bool(bool),
    Direction(Direction),
    Axis(Axis),
    Axes(Vec<Axis>),
    Interval(Interval),
    Beaming(Beaming),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_)    => ValueKind::Number,
            Value::Integer(_)   => ValueKind::Integer,
            Value::Bool(_)      => ValueKind::Bool,
            Value::Direction(_) => ValueKind::Direction,
            Value::Axis(_)      => ValueKind::Axis,
            Value::Axes(_)      => ValueKind::Axes,
            Value::Interval(_)  => ValueKind::Interval,
            Value::Beaming(_)   => ValueKind::Beaming,
        }
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(x : $t) -> Self {
                    Value::$variant(x)
                }
            }
        )*
    };
}

value_from! {
    f64       => Number,
    i64       => Integer,
    bool      => Bool,
    Direction => Direction,
    Axis      => Axis,
    Vec<Axis> => Axes,
    Interval  => Interval,
    Beaming   => Beaming,
}

impl From<i32> for Value {
    fn from(x : i32) -> Self {
        Value::Integer(x.into())
    }
}


/// Property keys. Each key accepts a single [`ValueKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Property {
    // -- placement
    /// Direction of the object relative to what it is placed against, or of a stem or beam
    Direction,
    /// Direction used for stems when nothing else decides
    NeutralDirection,
    /// Tier of the object in outside-staff placement ; absent means "inside the staff"
    OutsideStaffPriority,
    /// Minimal vertical distance to other outside-staff objects
    OutsideStaffPadding,
    /// Minimal horizontal distance to other outside-staff objects
    OutsideStaffHorizontalPadding,
    /// Whether the object belongs to another staff than its parent's
    CrossStaff,
    /// Horizontal padding of the boxes making up the skyline of a group
    SkylineHorizontalPadding,
    /// Axes along which a group aggregates its elements
    Axes,

    // -- side position
    /// Distance to the supports, in staff spaces
    Padding,
    /// Minimum distance from the reference point to the supports' edge
    MinimumSpace,
    /// Minimum distance to the staff, in staff spaces
    StaffPadding,
    /// Whether to snap the object to spaces between staff lines
    QuantizePosition,
    /// Whether to measure against supports with skylines instead of extents
    UseSkylines,
    /// Whether to treat a note column's stem and heads as one support
    AddStemSupport,
    /// Axis along which the object is placed
    SideAxis,

    // -- staff
    /// Distance between staff lines
    StaffSpace,
    /// Number of staff lines
    LineCount,
    /// Thickness of staff lines
    LineThickness,
    /// Vertical position in staff positions (note heads)
    StaffPosition,

    // -- stems
    /// Lowest and highest note head, in staff positions relative to the stem's staff
    HeadPositions,
    /// Preferred end of the stem, relative to the stem
    IdealY,
    /// Shortest acceptable end of the stem, relative to the stem
    ShortestY,
    /// Beam ranks on each side of the stem
    Beaming,
    /// Computed end of the stem, in staff positions
    StemEndPosition,
    /// Stem that is not printed
    Transparent,
    /// Grace note stem
    Grace,
    /// Thickness of the stem
    Thickness,

    // -- beams
    /// Thickness of one beam, in staff spaces
    BeamThickness,
    /// Scaling of the distance between beams
    LengthFraction,
    /// Damping of the beam slope
    Damping,
    /// Forced concaveness ; computed from the note heads when absent
    Concaveness,
    /// Minimal gap between note heads for a beam to become a knee
    AutoKneeGap,
    /// Number of beams that only reach the heads on one side (tremolo)
    GapCount,
    /// Gap between stem end and beams for tremolo beams
    Gap,
    /// Feathering: the side towards which beams spread
    GrowDirection,
    /// Inner beams stop at the outer beam instead of reaching the stem
    FrenchBeaming,
    /// Computed vertical position of the beam ends, in staff spaces
    Positions,
    /// Unquanted beam slope from the least squares fit
    LeastSquaresDy,
    /// How far beamlets stick out, relative to the inter-stem distance
    BeamletMaxLengthProportion,
    /// Default length of beamlets
    BeamletDefaultLength,
}

impl Property {
    pub fn kind(self) -> ValueKind {
        use self::Property::*;
        match self {
            Direction | NeutralDirection | GrowDirection => ValueKind::Direction,
            CrossStaff | QuantizePosition | UseSkylines | AddStemSupport | Transparent | Grace | FrenchBeaming => ValueKind::Bool,
            LineCount | GapCount => ValueKind::Integer,
            SideAxis => ValueKind::Axis,
            Axes => ValueKind::Axes,
            HeadPositions | Positions | BeamletMaxLengthProportion | BeamletDefaultLength => ValueKind::Interval,
            Beaming => ValueKind::Beaming,
            OutsideStaffPriority | OutsideStaffPadding | OutsideStaffHorizontalPadding | SkylineHorizontalPadding
            | Padding | MinimumSpace | StaffPadding | StaffSpace | LineThickness | StaffPosition
            | IdealY | ShortestY | StemEndPosition | Thickness
            | BeamThickness | LengthFraction | Damping | Concaveness | AutoKneeGap | Gap | LeastSquaresDy
                => ValueKind::Number,
        }
    }
}

/// Keys of links between grobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Object {
    /// Members of an axis group
    Elements,
    /// Stems of a beam, left to right
    Stems,
    /// Objects under a beam that it must not collide with
    CoveredGrobs,
    /// Objects a side-positioned object is placed against
    SideSupportElements,
    /// The staff symbol an object is measured against
    StaffSymbol,
    /// Note heads of a stem or note column
    NoteHeads,
    /// The stem of a note column or a note head
    Stem,
    /// The beam of a stem
    Beam,
}
