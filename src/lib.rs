/*! # Collision avoidance and beam layout for music engraving.

This crate is the vertical layout core of a music engraver. It does not parse music nor draw it: the caller creates
graphical objects (*grobs*), gives them extents, parents and properties, and asks the crate where things should go.

The building blocks are:

 - [`Interval`](crate::interval::Interval)s and [`Skyline`](crate::skyline::Skyline)s, the piecewise linear outlines
   used to measure how close two objects may get.
 - The [`Grobs`](crate::grob::Grobs) arena, holding every object, its properties, links to other objects and the
   callbacks computing its extents, offsets and skylines.
 - [`layout`](crate::layout), with the staff-level algorithms: extents of axis groups, stacking of outside-staff
   objects and placement of objects beside their supports.
 - [`beam`](crate::beam), the beam pipeline from directions to quantized positions and stem lengths.

## Basic usage

A beam over two stems whose notes sit low on the staff:

```
use engrave::geometry::{Axis, Direction};
use engrave::grob::{Beaming, Grobs, Interface, Object, Property};
use engrave::interval::Interval;
use engrave::layout::{quant_beam, LayoutSettings};

let mut grobs = Grobs::new(LayoutSettings::default());
let staff = grobs.add_grob("Staff");
let beam = grobs.add_grob("Beam");
grobs.set_parent(beam, staff, Axis::X);
grobs.set_parent(beam, staff, Axis::Y);

for (i, &x) in [0., 10.].iter().enumerate() {
    let stem = grobs.add_grob("Stem");
    grobs.add_interface(stem, Interface::Stem);
    grobs.set_parent(stem, staff, Axis::X);
    grobs.set_parent(stem, staff, Axis::Y);
    grobs.set_offset(stem, Axis::X, x);
    grobs.set_property(stem, Property::HeadPositions, Interval::new(-4., -4.))?;
    grobs.set_property(stem, Property::IdealY, 2.)?;
    let beaming = if i == 0 {
        Beaming { left : vec![], right : vec![0] }
    }
    else {
        Beaming { left : vec![0], right : vec![] }
    };
    grobs.set_property(stem, Property::Beaming, beaming)?;
    grobs.add_object(beam, Object::Stems, stem);
    grobs.add_object(stem, Object::Beam, beam);
}
grobs.add_interface(beam, Interface::Beam);
grobs.set_property(beam, Property::Damping, 0.)?;

// left and right end of the beam, in staff spaces
assert_eq!(quant_beam(&mut grobs, beam, None), Some((2., 2.)));
assert_eq!(grobs.direction(beam), Direction::Up);
# Ok::<(), engrave::error::LayoutError>(())
```

Lengths are plain `f64` layout units, except where a property says it is measured in staff spaces or in staff
positions (half staff spaces), see [`dimensions`](crate::dimensions).

Problems that do not stop the layout (an empty skyline being merged, a beam with a single stem, an object placed
miles away) are reported through the [`log`](https://docs.rs/log) crate ; install a logger to see them.
*/

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate log;

#[deny(missing_docs)]
pub mod error;
pub mod dimensions;
pub mod geometry;
pub mod interval;
pub mod skyline;
pub mod grob;
pub mod layout;
pub mod beam;

pub use crate::error::{LayoutError, LayoutResult};
pub use crate::grob::{GrobId, Grobs};
pub use crate::layout::{
    compute_extent, compute_skyline_pair, place_outside_staff, position_beside, quant_beam, LayoutSettings, SideStrategy,
};
