//! The grob arena: positioned graphical objects, their properties and their coordinates.
//!
//! A grob ("graphical object") has, on each axis, an optional parent and an offset relative to that parent.
//! Its extent is given in its own frame. All grobs are owned by a [`Grobs`] arena and refer to each other by [`GrobId`],
//! so parent links never own anything.
//!
//! Extents, offsets and vertical skylines are either given by the caller or computed by callbacks, which are
//! installed by the grob's [interfaces](Interface). Computed values are cached. Queries can be made "pure", for a
//! range of columns ([`Range`]), in which case results are estimates valid for any line break within that range,
//! cached per range, and nothing is written back.

mod interface;
mod property;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{Axis, BBox, Direction};
use crate::interval::Interval;
use crate::layout::LayoutSettings;
use crate::skyline::SkylinePair;

pub use self::interface::{CallbackTable, Interface};
pub use self::property::{Beaming, Object, Property, Value, ValueKind};

/// Computes the extent of a grob in its own frame
pub type ExtentCallback   = fn(&mut Grobs, GrobId, Axis, Option<Range>) -> Interval;
/// Computes the offset of a grob relative to its parent
pub type OffsetCallback   = fn(&mut Grobs, GrobId, Axis, Option<Range>) -> f64;
/// Computes the vertical skylines of a grob, in its own frame
pub type SkylinesCallback = fn(&mut Grobs, GrobId, Option<Range>) -> SkylinePair;

/// Index of a grob in its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GrobId(usize);

impl GrobId {
    /// Position of the grob in the arena, i.e. its creation order
    pub fn index(self) -> usize {
        self.0
    }
}

/// A range of columns `[start, end]`, for pure (line-break independent) queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start : i32,
    pub end   : i32,
}

impl Range {
    pub fn new(start : i32, end : i32) -> Self {
        Self { start, end }
    }
}

/// A graphical object
pub struct Grob {
    name       : String,
    interfaces : BTreeSet<Interface>,
    properties : BTreeMap<Property, Value>,
    objects    : BTreeMap<Object, Vec<GrobId>>,
    parents    : [Option<GrobId>; 2],
    offsets    : [Option<f64>; 2],
    extents    : [Option<Interval>; 2],
    skylines   : Option<SkylinePair>,
    rank_span  : Option<(i32, i32)>,
    live       : bool,

    offset_callbacks   : [Option<OffsetCallback>; 2],
    extent_callbacks   : [Option<ExtentCallback>; 2],
    skylines_callback  : Option<SkylinesCallback>,

    computing_offset   : [bool; 2],
    computing_extent   : [bool; 2],
    computing_skylines : bool,

    pure_heights  : HashMap<Range, Interval>,
    pure_offsets  : HashMap<Range, f64>,
    pure_skylines : HashMap<Range, SkylinePair>,
}

impl Grob {
    fn new(name : &str) -> Self {
        Self {
            name       : name.to_string(),
            interfaces : BTreeSet::new(),
            properties : BTreeMap::new(),
            objects    : BTreeMap::new(),
            parents    : [None; 2],
            offsets    : [None; 2],
            extents    : [None; 2],
            skylines   : None,
            rank_span  : None,
            live       : true,

            offset_callbacks   : [None; 2],
            extent_callbacks   : [None; 2],
            skylines_callback  : None,

            computing_offset   : [false; 2],
            computing_extent   : [false; 2],
            computing_skylines : false,

            pure_heights  : HashMap::new(),
            pure_offsets  : HashMap::new(),
            pure_skylines : HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Owner of all grobs, and of the layout settings they are laid out with.
pub struct Grobs {
    grobs    : Vec<Grob>,
    settings : LayoutSettings,
}

impl Grobs {
    pub fn new(settings : LayoutSettings) -> Self {
        Self { grobs : Vec::new(), settings }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.grobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grobs.is_empty()
    }

    /// Creates a new grob without parents, interfaces or properties
    pub fn add_grob(&mut self, name : &str) -> GrobId {
        self.grobs.push(Grob::new(name));
        GrobId(self.grobs.len() - 1)
    }

    pub fn grob(&self, id : GrobId) -> &Grob {
        &self.grobs[id.0]
    }

    fn grob_mut(&mut self, id : GrobId) -> &mut Grob {
        &mut self.grobs[id.0]
    }

    pub fn name(&self, id : GrobId) -> &str {
        &self.grobs[id.0].name
    }

    // ------------------------- INTERFACES --------------------------------

    /// Tags the grob with `interface`, installing that interface's callbacks where the grob has none.
    pub fn add_interface(&mut self, id : GrobId, interface : Interface) {
        let table = interface.callbacks();
        let grob = self.grob_mut(id);
        grob.interfaces.insert(interface);
        for a in Axis::ALL {
            let i = a.index();
            if grob.extent_callbacks[i].is_none() && grob.extents[i].is_none() {
                grob.extent_callbacks[i] = table.extent[i];
            }
            if grob.offset_callbacks[i].is_none() && grob.offsets[i].is_none() {
                grob.offset_callbacks[i] = table.offset[i];
            }
        }
        if grob.skylines_callback.is_none() && grob.skylines.is_none() {
            grob.skylines_callback = table.skylines;
        }
    }

    pub fn has_interface(&self, id : GrobId, interface : Interface) -> bool {
        self.grob(id).interfaces.contains(&interface)
    }

    pub fn set_offset_callback(&mut self, id : GrobId, axis : Axis, callback : Option<OffsetCallback>) {
        let grob = self.grob_mut(id);
        grob.offset_callbacks[axis.index()] = callback;
        grob.offsets[axis.index()] = None;
        grob.pure_offsets.clear();
    }

    pub fn has_offset_callback(&self, id : GrobId, axis : Axis) -> bool {
        self.grob(id).offset_callbacks[axis.index()].is_some()
    }

    // ------------------------- PROPERTIES --------------------------------

    /// Sets a property, checking that the value has the kind the property expects.
    pub fn set_property<V : Into<Value>>(&mut self, id : GrobId, property : Property, value : V) -> LayoutResult<()> {
        let value = value.into();
        let found = value.kind();
        let expected = property.kind();
        if found != expected {
            return Err(LayoutError::PropertyType { property, expected, found });
        }
        self.grob_mut(id).properties.insert(property, value);
        Ok(())
    }

    /// Property writes from inside the layout core, whose kinds are known to be right.
    pub(crate) fn put<V : Into<Value>>(&mut self, id : GrobId, property : Property, value : V) {
        let value = value.into();
        debug_assert_eq!(value.kind(), property.kind(), "{:?}", property);
        self.grob_mut(id).properties.insert(property, value);
    }

    pub fn remove_property(&mut self, id : GrobId, property : Property) {
        self.grob_mut(id).properties.remove(&property);
    }

    pub fn get(&self, id : GrobId, property : Property) -> Option<&Value> {
        self.grob(id).properties.get(&property)
    }

    /// A numeric property ; integers are converted.
    pub fn number(&self, id : GrobId, property : Property) -> Option<f64> {
        match self.get(id, property) {
            Some(Value::Number(x))  => Some(*x),
            Some(Value::Integer(n)) => Some(*n as f64),
            _ => None,
        }
    }

    /// A numeric property, or `default` if it is absent or not a finite number
    pub fn robust_number(&self, id : GrobId, property : Property, default : f64) -> f64 {
        self.number(id, property).filter(|x| x.is_finite()).unwrap_or(default)
    }

    pub fn integer(&self, id : GrobId, property : Property) -> Option<i64> {
        match self.get(id, property) {
            Some(Value::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// A boolean property ; absent means false.
    pub fn flag(&self, id : GrobId, property : Property) -> bool {
        matches!(self.get(id, property), Some(Value::Bool(true)))
    }

    pub fn direction_property(&self, id : GrobId, property : Property) -> Option<Direction> {
        match self.get(id, property) {
            Some(Value::Direction(d)) => Some(*d),
            _ => None,
        }
    }

    /// The `Direction` property, `Center` when absent
    pub fn direction(&self, id : GrobId) -> Direction {
        self.direction_property(id, Property::Direction).unwrap_or(Direction::Center)
    }

    pub fn interval(&self, id : GrobId, property : Property) -> Option<Interval> {
        match self.get(id, property) {
            Some(Value::Interval(iv)) => Some(*iv),
            _ => None,
        }
    }

    pub fn axis(&self, id : GrobId, property : Property) -> Option<Axis> {
        match self.get(id, property) {
            Some(Value::Axis(a)) => Some(*a),
            _ => None,
        }
    }

    pub fn axes(&self, id : GrobId) -> Vec<Axis> {
        match self.get(id, Property::Axes) {
            Some(Value::Axes(axes)) => axes.clone(),
            _ => Axis::ALL.to_vec(),
        }
    }

    pub fn beaming(&self, id : GrobId) -> Option<&Beaming> {
        match self.get(id, Property::Beaming) {
            Some(Value::Beaming(b)) => Some(b),
            _ => None,
        }
    }

    // ------------------------- OBJECTS --------------------------------

    /// Linked grobs ; empty when there are none.
    pub fn objects(&self, id : GrobId, key : Object) -> &[GrobId] {
        self.grob(id).objects.get(&key).map_or(&[], Vec::as_slice)
    }

    /// The first linked grob, for single-valued links
    pub fn object(&self, id : GrobId, key : Object) -> Option<GrobId> {
        self.objects(id, key).first().copied()
    }

    /// Appends a link, unless it is already there
    pub fn add_object(&mut self, id : GrobId, key : Object, other : GrobId) {
        let list = self.grob_mut(id).objects.entry(key).or_default();
        if !list.contains(&other) {
            list.push(other);
        }
    }

    pub fn set_objects(&mut self, id : GrobId, key : Object, others : Vec<GrobId>) {
        self.grob_mut(id).objects.insert(key, others);
    }

    // ------------------------- LIVENESS --------------------------------

    /// Removes the grob from the layout. Idempotent ; consumers must check [`Grobs::is_live`].
    pub fn suicide(&mut self, id : GrobId) {
        let grob = self.grob_mut(id);
        if !grob.live {
            return;
        }
        grob.live = false;
        grob.extents = [Some(Interval::EMPTY); 2];
        grob.skylines = Some(SkylinePair::new());
    }

    pub fn is_live(&self, id : GrobId) -> bool {
        self.grob(id).live
    }

    // ------------------------- COLUMNS --------------------------------

    /// Sets the columns the grob spans
    pub fn set_rank_span(&mut self, id : GrobId, start : i32, end : i32) {
        self.grob_mut(id).rank_span = Some((start.min(end), start.max(end)));
    }

    /// The columns the grob spans ; `None` for grobs spanning the whole score.
    pub fn rank_span(&self, id : GrobId) -> Option<(i32, i32)> {
        self.grob(id).rank_span
    }

    /// Whether the grob is visible for some line break in `range`
    pub fn in_range(&self, id : GrobId, range : Range) -> bool {
        match self.rank_span(id) {
            None => true,
            Some((start, end)) => start <= range.end && end >= range.start,
        }
    }

    // ------------------------- PARENTS --------------------------------

    pub fn parent(&self, id : GrobId, axis : Axis) -> Option<GrobId> {
        self.grob(id).parents[axis.index()]
    }

    pub fn set_parent(&mut self, id : GrobId, parent : GrobId, axis : Axis) {
        debug_assert!(id != parent);
        self.grob_mut(id).parents[axis.index()] = Some(parent);
    }

    /// Ancestors of `id` along `axis`, starting with `id` itself
    pub fn ancestors(&self, id : GrobId, axis : Axis) -> Vec<GrobId> {
        let mut out = vec![id];
        let mut cur = id;
        while let Some(p) = self.parent(cur, axis) {
            if out.contains(&p) {
                error!("parent cycle through grob {}", self.name(p));
                break;
            }
            out.push(p);
            cur = p;
        }
        out
    }

    /// The closest common ancestor of `a` and `b` along `axis`, counting the grobs themselves.
    pub fn common_refpoint(&self, a : GrobId, b : GrobId, axis : Axis) -> Option<GrobId> {
        let ancestors = self.ancestors(a, axis);
        self.ancestors(b, axis).into_iter().find(|p| ancestors.contains(p))
    }

    /// The closest common ancestor of `start` and all of `elts`
    pub fn common_refpoint_of_array(&self, elts : &[GrobId], start : GrobId, axis : Axis) -> Option<GrobId> {
        let mut common = Some(start);
        for &e in elts {
            common = common.and_then(|c| self.common_refpoint(c, e, axis));
        }
        common
    }

    // ------------------------- OFFSETS --------------------------------

    /// Fixes the offset of the grob relative to its parent
    pub fn set_offset(&mut self, id : GrobId, axis : Axis, offset : f64) {
        let grob = self.grob_mut(id);
        grob.offsets[axis.index()] = Some(offset);
        grob.offset_callbacks[axis.index()] = None;
        grob.pure_offsets.clear();
    }

    /// Moves the grob by `delta` relative to its parent
    pub fn translate_axis(&mut self, id : GrobId, delta : f64, axis : Axis) {
        let current = self.offset(id, axis);
        self.grob_mut(id).offsets[axis.index()] = Some(current + delta);
    }

    /// Offset of the grob relative to its parent, computing it if needed
    pub fn offset(&mut self, id : GrobId, axis : Axis) -> f64 {
        let i = axis.index();
        if let Some(offset) = self.grob(id).offsets[i] {
            return offset;
        }

        let offset = match self.grob(id).offset_callbacks[i] {
            Some(callback) => {
                if self.grob(id).computing_offset[i] {
                    error!("cyclic dependency when computing the offset of grob {}", self.name(id));
                    return 0.;
                }
                self.grob_mut(id).computing_offset[i] = true;
                let offset = callback(self, id, axis, None);
                self.grob_mut(id).computing_offset[i] = false;
                offset
            },
            None => 0.,
        };

        // the callback may have moved the grob already
        let grob = self.grob_mut(id);
        *grob.offsets[i].get_or_insert(offset)
    }

    /// Offset of the grob relative to its parent, estimated for any line break in `range` if given.
    pub fn maybe_pure_offset(&mut self, id : GrobId, axis : Axis, range : Option<Range>) -> f64 {
        let range = match range {
            Some(range) if axis == Axis::Y => range,
            _ => return self.offset(id, axis),
        };

        let callback = match self.grob(id).offset_callbacks[axis.index()] {
            Some(callback) => callback,
            None => return self.grob(id).offsets[axis.index()].unwrap_or(0.),
        };
        if let Some(&offset) = self.grob(id).pure_offsets.get(&range) {
            return offset;
        }
        if self.grob(id).computing_offset[axis.index()] {
            error!("cyclic dependency when estimating the offset of grob {}", self.name(id));
            return 0.;
        }

        self.grob_mut(id).computing_offset[axis.index()] = true;
        let offset = callback(self, id, axis, Some(range));
        let grob = self.grob_mut(id);
        grob.computing_offset[axis.index()] = false;
        grob.pure_offsets.insert(range, offset);
        offset
    }

    /// Position of `id` relative to `refp`, which should be one of its ancestors.
    pub fn relative_coordinate(&mut self, id : GrobId, refp : GrobId, axis : Axis) -> f64 {
        self.maybe_pure_coordinate(id, refp, axis, None)
    }

    /// Same as [`Grobs::relative_coordinate`], estimated for any line break in `range` if given.
    pub fn maybe_pure_coordinate(&mut self, id : GrobId, refp : GrobId, axis : Axis, range : Option<Range>) -> f64 {
        let mut sum = 0.;
        let mut cur = id;
        let mut steps = 0;
        while cur != refp {
            sum += self.maybe_pure_offset(cur, axis, range);
            steps += 1;
            match self.parent(cur, axis) {
                Some(p) if steps <= self.grobs.len() => cur = p,
                _ => {
                    // refp is not an ancestor: go through the root
                    let root = cur;
                    if !self.ancestors(refp, axis).contains(&root) {
                        error!("grobs {} and {} have no common reference point", self.name(id), self.name(refp));
                    }
                    let refp_coordinate = self.maybe_pure_coordinate(refp, root, axis, range);
                    return sum - refp_coordinate;
                },
            }
        }
        sum
    }

    // ------------------------- EXTENTS --------------------------------

    /// Fixes the extent of the grob in its own frame
    pub fn set_extent(&mut self, id : GrobId, axis : Axis, extent : Interval) {
        let grob = self.grob_mut(id);
        grob.extents[axis.index()] = Some(extent);
        grob.extent_callbacks[axis.index()] = None;
        if axis == Axis::Y {
            grob.pure_heights.clear();
        }
    }

    /// Extent of the grob in its own frame, computing it if needed
    pub fn own_extent(&mut self, id : GrobId, axis : Axis) -> Interval {
        let i = axis.index();
        if let Some(extent) = self.grob(id).extents[i] {
            return extent;
        }

        let extent = match self.grob(id).extent_callbacks[i] {
            Some(callback) => {
                if self.grob(id).computing_extent[i] {
                    error!("cyclic dependency when computing the extent of grob {}", self.name(id));
                    return Interval::EMPTY;
                }
                self.grob_mut(id).computing_extent[i] = true;
                let extent = callback(self, id, axis, None);
                self.grob_mut(id).computing_extent[i] = false;
                extent
            },
            None => Interval::EMPTY,
        };

        self.grob_mut(id).extents[i] = Some(extent);
        extent
    }

    /// Extent of the grob in its own frame, estimated for any line break in `range` if given.
    pub fn maybe_pure_own_extent(&mut self, id : GrobId, axis : Axis, range : Option<Range>) -> Interval {
        let range = match range {
            Some(range) if axis == Axis::Y => range,
            _ => return self.own_extent(id, axis),
        };

        let callback = match self.grob(id).extent_callbacks[axis.index()] {
            Some(callback) => callback,
            None => return self.grob(id).extents[axis.index()].unwrap_or(Interval::EMPTY),
        };
        if let Some(&extent) = self.grob(id).pure_heights.get(&range) {
            return extent;
        }
        if self.grob(id).computing_extent[axis.index()] {
            error!("cyclic dependency when estimating the extent of grob {}", self.name(id));
            return Interval::EMPTY;
        }

        self.grob_mut(id).computing_extent[axis.index()] = true;
        let extent = callback(self, id, axis, Some(range));
        let grob = self.grob_mut(id);
        grob.computing_extent[axis.index()] = false;
        grob.pure_heights.insert(range, extent);
        extent
    }

    /// Extent of the grob in the frame of `refp`
    pub fn extent(&mut self, id : GrobId, refp : GrobId, axis : Axis) -> Interval {
        self.maybe_pure_extent(id, refp, axis, None)
    }

    /// Extent of the grob in the frame of `refp`, estimated for any line break in `range` if given.
    pub fn maybe_pure_extent(&mut self, id : GrobId, refp : GrobId, axis : Axis, range : Option<Range>) -> Interval {
        let extent = self.maybe_pure_own_extent(id, axis, range);
        if extent.is_empty() {
            return extent;
        }
        extent + self.maybe_pure_coordinate(id, refp, axis, range)
    }

    // ------------------------- SKYLINES --------------------------------

    /// Fixes the vertical skylines of the grob, in its own frame
    pub fn set_skylines(&mut self, id : GrobId, skylines : SkylinePair) {
        let grob = self.grob_mut(id);
        grob.skylines = Some(skylines);
        grob.skylines_callback = None;
        grob.pure_skylines.clear();
    }

    /// Replaces the callback computing the vertical skylines of the grob
    pub fn set_skylines_callback(&mut self, id : GrobId, callback : Option<SkylinesCallback>) {
        let grob = self.grob_mut(id);
        grob.skylines = None;
        grob.skylines_callback = callback;
        grob.pure_skylines.clear();
    }

    /// Whether the grob has skylines of its own, instead of ones derived from its extents
    pub fn has_skylines(&self, id : GrobId) -> bool {
        let grob = self.grob(id);
        grob.skylines.is_some() || grob.skylines_callback.is_some()
    }

    /// Vertical skylines of the grob in its own frame (horizon along X), estimated for `range` if given.
    /// Grobs without skylines of their own get the skylines of their extent box.
    pub fn vertical_skylines(&mut self, id : GrobId, range : Option<Range>) -> SkylinePair {
        if let Some(skylines) = &self.grob(id).skylines {
            return skylines.clone();
        }

        let callback = match self.grob(id).skylines_callback {
            Some(callback) => callback,
            None => return self.skylines_from_extents(id, range),
        };

        if let Some(range) = range {
            if let Some(skylines) = self.grob(id).pure_skylines.get(&range) {
                return skylines.clone();
            }
        }
        if self.grob(id).computing_skylines {
            error!("cyclic dependency when computing the skylines of grob {}", self.name(id));
            return SkylinePair::new();
        }

        self.grob_mut(id).computing_skylines = true;
        let skylines = callback(self, id, range);
        let grob = self.grob_mut(id);
        grob.computing_skylines = false;
        match range {
            Some(range) => { grob.pure_skylines.insert(range, skylines.clone()); },
            None        => { grob.skylines = Some(skylines.clone()); },
        }
        skylines
    }

    fn skylines_from_extents(&mut self, id : GrobId, range : Option<Range>) -> SkylinePair {
        let b = BBox::new(
            self.own_extent(id, Axis::X),
            self.maybe_pure_own_extent(id, Axis::Y, range),
        );
        SkylinePair::from_box(&b, 0., Axis::X)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Grobs {
        Grobs::new(LayoutSettings::default())
    }

    #[test]
    fn typed_properties() {
        let mut grobs = arena();
        let g = grobs.add_grob("TextScript");

        assert!(grobs.set_property(g, Property::Padding, 0.5).is_ok());
        assert_eq!(grobs.number(g, Property::Padding), Some(0.5));
        assert_eq!(grobs.robust_number(g, Property::StaffPadding, 0.25), 0.25);

        let err = grobs.set_property(g, Property::Padding, true);
        assert_eq!(err, Err(LayoutError::PropertyType {
            property : Property::Padding,
            expected : ValueKind::Number,
            found    : ValueKind::Bool,
        }));
        assert_eq!(grobs.number(g, Property::Padding), Some(0.5));

        assert!(!grobs.flag(g, Property::CrossStaff));
        assert_eq!(grobs.direction(g), Direction::Center);
    }

    #[test]
    fn coordinates() {
        let mut grobs = arena();
        let root  = grobs.add_grob("System");
        let staff = grobs.add_grob("VerticalAxisGroup");
        let head  = grobs.add_grob("NoteHead");
        let other = grobs.add_grob("NoteHead");

        grobs.set_parent(staff, root, Axis::Y);
        grobs.set_parent(head, staff, Axis::Y);
        grobs.set_parent(other, root, Axis::Y);
        grobs.set_offset(staff, Axis::Y, -10.);
        grobs.set_offset(head, Axis::Y, 1.5);
        grobs.set_offset(other, Axis::Y, 3.);
        grobs.set_extent(head, Axis::Y, Interval::new(-0.5, 0.5));

        assert_eq!(grobs.relative_coordinate(head, root, Axis::Y), -8.5);
        assert_eq!(grobs.relative_coordinate(head, staff, Axis::Y), 1.5);
        // not an ancestor: through the common root
        assert_eq!(grobs.relative_coordinate(head, other, Axis::Y), -11.5);

        assert_eq!(grobs.common_refpoint(head, other, Axis::Y), Some(root));
        assert_eq!(grobs.common_refpoint(head, staff, Axis::Y), Some(staff));
        assert_eq!(grobs.common_refpoint(head, other, Axis::X), None);

        assert_eq!(grobs.extent(head, root, Axis::Y), Interval::new(-9., -8.));

        grobs.translate_axis(head, 1., Axis::Y);
        assert_eq!(grobs.relative_coordinate(head, root, Axis::Y), -7.5);
    }

    #[test]
    fn offset_cycles_are_broken() {
        fn self_referencing(grobs : &mut Grobs, id : GrobId, axis : Axis, _ : Option<Range>) -> f64 {
            grobs.offset(id, axis) + 1.
        }

        let mut grobs = arena();
        let g = grobs.add_grob("Loop");
        grobs.set_offset_callback(g, Axis::Y, Some(self_referencing));
        assert_eq!(grobs.offset(g, Axis::Y), 1.);
    }

    #[test]
    fn skylines_default_to_extent_box() {
        let mut grobs = arena();
        let g = grobs.add_grob("Fingering");
        grobs.set_extent(g, Axis::X, Interval::new(0., 1.));
        grobs.set_extent(g, Axis::Y, Interval::new(-1., 2.));

        let skylines = grobs.vertical_skylines(g, None);
        assert_eq!(skylines[Direction::Up].height(0.5), 2.);
        assert_eq!(skylines[Direction::Down].height(0.5), -1.);
        assert!(!grobs.has_skylines(g));
    }

    #[test]
    fn suicide_is_idempotent() {
        let mut grobs = arena();
        let g = grobs.add_grob("Beam");
        grobs.suicide(g);
        grobs.suicide(g);
        assert!(!grobs.is_live(g));
        assert!(grobs.own_extent(g, Axis::Y).is_empty());
    }

    /// Padding, plus the last column of the range
    fn padding_offset(grobs : &mut Grobs, id : GrobId, _axis : Axis, range : Option<Range>) -> f64 {
        grobs.robust_number(id, Property::Padding, 0.) + range.map_or(0., |r| r.end as f64)
    }

    #[test]
    fn pure_results_are_cached_per_range() {
        use crate::layout::axis_group::{add_element, calc_skylines};

        let (early, late) = (Range::new(0, 5), Range::new(0, 7));
        let mut grobs = arena();

        let g = grobs.add_grob("Script");
        grobs.set_property(g, Property::Padding, 1.).unwrap();
        grobs.set_offset_callback(g, Axis::Y, Some(padding_offset));
        assert_eq!(grobs.maybe_pure_offset(g, Axis::Y, Some(early)), 6.);
        grobs.set_property(g, Property::Padding, 2.).unwrap();
        assert_eq!(grobs.maybe_pure_offset(g, Axis::Y, Some(early)), 6.);
        assert_eq!(grobs.maybe_pure_offset(g, Axis::Y, Some(late)), 9.);
        grobs.set_offset(g, Axis::Y, 4.);
        assert_eq!(grobs.maybe_pure_offset(g, Axis::Y, Some(early)), 4.);
        grobs.set_offset_callback(g, Axis::Y, Some(padding_offset));
        assert_eq!(grobs.maybe_pure_offset(g, Axis::Y, Some(early)), 7.);

        let column = grobs.add_grob("NoteColumn");
        grobs.add_interface(column, Interface::AxisGroup);
        let head = grobs.add_grob("NoteHead");
        grobs.set_extent(head, Axis::X, Interval::new(0., 1.));
        grobs.set_extent(head, Axis::Y, Interval::new(0., 1.));
        add_element(&mut grobs, column, head);
        assert_eq!(grobs.maybe_pure_own_extent(column, Axis::Y, Some(early)), Interval::new(0., 1.));
        grobs.set_extent(head, Axis::Y, Interval::new(0., 3.));
        assert_eq!(grobs.maybe_pure_own_extent(column, Axis::Y, Some(early)), Interval::new(0., 1.));
        assert_eq!(grobs.maybe_pure_own_extent(column, Axis::Y, Some(late)), Interval::new(0., 3.));
        grobs.set_extent(column, Axis::Y, Interval::new(-1., 1.));
        assert_eq!(grobs.maybe_pure_own_extent(column, Axis::Y, Some(early)), Interval::new(-1., 1.));

        let staff = grobs.add_grob("VerticalAxisGroup");
        grobs.add_interface(staff, Interface::VerticalAxisGroup);
        let bar = grobs.add_grob("BarLine");
        grobs.set_extent(bar, Axis::X, Interval::new(0., 1.));
        grobs.set_extent(bar, Axis::Y, Interval::new(0., 1.));
        add_element(&mut grobs, staff, bar);
        assert_eq!(grobs.vertical_skylines(staff, Some(early))[Direction::Up].height(0.5), 1.);
        grobs.set_extent(bar, Axis::Y, Interval::new(0., 3.));
        assert_eq!(grobs.vertical_skylines(staff, Some(early))[Direction::Up].height(0.5), 1.);
        assert_eq!(grobs.vertical_skylines(staff, Some(late))[Direction::Up].height(0.5), 3.);
        grobs.set_skylines_callback(staff, Some(calc_skylines));
        assert_eq!(grobs.vertical_skylines(staff, Some(early))[Direction::Up].height(0.5), 3.);
    }
}
