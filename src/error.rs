//! Error types of the layout core.
//!   - [`LayoutError`] : errors that a caller can act upon (ill-typed property writes, improbable offsets in strict mode).
//!
//! Programming errors (NaN boxes, missing common reference points, merging empty skylines) and
//! infeasible configurations are not errors in this sense: they are reported on the `log` channel
//! and the computation continues with a safe default.

use std::fmt;
use crate::grob::{Property, ValueKind};

/// Result type for the [`LayoutError`]
pub type LayoutResult<T> = ::std::result::Result<T, LayoutError>;

/// Errors surfaced to the caller of the layout core.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A value of the wrong kind was written to a property.
    PropertyType {
        /// the property written to
        property : Property,
        /// the kind of value the property holds
        expected : ValueKind,
        /// the kind of value that was provided
        found    : ValueKind,
    },
    /// An object was placed implausibly far from its reference point, and strict infinity checking is on.
    ImprobableOffset {
        /// name of the offending object
        grob   : String,
        /// the offset that was computed
        offset : f64,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::LayoutError::*;
        match *self {
            PropertyType { property, expected, found } =>
                write!(f, "property {:?} expects a value of kind {:?}, found {:?}", property, expected, found),
            ImprobableOffset { ref grob, offset } =>
                write!(f, "improbable offset for grob {}: {}", grob, offset),
        }
    }
}

impl std::error::Error for LayoutError {}
