//! Error types for visibility computations.

use std::fmt;
use thiserror::Error;

/// Why a segment was rejected during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentDefect {
    /// The two endpoints coincide (within tolerance).
    ZeroLength,
    /// An endpoint coordinate is NaN or infinite.
    NonFinite,
}

impl fmt::Display for SegmentDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentDefect::ZeroLength => f.write_str("zero length"),
            SegmentDefect::NonFinite => f.write_str("non-finite coordinates"),
        }
    }
}

/// Errors that can occur while computing a visibility polygon.
///
/// Segment indices always refer to the caller's input sequence, so the
/// offending obstacle can be sanitized and the call retried. No partial
/// result is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VisibilityError {
    /// A segment is zero-length or has non-finite coordinates.
    #[error("segment {index} is invalid: {defect}")]
    InvalidSegment {
        /// Index of the segment in the input.
        index: usize,
        /// What is wrong with it.
        defect: SegmentDefect,
    },

    /// The viewpoint lies on (or within tolerance of) a segment.
    #[error("viewpoint lies on segment {index}")]
    ViewpointOnSegment {
        /// Index of the segment in the input.
        index: usize,
    },

    /// Two segments could not be ordered by nearness: the fallback
    /// comparison along the current sweep ray failed, or the segments cross
    /// and splitting is disabled.
    #[error("cannot order segments {first} and {second} by nearness")]
    DegenerateGeometry {
        /// Index of the first segment in the input.
        first: usize,
        /// Index of the second segment in the input.
        second: usize,
    },

    /// The viewpoint has a NaN or infinite coordinate.
    #[error("viewpoint has non-finite coordinates")]
    InvalidViewpoint,

    /// The bounding radius, given or derived from the scene, is not a
    /// finite positive number.
    #[error("bounding radius must be finite and positive")]
    InvalidBoundingRadius,

    /// The geometric tolerance is NaN, infinite or negative.
    #[error("epsilon must be finite and non-negative")]
    InvalidEpsilon,
}

/// Result alias for visibility operations.
pub type Result<T> = std::result::Result<T, VisibilityError>;
