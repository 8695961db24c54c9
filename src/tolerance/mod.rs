//! Epsilon-aware geometric predicates.
//!
//! All functions in this module take explicit tolerance parameters.
//! No hidden epsilons are used.

mod predicates;

pub use predicates::{
    line_side, point_on_segment, segment_crossing, segments_cross, Crossing,
    Orientation,
};
