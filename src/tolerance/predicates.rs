//! Geometric predicates with explicit tolerance.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Reports which side of the line supporting `segment` the point `p` is on.
///
/// The tolerance is a distance: `p` is reported as `Collinear` when it lies
/// within `eps` of the supporting line, whatever the segment's length. Left of `start -> end` is `CounterClockwise`.
#[inline]
pub fn line_side<F: Float>(segment: Segment2<F>, p: Point2<F>, eps: F) -> Orientation {
    let dir = segment.direction();
    let len = dir.magnitude();
    if len <= F::zero() {
        return Orientation::Collinear;
    }
    classify(dir.cross(p - segment.start) / len, eps)
}

#[inline]
fn classify<F: Float>(value: F, eps: F) -> Orientation {
    if value > eps {
        Orientation::CounterClockwise
    } else if value < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Checks if a point lies on a line segment within tolerance.
///
/// Returns `true` if the point `p` is within distance `eps` of the segment.
#[inline]
pub fn point_on_segment<F: Float>(p: Point2<F>, segment: Segment2<F>, eps: F) -> bool {
    segment.distance_squared_to_point(p) <= eps * eps
}

/// A proper crossing between two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<F> {
    /// The crossing point.
    pub point: Point2<F>,
    /// Parameter along the first segment (strictly inside `(0, 1)`).
    pub t1: F,
    /// Parameter along the second segment (strictly inside `(0, 1)`).
    pub t2: F,
}

/// Finds the proper crossing of two segments, if any.
///
/// A crossing is proper when the segments are not parallel and the
/// intersection lies more than `eps` (in distance) from every endpoint of
/// both segments. Touching at an endpoint, T-junctions and collinear
/// overlaps are not crossings.
pub fn segment_crossing<F: Float>(s1: Segment2<F>, s2: Segment2<F>, eps: F) -> Option<Crossing<F>> {
    let d1 = s1.direction();
    let d2 = s2.direction();
    let cross = d1.cross(d2);

    let len1 = d1.magnitude();
    let len2 = d2.magnitude();
    if cross.abs() <= F::epsilon() * len1 * len2 {
        return None;
    }

    // s1.start + t1 * d1 = s2.start + t2 * d2, by Cramer's rule
    let d = s2.start - s1.start;
    let t1 = d.cross(d2) / cross;
    let t2 = d.cross(d1) / cross;

    let interior = |t: F, len: F| t * len > eps && (F::one() - t) * len > eps;
    if interior(t1, len1) && interior(t2, len2) {
        Some(Crossing {
            point: s1.point_at(t1),
            t1,
            t2,
        })
    } else {
        None
    }
}

/// Checks if two segments properly cross each other (not just touch).
#[inline]
pub fn segments_cross<F: Float>(s1: Segment2<F>, s2: Segment2<F>, eps: F) -> bool {
    segment_crossing(s1, s2, eps).is_some()
}
