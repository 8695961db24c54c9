//! Orderings used by the sweep.
//!
//! Two orders drive the algorithm: the total angular order over endpoints,
//! and the nearness order over obstacles crossing the current sweep ray.
//! Both are plain functions of their arguments; nothing is cached between
//! calls.

use super::endpoint::Endpoint;
use super::scene::Obstacle;
use crate::error::{Result, VisibilityError};
use crate::primitives::{Point2, Ray2, Segment2};
use crate::tolerance::{line_side, Orientation};
use log::debug;
use num_traits::Float;
use std::cmp::Ordering;

/// Total order over endpoints for the sweep.
///
/// Primary key is the angle. At equal angles ends come before starts, so an
/// obstacle ending exactly where another begins leaves the open set before
/// the newcomer is compared against it. Remaining ties go nearer first, then
/// by coordinates and arena index so the order never depends on sort
/// stability.
pub(crate) fn compare_endpoints<F: Float>(a: &Endpoint<F>, b: &Endpoint<F>) -> Ordering {
    a.angle
        .partial_cmp(&b.angle)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.is_start.cmp(&b.is_start))
        .then_with(|| {
            a.distance_squared
                .partial_cmp(&b.distance_squared)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.point.x.partial_cmp(&b.point.x).unwrap_or(Ordering::Equal))
        .then_with(|| a.point.y.partial_cmp(&b.point.y).unwrap_or(Ordering::Equal))
        .then_with(|| a.segment_index.cmp(&b.segment_index))
}

/// Decides whether `other` lies on the viewpoint's side of `reference`'s
/// supporting line.
///
/// `Some(true)` means `other` is nearer to the viewpoint than `reference`
/// along any ray crossing both, `Some(false)` farther. `None` when the test
/// cannot decide: `other` straddles the line, is collinear with it, or the
/// viewpoint itself is on the line.
fn nearer_side<F: Float>(
    reference: Segment2<F>,
    other: Segment2<F>,
    viewpoint: Point2<F>,
    eps: F,
) -> Option<bool> {
    let eye = line_side(reference, viewpoint, eps);
    if eye == Orientation::Collinear {
        return None;
    }

    let side = match (
        line_side(reference, other.start, eps),
        line_side(reference, other.end, eps),
    ) {
        (Orientation::Collinear, Orientation::Collinear) => return None,
        (Orientation::Collinear, s) | (s, Orientation::Collinear) => s,
        (s, t) if s == t => s,
        _ => return None,
    };

    Some(side == eye)
}

/// Orders two open obstacles by nearness to the viewpoint along the ray at
/// `angle`. `Less` means `a` is nearer.
///
/// The cross-product side tests decide almost every pair without touching
/// the angle. When both are inconclusive the ray parameters of the two
/// supporting lines at `angle` are compared instead, and exact ties there
/// fall back to arena index. Only a ray that misses a supporting line
/// altogether is reported as [`VisibilityError::DegenerateGeometry`].
pub(crate) fn compare_nearness<F: Float>(
    obstacles: &[Obstacle<F>],
    a: usize,
    b: usize,
    viewpoint: Point2<F>,
    angle: F,
    eps: F,
) -> Result<Ordering> {
    if a == b {
        return Ok(Ordering::Equal);
    }

    let sa = obstacles[a].segment;
    let sb = obstacles[b].segment;

    if let Some(b_nearer) = nearer_side(sa, sb, viewpoint, eps) {
        return Ok(if b_nearer {
            Ordering::Greater
        } else {
            Ordering::Less
        });
    }
    if let Some(a_nearer) = nearer_side(sb, sa, viewpoint, eps) {
        return Ok(if a_nearer {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }

    let ray = Ray2::from_angle(viewpoint, angle);
    let degenerate = || VisibilityError::DegenerateGeometry {
        first: obstacles[a].source,
        second: obstacles[b].source,
    };
    let ta = ray.intersect_line(&sa).map(|(_, t, _)| t).ok_or_else(degenerate)?;
    let tb = ray.intersect_line(&sb).map(|(_, t, _)| t).ok_or_else(degenerate)?;
    if !ta.is_finite() || !tb.is_finite() {
        return Err(degenerate());
    }

    debug!(
        "nearness fallback for obstacles {} and {} at angle {:?}",
        a,
        b,
        angle.to_f64()
    );

    if (ta - tb).abs() <= eps {
        Ok(a.cmp(&b))
    } else if ta < tb {
        Ok(Ordering::Less)
    } else {
        Ok(Ordering::Greater)
    }
}
