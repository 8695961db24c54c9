//! Endpoint extraction and angular classification.
//!
//! Every obstacle contributes two endpoints tagged with their angle around
//! the viewpoint. The endpoint reached first when sweeping counter-clockwise
//! is the start; for an obstacle straddling the `-π`/`π` seam the start has
//! the larger angle, and the obstacle is reported as wrapping so the sweep
//! can seed it as open at `-π`.

use super::order::compare_endpoints;
use super::scene::Obstacle;
use crate::primitives::Point2;
use crate::tolerance::{line_side, Orientation};
use num_traits::Float;

/// One end of an obstacle, as seen from the viewpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Endpoint<F> {
    /// Index into the obstacle arena.
    pub segment_index: usize,
    /// Angle from the viewpoint in `[-π, π)`.
    pub angle: F,
    /// Whether this is the end the counter-clockwise sweep meets first.
    pub is_start: bool,
    /// The endpoint's exact coordinates.
    pub point: Point2<F>,
    /// Squared distance from the viewpoint.
    pub distance_squared: F,
}

/// Angularly sorted endpoints for one viewpoint.
#[derive(Debug, Clone)]
pub(crate) struct Extraction<F> {
    /// Endpoints in sweep order.
    pub endpoints: Vec<Endpoint<F>>,
    /// Obstacles whose angular span contains the sweep start angle.
    pub wrapping: Vec<usize>,
    /// Obstacles skipped because they subtend no angle (edge-on).
    pub edge_on: usize,
}

/// Classifies one obstacle's endpoints.
///
/// Returns `(start, end, wraps)`, or `None` when the obstacle is edge-on:
/// its supporting line passes within `eps` of the viewpoint, or its two
/// endpoints round to the same angle.
pub(crate) fn classify<F: Float>(
    segment_index: usize,
    obstacle: &Obstacle<F>,
    viewpoint: Point2<F>,
    eps: F,
) -> Option<(Endpoint<F>, Endpoint<F>, bool)> {
    let seg = obstacle.segment;
    if line_side(seg, viewpoint, eps) == Orientation::Collinear {
        return None;
    }

    // Positive cross: `end` is counter-clockwise from `start`, less than a half turn away
    let ccw = (seg.start - viewpoint).cross(seg.end - viewpoint) > F::zero();
    let (first, second) = if ccw {
        (seg.start, seg.end)
    } else {
        (seg.end, seg.start)
    };

    let start_angle = first.angle_from(viewpoint);
    let end_angle = second.angle_from(viewpoint);
    if start_angle == end_angle {
        return None;
    }

    // A span under a half turn can only look inverted by crossing the seam
    let pi = F::from(std::f64::consts::PI).unwrap();
    let wraps = start_angle > end_angle;
    if wraps && start_angle - end_angle <= pi {
        return None;
    }

    let endpoint = |point: Point2<F>, angle: F, is_start: bool| Endpoint {
        segment_index,
        angle,
        is_start,
        point,
        distance_squared: point.distance_squared(viewpoint),
    };

    Some((
        endpoint(first, start_angle, true),
        endpoint(second, end_angle, false),
        wraps,
    ))
}

/// Extracts and sorts the endpoints of every obstacle around `viewpoint`.
pub(crate) fn extract_endpoints<F: Float>(
    obstacles: &[Obstacle<F>],
    viewpoint: Point2<F>,
    eps: F,
) -> Extraction<F> {
    let mut endpoints = Vec::with_capacity(obstacles.len() * 2);
    let mut wrapping = Vec::new();
    let mut edge_on = 0;

    for (i, obstacle) in obstacles.iter().enumerate() {
        match classify(i, obstacle, viewpoint, eps) {
            Some((start, end, wraps)) => {
                endpoints.push(start);
                endpoints.push(end);
                if wraps {
                    wrapping.push(i);
                }
            }
            None => edge_on += 1,
        }
    }

    endpoints.sort_by(compare_endpoints);

    Extraction {
        endpoints,
        wrapping,
        edge_on,
    }
}
