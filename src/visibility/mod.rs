//! Visibility polygons by angular sweep.
//!
//! The visibility polygon of a viewpoint is the region it can see past a set
//! of opaque segment obstacles. It is computed by sweeping a ray
//! counter-clockwise around the viewpoint, starting at `-π`, while keeping
//! the obstacles the ray currently crosses ordered by nearness. Whenever the
//! nearest obstacle changes, the boundary steps from the old obstacle to the
//! new one along the ray. Directions with no obstacle are clipped to a
//! bounding circle.
//!
//! # Example
//!
//! ```
//! use sightline::primitives::{Point2, Segment2};
//! use sightline::visibility::compute_visibility;
//!
//! // A wall directly east of the viewpoint
//! let wall = [Segment2::from_coords(1.0, -1.0, 1.0, 1.0)];
//! let ring = compute_visibility(Point2::new(0.0, 0.0), &wall, Some(10.0)).unwrap();
//!
//! assert_eq!(ring.first(), ring.last());
//! assert!(ring.contains(&Point2::new(1.0, -1.0)));
//! assert!(ring.contains(&Point2::new(1.0, 1.0)));
//! ```

mod assemble;
mod endpoint;
mod open_set;
mod options;
mod order;
mod scene;
mod sweep;

pub use options::VisibilityOptions;
pub use scene::{Obstacle, Scene};

use crate::error::Result;
use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Computes the visibility polygon of `viewpoint` among `segments`.
///
/// Rays that hit nothing are clipped at `bounding_radius`; `None` derives a
/// radius from the scene (see [`VisibilityOptions::bounding_radius`]).
///
/// The result is an explicitly closed ring: counter-clockwise, starting on
/// the ray at `-π`, with the first point repeated last. Consecutive points
/// are never closer than the default tolerance.
///
/// # Errors
///
/// Fails without a partial result when a segment is invalid, the viewpoint
/// is invalid or lies on a segment, or the radius (given or derived) is not
/// positive and finite. See [`crate::VisibilityError`].
pub fn compute_visibility<F: Float>(
    viewpoint: Point2<F>,
    segments: &[Segment2<F>],
    bounding_radius: Option<F>,
) -> Result<Vec<Point2<F>>> {
    let options = VisibilityOptions::default().bounding_radius(bounding_radius);
    compute_visibility_with(viewpoint, segments, &options)
}

/// Computes the visibility polygon with explicit options.
///
/// Equivalent to building a [`Scene`] and querying it once.
pub fn compute_visibility_with<F: Float>(
    viewpoint: Point2<F>,
    segments: &[Segment2<F>],
    options: &VisibilityOptions<F>,
) -> Result<Vec<Point2<F>>> {
    Scene::new(segments, *options)?.visibility_from(viewpoint)
}
