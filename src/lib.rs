//! sightline - Visibility polygons in the plane
//!
//! Given a viewpoint and a set of opaque segment obstacles, computes the
//! boundary of the region the viewpoint can see. Rays that escape every
//! obstacle are clipped to a bounding circle, so the result is always a
//! finite closed polygon.
//!
//! Every type is generic over `F: num_traits::Float`; `f32` and `f64` both
//! work.
//!
//! ```
//! use sightline::{compute_visibility, Point2, Polygon, Segment2};
//!
//! let walls = [
//!     Segment2::from_coords(2.0, -1.0, 2.0, 1.0),
//!     Segment2::from_coords(-1.0, 3.0, 1.0, 3.0),
//! ];
//! let ring = compute_visibility(Point2::new(0.0, 0.0), &walls, Some(10.0)).unwrap();
//!
//! let region = Polygon::from_closed_ring(ring);
//! assert!(region.contains(Point2::new(1.0, 0.0)));
//! assert!(!region.contains(Point2::new(3.0, 0.0)));
//! ```

pub mod error;
pub mod polygon;
pub mod primitives;
pub mod tolerance;
pub mod visibility;

pub use error::{Result, SegmentDefect, VisibilityError};
pub use polygon::Polygon;
pub use primitives::{Point2, Ray2, Segment2, Vec2};
pub use visibility::{compute_visibility, compute_visibility_with, Scene, VisibilityOptions};
