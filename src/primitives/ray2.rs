//! 2D ray type.

use super::{Point2, Segment2, Vec2};
use num_traits::Float;

/// A 2D ray defined by an origin point and direction.
///
/// A ray extends infinitely from its origin in the direction specified.
/// The direction is stored as-is (not necessarily normalized).
///
/// # Example
///
/// ```
/// use sightline::primitives::{Ray2, Point2, Segment2};
///
/// let ray: Ray2<f64> = Ray2::from_angle(Point2::origin(), 0.0);
/// let segment = Segment2::new(Point2::new(5.0, -1.0), Point2::new(5.0, 1.0));
///
/// let (hit, t, _) = ray.intersect_segment(&segment).unwrap();
/// assert_eq!(hit.x, 5.0);
/// assert_eq!(t, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2<F> {
    /// Origin point of the ray
    pub origin: Point2<F>,
    /// Direction vector (not necessarily normalized)
    pub direction: Vec2<F>,
}

impl<F: Float> Ray2<F> {
    /// Creates a new ray from origin and direction.
    #[inline]
    pub fn new(origin: Point2<F>, direction: Vec2<F>) -> Self {
        Self { origin, direction }
    }

    /// Creates a ray with a unit direction at `angle` radians from the +X axis.
    #[inline]
    pub fn from_angle(origin: Point2<F>, angle: F) -> Self {
        Self {
            origin,
            direction: Vec2::from_angle(angle),
        }
    }

    /// Returns the point along the ray at parameter t.
    #[inline]
    pub fn point_at(&self, t: F) -> Point2<F> {
        self.origin + self.direction * t
    }

    /// Intersects this ray with the infinite line supporting `segment`.
    ///
    /// Returns `Some((point, t_ray, t_segment))` where `t_segment` is the
    /// parameter along the segment and may fall outside `[0, 1]`; `t_ray`
    /// may be negative when the line lies behind the origin.
    ///
    /// Returns `None` when the ray is parallel to the line.
    pub fn intersect_line(&self, segment: &Segment2<F>) -> Option<(Point2<F>, F, F)> {
        let seg_dir = segment.direction();
        let cross = self.direction.cross(seg_dir);

        let scale = self.direction.magnitude() * seg_dir.magnitude();
        if cross.abs() <= F::epsilon() * scale {
            return None;
        }

        let delta = segment.start - self.origin;
        let t_ray = delta.cross(seg_dir) / cross;
        let t_seg = delta.cross(self.direction) / cross;

        Some((self.point_at(t_ray), t_ray, t_seg))
    }

    /// Intersects this ray with a line segment.
    ///
    /// Returns `Some((point, t_ray, t_segment))` if they intersect, where:
    /// - `point` is the intersection point
    /// - `t_ray` is the parameter along the ray (>= 0)
    /// - `t_segment` is the parameter along the segment (in [0, 1])
    ///
    /// Returns `None` if no intersection or ray is parallel to segment.
    pub fn intersect_segment(&self, segment: &Segment2<F>) -> Option<(Point2<F>, F, F)> {
        let (point, t_ray, t_seg) = self.intersect_line(segment)?;

        if t_ray >= F::zero() && t_seg >= F::zero() && t_seg <= F::one() {
            Some((point, t_ray, t_seg))
        } else {
            None
        }
    }
}

impl<F: Float> Default for Ray2<F> {
    fn default() -> Self {
        Self {
            origin: Point2::origin(),
            direction: Vec2::new(F::one(), F::zero()),
        }
    }
}
