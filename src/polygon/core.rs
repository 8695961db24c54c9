//! Core polygon type and the measurements used on visibility results.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// A simple polygon represented as a sequence of vertices.
///
/// The polygon is implicitly closed (the last vertex connects to the first);
/// the first vertex is not repeated at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    /// The vertices of the polygon, counter-clockwise for a positive area.
    pub vertices: Vec<Point2<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a new polygon from vertices.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Creates a polygon from an explicitly closed ring (first point repeated last).
    ///
    /// The repeated closing vertex is dropped; a ring that is not closed is
    /// taken as-is.
    pub fn from_closed_ring(mut ring: Vec<Point2<F>>) -> Self {
        if ring.len() >= 2 && ring.first() == ring.last() {
            ring.pop();
        }
        Self { vertices: ring }
    }

    /// Returns true if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the signed area of the polygon using the shoelace formula.
    ///
    /// Positive for CCW winding, negative for CW winding.
    pub fn signed_area(&self) -> F {
        polygon_signed_area(&self.vertices)
    }

    /// Returns the absolute area of the polygon.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Tests if a point is inside the polygon.
    pub fn contains(&self, point: Point2<F>) -> bool {
        polygon_contains(&self.vertices, point)
    }

    /// Iterates over the closed ring of edges, last vertex back to the first.
    pub fn edges(&self) -> impl Iterator<Item = Segment2<F>> + '_ {
        let n = self.vertices.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| Segment2::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// Computes the signed area of a polygon using the shoelace formula.
///
/// Positive for CCW winding, negative for CW winding. A repeated closing
/// vertex contributes nothing, so open and closed rings give the same area.
pub fn polygon_signed_area<F: Float>(vertices: &[Point2<F>]) -> F {
    if vertices.len() < 3 {
        return F::zero();
    }

    let mut area = F::zero();
    let n = vertices.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area = area + vertices[i].x * vertices[j].y;
        area = area - vertices[j].x * vertices[i].y;
    }

    area / F::from(2.0).unwrap()
}

/// Tests if a point is inside a polygon using the ray casting algorithm.
///
/// Points on the boundary may return either true or false.
pub fn polygon_contains<F: Float>(vertices: &[Point2<F>], point: Point2<F>) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = vertices.len();

    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];

        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}
