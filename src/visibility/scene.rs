//! Prepared obstacle scenes.

use super::options::VisibilityOptions;
use super::sweep::Sweep;
use crate::error::{Result, SegmentDefect, VisibilityError};
use crate::polygon::Polygon;
use crate::primitives::{Point2, Segment2};
use crate::tolerance::{point_on_segment, segment_crossing, segments_cross};
use log::debug;
use num_traits::Float;

/// A prepared obstacle: a piece of an input segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle<F> {
    /// The obstacle's geometry.
    pub segment: Segment2<F>,
    /// Index of the input segment this obstacle was cut from.
    pub source: usize,
}

/// A set of validated obstacles, queried from any number of viewpoints.
///
/// Validation and crossing splits happen once, on construction. Queries
/// borrow the scene immutably, so a scene can be shared across threads.
///
/// # Example
///
/// ```
/// use sightline::primitives::{Point2, Segment2};
/// use sightline::visibility::{Scene, VisibilityOptions};
///
/// let walls = vec![
///     Segment2::from_coords(-5.0, -5.0, 5.0, -5.0),
///     Segment2::from_coords(5.0, -5.0, 5.0, 5.0),
///     Segment2::from_coords(5.0, 5.0, -5.0, 5.0),
///     Segment2::from_coords(-5.0, 5.0, -5.0, -5.0),
/// ];
/// let scene: Scene<f64> = Scene::new(&walls, VisibilityOptions::default()).unwrap();
///
/// let room = scene.polygon_from(Point2::new(1.0, 2.0)).unwrap();
/// assert!((room.area() - 100.0).abs() < 1e-9);
/// assert!(scene.is_visible(Point2::new(0.0, 0.0), Point2::new(4.0, 4.0)));
/// ```
#[derive(Debug, Clone)]
pub struct Scene<F> {
    segments: Vec<Segment2<F>>,
    obstacles: Vec<Obstacle<F>>,
    options: VisibilityOptions<F>,
}

impl<F: Float> Scene<F> {
    /// Validates `segments` and prepares them as obstacles.
    ///
    /// # Errors
    ///
    /// - [`VisibilityError::InvalidEpsilon`] if `options.epsilon` is not a
    ///   finite non-negative number.
    /// - [`VisibilityError::InvalidSegment`] for the first segment with a
    ///   non-finite coordinate or a length within `options.epsilon` of zero.
    /// - [`VisibilityError::DegenerateGeometry`] for the first crossing pair
    ///   when `options.split_crossings` is off.
    pub fn new(segments: &[Segment2<F>], options: VisibilityOptions<F>) -> Result<Self> {
        let segments = segments.to_vec();
        let obstacles = prepare(&segments, &options)?;
        Ok(Self {
            segments,
            obstacles,
            options,
        })
    }

    /// Builds a scene from the edges of closed polygons.
    ///
    /// Edges are numbered in order across all polygons; error indices refer
    /// to that numbering.
    pub fn from_polygons(polygons: &[Polygon<F>], options: VisibilityOptions<F>) -> Result<Self> {
        let segments: Vec<_> = polygons.iter().flat_map(|p| p.edges()).collect();
        Self::new(&segments, options)
    }

    /// Adds the edges of a closed polygon as obstacles.
    ///
    /// The new edges are numbered after the existing segments. On error the
    /// scene is left unchanged.
    pub fn add_polygon(&mut self, polygon: &Polygon<F>) -> Result<()> {
        let mut segments = self.segments.clone();
        segments.extend(polygon.edges());
        self.obstacles = prepare(&segments, &self.options)?;
        self.segments = segments;
        Ok(())
    }

    /// Returns the input segments, in caller order.
    #[inline]
    pub fn segments(&self) -> &[Segment2<F>] {
        &self.segments
    }

    /// Returns the prepared obstacles.
    #[inline]
    pub fn obstacles(&self) -> &[Obstacle<F>] {
        &self.obstacles
    }

    /// Returns the options the scene was built with.
    #[inline]
    pub fn options(&self) -> &VisibilityOptions<F> {
        &self.options
    }

    /// Computes the visibility polygon around `viewpoint`.
    ///
    /// Returns the boundary as an explicitly closed ring (first point
    /// repeated last), counter-clockwise, starting on the ray at `-π`.
    ///
    /// # Errors
    ///
    /// - [`VisibilityError::InvalidViewpoint`] if `viewpoint` is not finite.
    /// - [`VisibilityError::ViewpointOnSegment`] if `viewpoint` is within
    ///   `epsilon` of an obstacle.
    /// - [`VisibilityError::InvalidBoundingRadius`] if the configured
    ///   radius is not a positive finite number, or the derived one
    ///   overflows.
    /// - [`VisibilityError::DegenerateGeometry`] if two obstacles cannot be
    ///   ordered by nearness.
    pub fn visibility_from(&self, viewpoint: Point2<F>) -> Result<Vec<Point2<F>>> {
        if !viewpoint.is_finite() {
            return Err(VisibilityError::InvalidViewpoint);
        }
        let eps = self.options.epsilon;
        if let Some(ob) = self
            .obstacles
            .iter()
            .find(|ob| point_on_segment(viewpoint, ob.segment, eps))
        {
            return Err(VisibilityError::ViewpointOnSegment { index: ob.source });
        }
        let radius = self.radius_for(viewpoint)?;

        Sweep::new(&self.obstacles, viewpoint, radius, &self.options).run()
    }

    /// Computes the visibility region around `viewpoint` as a [`Polygon`].
    pub fn polygon_from(&self, viewpoint: Point2<F>) -> Result<Polygon<F>> {
        self.visibility_from(viewpoint)
            .map(Polygon::from_closed_ring)
    }

    /// Returns true if the straight line from `from` to `to` crosses no
    /// obstacle.
    ///
    /// Grazing an obstacle's endpoint or running along it does not block
    /// the line. Non-finite points are never visible.
    pub fn is_visible(&self, from: Point2<F>, to: Point2<F>) -> bool {
        if !from.is_finite() || !to.is_finite() {
            return false;
        }
        let sight = Segment2::new(from, to);
        let eps = self.options.epsilon;
        !self
            .obstacles
            .iter()
            .any(|ob| segments_cross(sight, ob.segment, eps))
    }

    fn radius_for(&self, viewpoint: Point2<F>) -> Result<F> {
        match self.options.bounding_radius {
            Some(r) if r.is_finite() && r > F::zero() => Ok(r),
            Some(_) => Err(VisibilityError::InvalidBoundingRadius),
            None => {
                let farthest = self
                    .obstacles
                    .iter()
                    .flat_map(|ob| [ob.segment.start, ob.segment.end])
                    .map(|p| p.distance(viewpoint))
                    .fold(F::zero(), F::max);
                let two = F::one() + F::one();
                let r = (farthest * two).max(F::one());
                if r.is_finite() {
                    Ok(r)
                } else {
                    Err(VisibilityError::InvalidBoundingRadius)
                }
            }
        }
    }
}

/// Validates segments and splits them at proper mutual crossings.
///
/// With splitting off, a crossing pair is an error instead.
fn prepare<F: Float>(segments: &[Segment2<F>], options: &VisibilityOptions<F>) -> Result<Vec<Obstacle<F>>> {
    options.validate()?;
    let eps = options.epsilon;
    for (index, seg) in segments.iter().enumerate() {
        if !seg.is_finite() {
            return Err(VisibilityError::InvalidSegment {
                index,
                defect: SegmentDefect::NonFinite,
            });
        }
        if seg.is_degenerate(eps) {
            return Err(VisibilityError::InvalidSegment {
                index,
                defect: SegmentDefect::ZeroLength,
            });
        }
    }

    if !options.split_crossings {
        if let Some((first, second)) = first_crossing(segments, eps) {
            debug!("segments {} and {} cross with splitting off", first, second);
            return Err(VisibilityError::DegenerateGeometry { first, second });
        }
        return Ok(segments
            .iter()
            .enumerate()
            .map(|(source, &segment)| Obstacle { segment, source })
            .collect());
    }

    let obstacles = split_crossings(segments, eps);
    debug!(
        "prepared {} obstacles from {} segments",
        obstacles.len(),
        segments.len()
    );
    Ok(obstacles)
}

/// Finds the first properly crossing pair, by input index.
fn first_crossing<F: Float>(segments: &[Segment2<F>], eps: F) -> Option<(usize, usize)> {
    (0..segments.len()).find_map(|i| {
        ((i + 1)..segments.len())
            .find(|&j| segments_cross(segments[i], segments[j], eps))
            .map(|j| (i, j))
    })
}

/// Cuts every segment at its proper crossings with the others.
///
/// Each crossing point is computed once and shared by both pieces on either
/// side, so the pieces of two crossing segments meet exactly.
fn split_crossings<F: Float>(segments: &[Segment2<F>], eps: F) -> Vec<Obstacle<F>> {
    let mut cuts: Vec<Vec<(F, Point2<F>)>> = vec![Vec::new(); segments.len()];
    let mut crossings = 0usize;

    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            if let Some(c) = segment_crossing(segments[i], segments[j], eps) {
                cuts[i].push((c.t1, c.point));
                cuts[j].push((c.t2, c.point));
                crossings += 1;
            }
        }
    }
    if crossings > 0 {
        debug!("splitting {} segment crossings", crossings);
    }

    let mut obstacles = Vec::with_capacity(segments.len() + 2 * crossings);
    for (source, (seg, mut seg_cuts)) in segments.iter().zip(cuts).enumerate() {
        seg_cuts.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut from = seg.start;
        for (_, p) in seg_cuts {
            // Several segments crossing at one point cut it only once
            if from.distance(p) <= eps {
                continue;
            }
            obstacles.push(Obstacle {
                segment: Segment2::new(from, p),
                source,
            });
            from = p;
        }
        obstacles.push(Obstacle {
            segment: Segment2::new(from, seg.end),
            source,
        });
    }
    obstacles
}
