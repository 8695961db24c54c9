//! Tuning knobs for visibility computation.

use crate::error::{Result, VisibilityError};
use num_traits::Float;

/// Arc vertices per full turn never exceed this, whatever `max_arc_step` says.
const MAX_ARC_VERTICES: f64 = 4096.0;

/// Options for visibility polygon computation.
///
/// # Example
///
/// ```
/// use sightline::visibility::VisibilityOptions;
///
/// let options = VisibilityOptions::with_bounding_radius(50.0)
///     .epsilon(1e-9)
///     .split_crossings(false);
///
/// assert_eq!(options.bounding_radius, Some(50.0));
/// assert!(!options.split_crossings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityOptions<F> {
    /// Radius at which rays that escape every obstacle are clipped.
    ///
    /// `None` derives a radius from the scene: twice the distance from the
    /// viewpoint to the farthest obstacle point, and at least one.
    pub bounding_radius: Option<F>,
    /// Geometric tolerance, in distance units. Must be finite and
    /// non-negative.
    pub epsilon: F,
    /// Largest angular gap (radians) between consecutive vertices on an
    /// open arc of the bounding circle.
    ///
    /// Steps finer than a 4096th of a full turn are raised to that.
    pub max_arc_step: F,
    /// Split obstacles at their proper mutual crossings before sweeping.
    ///
    /// Crossing obstacles change nearness order part way along their
    /// common span, which the sweep cannot follow. When off, a crossing
    /// pair is rejected with [`VisibilityError::DegenerateGeometry`]
    /// instead of split.
    pub split_crossings: bool,
}

impl<F: Float> Default for VisibilityOptions<F> {
    fn default() -> Self {
        Self {
            bounding_radius: None,
            epsilon: F::epsilon().sqrt(),
            max_arc_step: F::from(std::f64::consts::PI / 32.0).unwrap(),
            split_crossings: true,
        }
    }
}

impl<F: Float> VisibilityOptions<F> {
    /// Creates options with the given bounding radius.
    pub fn with_bounding_radius(radius: F) -> Self {
        Self {
            bounding_radius: Some(radius),
            ..Default::default()
        }
    }

    /// Sets the bounding radius (`None` derives it from the scene).
    pub fn bounding_radius(mut self, radius: Option<F>) -> Self {
        self.bounding_radius = radius;
        self
    }

    /// Sets the geometric tolerance.
    pub fn epsilon(mut self, epsilon: F) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the largest angular gap between arc vertices.
    pub fn max_arc_step(mut self, step: F) -> Self {
        self.max_arc_step = step;
        self
    }

    /// Enables or disables splitting of crossing obstacles (off rejects them).
    pub fn split_crossings(mut self, split: bool) -> Self {
        self.split_crossings = split;
        self
    }

    /// Checks the tolerance.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.epsilon.is_finite() && self.epsilon >= F::zero() {
            Ok(())
        } else {
            Err(VisibilityError::InvalidEpsilon)
        }
    }

    /// Returns the arc step, falling back to the default when the
    /// configured value is not a positive finite angle and raised to the
    /// finest step allowed.
    pub(crate) fn arc_step(&self) -> F {
        if !(self.max_arc_step.is_finite() && self.max_arc_step > F::zero()) {
            return Self::default().max_arc_step;
        }
        let finest = F::from(std::f64::consts::TAU / MAX_ARC_VERTICES).unwrap();
        self.max_arc_step.max(finest)
    }
}
