//! Collects sweep vertices into a closed ring.

use crate::primitives::Point2;
use num_traits::Float;

/// Accumulates emitted vertices, dropping consecutive near-duplicates.
#[derive(Debug, Clone)]
pub(crate) struct Assembler<F> {
    points: Vec<Point2<F>>,
    eps: F,
}

impl<F: Float> Assembler<F> {
    /// Creates an empty assembler; points closer than `eps` are merged.
    pub fn new(eps: F) -> Self {
        Self {
            points: Vec::new(),
            eps,
        }
    }

    /// Appends a vertex unless it coincides with the previous one.
    pub fn push(&mut self, p: Point2<F>) {
        match self.points.last() {
            Some(&last) if last.distance_squared(p) <= self.eps * self.eps => {}
            _ => self.points.push(p),
        }
    }

    /// Inserts a run of vertices before position `at`.
    ///
    /// Points of the run that coincide with their neighbour on either side
    /// are dropped, as [`Assembler::push`] would.
    pub fn insert_run(&mut self, at: usize, run: Vec<Point2<F>>) {
        let at = at.min(self.points.len());
        let eps_sq = self.eps * self.eps;
        let mut kept: Vec<Point2<F>> = Vec::with_capacity(run.len());
        let mut prev = if at > 0 { Some(self.points[at - 1]) } else { None };
        for p in run {
            if prev.map_or(true, |q| q.distance_squared(p) > eps_sq) {
                kept.push(p);
                prev = Some(p);
            }
        }
        if let (Some(&last), Some(&next)) = (kept.last(), self.points.get(at)) {
            if last.distance_squared(next) <= eps_sq {
                kept.pop();
            }
        }
        self.points.splice(at..at, kept);
    }

    /// Returns the number of vertices collected so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Closes the ring and returns it.
    ///
    /// Trailing vertices that coincide with the first are dropped, then the
    /// first vertex is repeated at the end, so the result always satisfies
    /// `first == last` exactly.
    pub fn finish(mut self) -> Vec<Point2<F>> {
        let first = match self.points.first() {
            Some(&p) => p,
            None => return self.points,
        };
        let eps_sq = self.eps * self.eps;
        while self.points.len() > 1
            && self
                .points
                .last()
                .map_or(false, |p| p.distance_squared(first) <= eps_sq)
        {
            self.points.pop();
        }
        self.points.push(first);
        self.points
    }
}
