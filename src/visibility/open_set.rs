//! The set of obstacles crossed by the current sweep ray.

use super::order::compare_nearness;
use super::scene::Obstacle;
use crate::error::Result;
use crate::primitives::Point2;
use log::trace;
use num_traits::Float;
use std::cmp::Ordering;

/// Obstacles currently crossed by the sweep ray, nearest first.
///
/// Stores arena indices only. Positions are found by binary search with
/// [`compare_nearness`] evaluated at the angle passed to [`OpenSet::insert`].
/// Obstacles that do not cross keep one nearness order over their whole
/// common span, so an order established at insertion stays valid until
/// removal.
///
/// Insertion takes O(log k) comparisons for k open obstacles, but both
/// insertion and removal shift the tail of the `Vec`, and removal finds its
/// position by a linear scan, so each is O(k) moves. A scene whose
/// obstacles are nearly all open together sweeps in O(n²) moves; those
/// moves are `usize` copies within one allocation, where a balanced tree
/// would save them at the price of a node per obstacle.
#[derive(Debug, Clone)]
pub(crate) struct OpenSet<'a, F> {
    obstacles: &'a [Obstacle<F>],
    viewpoint: Point2<F>,
    eps: F,
    order: Vec<usize>,
}

impl<'a, F: Float> OpenSet<'a, F> {
    /// Creates an empty set over the given obstacle arena.
    pub fn new(obstacles: &'a [Obstacle<F>], viewpoint: Point2<F>, eps: F) -> Self {
        Self {
            obstacles,
            viewpoint,
            eps,
            order: Vec::new(),
        }
    }

    /// Inserts an obstacle, ordering it against the others along the ray at `angle`.
    ///
    /// Obstacles comparing equal are placed after the existing ones.
    pub fn insert(&mut self, id: usize, angle: F) -> Result<()> {
        let mut lo = 0;
        let mut hi = self.order.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            let ord = compare_nearness(
                self.obstacles,
                id,
                self.order[mid],
                self.viewpoint,
                angle,
                self.eps,
            )?;
            if ord == Ordering::Less {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        self.order.insert(lo, id);
        Ok(())
    }

    /// Removes an obstacle. Returns `false` if it was not open.
    pub fn remove(&mut self, id: usize) -> bool {
        match self.order.iter().position(|&o| o == id) {
            Some(pos) => {
                self.order.remove(pos);
                true
            }
            None => {
                trace!("obstacle {} closed without being open", id);
                false
            }
        }
    }

    /// Returns the obstacle nearest to the viewpoint, if any is open.
    #[inline]
    pub fn nearest(&self) -> Option<usize> {
        self.order.first().copied()
    }

    /// Returns the number of open obstacles.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no obstacle is open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the open obstacles, nearest first.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }
}
