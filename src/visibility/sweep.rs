//! The angular sweep that traces the visibility boundary.
//!
//! The sweep is an explicit state machine:
//!
//! - `Idle`: endpoints extracted and sorted, nothing emitted.
//! - `Running`: the open set has been seeded with obstacles crossing the
//!   start ray at `-π` and the first vertex emitted; each [`Sweep::step`]
//!   consumes one endpoint.
//! - `Done`: every endpoint consumed and the ring brought back to `π`.
//!
//! Endpoints sharing an exact angle form a batch. The open set changes per
//! endpoint, but the nearest obstacle is compared only across the whole
//! batch, so a corner where one obstacle ends and the next begins emits the
//! corner once instead of a spike to whatever lies behind it.
//!
//! When nothing crosses the start ray, the horizon arc around the seam is
//! subdivided as one span, from the last event back round to the first, so
//! open arcs do not depend on where `-π` falls.

use super::assemble::Assembler;
use super::endpoint::{extract_endpoints, Endpoint};
use super::open_set::OpenSet;
use super::options::VisibilityOptions;
use super::scene::Obstacle;
use crate::error::Result;
use crate::primitives::{Point2, Ray2, Vec2};
use log::{debug, trace};
use num_traits::Float;

/// Lifecycle of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SweepPhase {
    Idle,
    Running,
    Done,
}

/// Endpoints sharing one angle.
#[derive(Debug, Clone)]
struct Batch<F> {
    angle: F,
    nearest_before: Option<usize>,
    touched: Vec<(usize, Point2<F>)>,
}

/// One visibility computation over a prepared obstacle arena.
#[derive(Debug)]
pub(crate) struct Sweep<'a, F> {
    obstacles: &'a [Obstacle<F>],
    viewpoint: Point2<F>,
    radius: F,
    arc_step: F,
    endpoints: Vec<Endpoint<F>>,
    wrapping: Vec<usize>,
    open: OpenSet<'a, F>,
    phase: SweepPhase,
    cursor: usize,
    seeded: Option<usize>,
    /// Whether the arc before the first event is still owed.
    leading_pending: bool,
    /// Ring position and angle of the first event, when its leading arc
    /// waits to be filled together with the trailing one.
    leading_gap: Option<(usize, F)>,
    batch: Option<Batch<F>>,
    last_angle: F,
    out: Assembler<F>,
}

impl<'a, F: Float> Sweep<'a, F> {
    /// Prepares a sweep around `viewpoint`; open rays are clipped at `radius`.
    pub fn new(
        obstacles: &'a [Obstacle<F>],
        viewpoint: Point2<F>,
        radius: F,
        options: &VisibilityOptions<F>,
    ) -> Self {
        let eps = options.epsilon;
        let extraction = extract_endpoints(obstacles, viewpoint, eps);
        if extraction.edge_on > 0 {
            debug!("skipping {} edge-on obstacles", extraction.edge_on);
        }

        Self {
            obstacles,
            viewpoint,
            radius,
            arc_step: options.arc_step(),
            endpoints: extraction.endpoints,
            wrapping: extraction.wrapping,
            open: OpenSet::new(obstacles, viewpoint, eps),
            phase: SweepPhase::Idle,
            cursor: 0,
            seeded: None,
            leading_pending: false,
            leading_gap: None,
            batch: None,
            last_angle: -pi::<F>(),
            out: Assembler::new(eps),
        }
    }

    /// Returns the current phase.
    #[inline]
    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    /// Seeds the open set at the start ray and emits the first vertex.
    ///
    /// Does nothing unless the sweep is idle.
    pub fn start(&mut self) -> Result<()> {
        if self.phase != SweepPhase::Idle {
            return Ok(());
        }

        let start = -pi::<F>();
        for &id in &self.wrapping {
            self.open.insert(id, start)?;
        }
        self.seeded = self.open.nearest();
        self.leading_pending = self.seeded.is_none();

        let first = self.vertex(self.seeded, start, &[]);
        self.out.push(first);
        self.last_angle = start;
        self.phase = SweepPhase::Running;

        debug!(
            "sweep started: {} endpoints, {} obstacles open at the start ray",
            self.endpoints.len(),
            self.open.len()
        );
        Ok(())
    }

    /// Consumes one endpoint. Returns whether endpoints remain.
    ///
    /// Returns `Ok(false)` without doing anything unless the sweep is running.
    pub fn step(&mut self) -> Result<bool> {
        if self.phase != SweepPhase::Running {
            return Ok(false);
        }
        let ep = match self.endpoints.get(self.cursor) {
            Some(&ep) => ep,
            None => return Ok(false),
        };

        if self.batch.is_none() {
            self.batch = Some(Batch {
                angle: ep.angle,
                nearest_before: self.open.nearest(),
                touched: Vec::new(),
            });
        }

        if ep.is_start {
            self.open.insert(ep.segment_index, ep.angle)?;
        } else {
            self.open.remove(ep.segment_index);
        }
        if let Some(batch) = self.batch.as_mut() {
            batch.touched.push((ep.segment_index, ep.point));
        }
        trace!(
            "{} obstacle {} at {:?}, open {:?}",
            if ep.is_start { "open" } else { "close" },
            ep.segment_index,
            ep.angle.to_f64(),
            self.open.as_slice()
        );

        self.cursor += 1;
        let batch_done = self
            .endpoints
            .get(self.cursor)
            .map_or(true, |next| next.angle != ep.angle);
        if batch_done {
            self.flush_batch();
        }

        Ok(self.cursor < self.endpoints.len())
    }

    /// Runs any remaining steps and closes the ring at `π`.
    pub fn finish(&mut self) -> Result<()> {
        match self.phase {
            SweepPhase::Done => return Ok(()),
            SweepPhase::Idle => self.start()?,
            SweepPhase::Running => {}
        }
        while self.step()? {}

        let end = pi::<F>();
        let last = self.open.nearest();
        match (self.open.is_empty(), self.leading_gap.take()) {
            (true, Some((at, first))) => self.fill_seam_arc(at, first),
            (true, None) => self.fill_arc(self.last_angle, end),
            (false, Some((at, first))) => {
                let run = self.arc_points(-end, first);
                self.out.insert_run(at, run);
            }
            (false, None) => {}
        }

        if last != self.seeded {
            // The same ray read at π and at -π; only rounding can get here
            debug!(
                "sweep ended on obstacle {:?} but started on {:?}",
                last, self.seeded
            );
            let a = self.vertex(last, end, &[]);
            let b = self.vertex(self.seeded, end, &[]);
            self.out.push(a);
            self.out.push(b);
        } else if last.is_none() {
            let p = self.horizon(end);
            self.out.push(p);
        }

        self.phase = SweepPhase::Done;
        trace!("sweep done with {} vertices", self.out.len());
        Ok(())
    }

    /// Returns the closed ring of vertices emitted so far.
    pub fn into_ring(self) -> Vec<Point2<F>> {
        self.out.finish()
    }

    /// Runs the sweep from idle to done.
    pub fn run(mut self) -> Result<Vec<Point2<F>>> {
        self.start()?;
        self.finish()?;
        debug_assert_eq!(self.phase(), SweepPhase::Done);
        Ok(self.into_ring())
    }

    fn flush_batch(&mut self) {
        let batch = match self.batch.take() {
            Some(batch) => batch,
            None => return,
        };
        let after = self.open.nearest();
        if after == batch.nearest_before {
            return;
        }

        if batch.nearest_before.is_none() {
            if self.leading_pending {
                self.leading_gap = Some((self.out.len(), batch.angle));
            } else {
                self.fill_arc(self.last_angle, batch.angle);
            }
        }
        self.leading_pending = false;
        let old = self.vertex(batch.nearest_before, batch.angle, &batch.touched);
        let new = self.vertex(after, batch.angle, &batch.touched);
        self.out.push(old);
        self.out.push(new);
        self.last_angle = batch.angle;
    }

    /// Where the ray at `angle` stops: on `nearest`, or at the horizon.
    fn vertex(&self, nearest: Option<usize>, angle: F, touched: &[(usize, Point2<F>)]) -> Point2<F> {
        let id = match nearest {
            Some(id) => id,
            None => return self.horizon(angle),
        };
        // An obstacle ending or starting on this ray stops it at its exact endpoint
        if let Some(&(_, p)) = touched.iter().find(|(t, _)| *t == id) {
            return p;
        }
        self.hit(id, angle)
    }

    fn hit(&self, id: usize, angle: F) -> Point2<F> {
        let seg = self.obstacles[id].segment;
        match Ray2::from_angle(self.viewpoint, angle).intersect_line(&seg) {
            Some((p, t, _)) if t.is_finite() && t > F::zero() => p,
            _ => {
                let dir = Vec2::from_angle(angle);
                let align = |p: Point2<F>| {
                    let v = p - self.viewpoint;
                    dir.dot(v) / v.magnitude()
                };
                if align(seg.start) >= align(seg.end) {
                    seg.start
                } else {
                    seg.end
                }
            }
        }
    }

    fn horizon(&self, angle: F) -> Point2<F> {
        self.viewpoint + Vec2::from_angle(angle) * self.radius
    }

    /// Horizon vertices strictly between `from` and `to`.
    fn arc_points(&self, from: F, to: F) -> Vec<Point2<F>> {
        let span = to - from;
        if span <= F::zero() {
            return Vec::new();
        }
        arc_angles(from, span, self.arc_step)
            .map(|a| self.horizon(a))
            .collect()
    }

    /// Emits evenly spaced horizon vertices strictly between `from` and `to`.
    fn fill_arc(&mut self, from: F, to: F) {
        for p in self.arc_points(from, to) {
            self.out.push(p);
        }
    }

    /// Fills the open arc from the last event round through the seam to
    /// the first event at `first`, whose leading vertices belong at ring
    /// position `at`.
    fn fill_seam_arc(&mut self, at: usize, first: F) {
        let end = pi::<F>();
        let turn = end + end;
        let span = first + turn - self.last_angle;
        let mut lead = Vec::new();
        for angle in arc_angles(self.last_angle, span, self.arc_step) {
            if angle < end {
                let p = self.horizon(angle);
                self.out.push(p);
            } else {
                lead.push(self.horizon(angle - turn));
            }
        }
        self.out.insert_run(at, lead);
    }
}

/// Angles cutting `from..from + span` into equal pieces no wider than
/// `step`, endpoints excluded.
fn arc_angles<F: Float>(from: F, span: F, step: F) -> impl Iterator<Item = F> {
    let n = (span / step).ceil().to_usize().unwrap_or(1).max(1);
    let nf = F::from(n).unwrap();
    (1..n).map(move |k| from + span * F::from(k).unwrap() / nf)
}

#[inline]
fn pi<F: Float>() -> F {
    F::from(std::f64::consts::PI).unwrap()
}
