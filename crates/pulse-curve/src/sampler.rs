//! Discretized sampling of an epoch's ask curve.
//!
//! `u` is sampled linearly over `[0, u_max]` in `steps` intervals. With a
//! defined half-life `tau = u * half_life`; in the degenerate branch `u` and
//! `tau` coincide. The last sample is pinned to exactly `u_max` so the "now"
//! marker a renderer anchors to the final point never falls short.

use std::iter::FusedIterator;

use pulse_core::constants::MAX_STEPS;
use pulse_core::types::{CurveOptions, CurvePoint, EpochParameters};
use tracing::{debug, trace};

use crate::engine::{compute_ask, compute_half_life};
use crate::series::CurveSeries;

/// Resolved sampling window of one curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveWindow {
    /// Seconds per unit of `u`; `+inf` in the degenerate branch.
    pub half_life: f64,
    /// Right edge of the window in `u` units.
    pub u_max: f64,
}

impl CurveWindow {
    /// Whether `u` is measured in seconds (no half-life defined).
    pub fn is_degenerate(&self) -> bool {
        !self.half_life.is_finite()
    }

    /// Elapsed seconds at normalized time `u`.
    pub fn tau_at(&self, u: f64) -> f64 {
        if self.is_degenerate() { u } else { u * self.half_life }
    }

    /// Normalized time at `tau` elapsed seconds.
    pub fn u_at(&self, tau: f64) -> f64 {
        if self.is_degenerate() { tau } else { tau / self.half_life }
    }
}

/// Work out the sampled window for `epoch`, or `None` when it defines no curve.
///
/// The window covers "now": `max(u_now, u_max_default)` half-lives, or in the
/// degenerate branch the elapsed seconds (falling back to
/// `degenerate_window_secs` when nothing has elapsed). An explicit
/// `options.u_max` wins over both.
pub fn resolve_window(epoch: &EpochParameters, options: &CurveOptions) -> Option<CurveWindow> {
    if let Err(e) = epoch.validate() {
        debug!(epoch = epoch.epoch_index, error = %e, "no curve for epoch");
        return None;
    }

    let half_life = compute_half_life(epoch.k, epoch.premium_seed());
    let tau_now = epoch.elapsed_secs();

    let u_max = match options.u_max {
        Some(u_max) => u_max,
        None if half_life.is_finite() => (tau_now / half_life).max(options.u_max_default),
        None if tau_now > 0.0 => tau_now,
        None => options.degenerate_window_secs,
    };

    if !u_max.is_finite() || u_max <= 0.0 {
        debug!(epoch = epoch.epoch_index, u_max, "empty sampling window");
        return None;
    }

    Some(CurveWindow { half_life, u_max })
}

/// Lazy, deterministic sampler over an epoch's curve.
///
/// Yields `steps + 1` points, or nothing when the epoch defines no curve.
/// `steps` is clamped to `1..=MAX_STEPS`.
#[derive(Debug, Clone)]
pub struct CurveSampler {
    floor: f64,
    k: f64,
    d: Option<f64>,
    window: Option<CurveWindow>,
    steps: usize,
    index: usize,
}

impl CurveSampler {
    pub fn new(epoch: &EpochParameters, options: &CurveOptions) -> Self {
        Self {
            floor: epoch.floor,
            k: epoch.k,
            d: epoch.premium_seed(),
            window: resolve_window(epoch, options),
            steps: options.steps.clamp(1, MAX_STEPS),
            index: 0,
        }
    }

    /// The resolved window, `None` for an empty curve.
    pub fn window(&self) -> Option<CurveWindow> {
        self.window
    }

    fn point(&self, window: &CurveWindow, i: usize) -> CurvePoint {
        let u = if i == self.steps {
            window.u_max
        } else {
            window.u_max * i as f64 / self.steps as f64
        };
        let tau = window.tau_at(u);
        CurvePoint {
            tau,
            u,
            price: compute_ask(self.floor, self.k, self.d, tau),
        }
    }

    fn remaining(&self) -> usize {
        match self.window {
            Some(_) => (self.steps + 1).saturating_sub(self.index),
            None => 0,
        }
    }
}

impl Iterator for CurveSampler {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<CurvePoint> {
        let window = self.window?;
        if self.index > self.steps {
            return None;
        }
        let p = self.point(&window, self.index);
        self.index += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for CurveSampler {}

impl FusedIterator for CurveSampler {}

/// Lazily sample the curve of `epoch`.
pub fn sample_curve(epoch: &EpochParameters, options: &CurveOptions) -> CurveSampler {
    CurveSampler::new(epoch, options)
}

/// Sample the curve of `epoch` into a [`CurveSeries`].
///
/// Never fails: an epoch that defines no curve (non-positive `k`, non-finite
/// floor, non-positive premium, no sales) yields an empty series.
pub fn build_curve_points(epoch: &EpochParameters, options: &CurveOptions) -> CurveSeries {
    let sampler = sample_curve(epoch, options);
    let Some(window) = sampler.window() else {
        return CurveSeries::empty();
    };
    let points: Vec<CurvePoint> = sampler.collect();
    trace!(
        epoch = epoch.epoch_index,
        points = points.len(),
        u_max = window.u_max,
        "sampled curve"
    );
    CurveSeries::new(points, window)
}
