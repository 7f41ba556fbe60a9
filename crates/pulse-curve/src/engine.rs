//! Curve engine implementing the [`AskCurve`] trait.
//!
//! The ask is a hyperbola over elapsed time: the premium `D` seeded at the
//! start of an epoch halves after `k / D` seconds and keeps decaying towards
//! the floor. Genesis and steady-state epochs share the formula and only
//! differ in how `D` is seeded (see [`PremiumSeed`](pulse_core::types::PremiumSeed)).
//! Without a premium the curve degenerates to `floor + k / tau`.

use pulse_core::constants::EPSILON;
use pulse_core::traits::AskCurve;
use pulse_core::types::{CurveOptions, EpochParameters};

use crate::sampler::{build_curve_points, sample_curve, CurveSampler};
use crate::series::CurveSeries;

/// Seconds for the premium to halve.
///
/// `+inf` when `d` is `None` or non-positive, otherwise `k / max(d, EPSILON)`.
pub fn compute_half_life(k: f64, d: Option<f64>) -> f64 {
    match d {
        Some(d) if d > 0.0 => k / d.max(EPSILON),
        _ => f64::INFINITY,
    }
}

/// Ask price `tau` seconds after the epoch started.
///
/// - `d = None`: `floor + k / max(tau, EPSILON)`. The singularity at `tau = 0`
///   is clamped rather than producing `inf`.
/// - `d = Some(D)`: `floor + k / (tau + k / max(D, EPSILON))`, which is
///   `floor + D` at `tau = 0` and `floor + D / 2` at one half-life.
pub fn compute_ask(floor: f64, k: f64, d: Option<f64>, tau: f64) -> f64 {
    let tau = tau.max(0.0);
    match d {
        None => floor + k / tau.max(EPSILON),
        Some(d) => floor + k / (tau + k / d.max(EPSILON)),
    }
}

/// The production ask curve.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulseCurveEngine;

impl PulseCurveEngine {
    /// Create a new PulseCurveEngine.
    pub fn new() -> Self {
        Self
    }

    /// Lazily sample the curve of `epoch`.
    pub fn sample(&self, epoch: &EpochParameters, options: &CurveOptions) -> CurveSampler {
        sample_curve(epoch, options)
    }

    /// Sample the curve of `epoch` into a queryable series.
    pub fn curve(&self, epoch: &EpochParameters, options: &CurveOptions) -> CurveSeries {
        build_curve_points(epoch, options)
    }
}

impl AskCurve for PulseCurveEngine {
    fn half_life(&self, k: f64, d: Option<f64>) -> f64 {
        compute_half_life(k, d)
    }

    fn ask(&self, floor: f64, k: f64, d: Option<f64>, tau: f64) -> f64 {
        compute_ask(floor, k, d, tau)
    }
}
