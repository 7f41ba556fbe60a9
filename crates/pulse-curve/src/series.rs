//! Sampled curve with interpolated point queries.
//!
//! Hover and tooltip lookups read the precomputed samples instead of
//! re-evaluating the curve: the bracketing pair is found by binary search and
//! linearly interpolated. The price is not linear in `u`, so the result is
//! only as accurate as the sampling density; more `steps` means less error.
//! Queries outside `[0, u_max]` clamp to the nearest endpoint.

use pulse_core::types::CurvePoint;
use serde::Serialize;

use crate::sampler::CurveWindow;

/// An ordered, finite sampling of one epoch's ask curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSeries {
    points: Vec<CurvePoint>,
    half_life: f64,
    u_max: f64,
}

impl CurveSeries {
    pub(crate) fn new(points: Vec<CurvePoint>, window: CurveWindow) -> Self {
        Self {
            points,
            half_life: window.half_life,
            u_max: window.u_max,
        }
    }

    /// A series with no points; what an epoch without a curve samples to.
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            half_life: f64::INFINITY,
            u_max: 0.0,
        }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<CurvePoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First sample (`u = 0`).
    pub fn first(&self) -> Option<&CurvePoint> {
        self.points.first()
    }

    /// Last sample (`u = u_max`). Renderers anchor the "now" marker here.
    pub fn last(&self) -> Option<&CurvePoint> {
        self.points.last()
    }

    /// Seconds per unit of `u`; `+inf` for a degenerate or empty curve.
    pub fn half_life(&self) -> f64 {
        self.half_life
    }

    pub fn u_max(&self) -> f64 {
        self.u_max
    }

    /// Interpolated point at normalized time `u`.
    ///
    /// Returns `None` only for an empty series.
    pub fn point_at_u(&self, u: f64) -> Option<CurvePoint> {
        self.interpolate(|p| p.u, u)
    }

    /// Interpolated point at `tau` seconds since epoch start.
    ///
    /// Returns `None` only for an empty series. In the degenerate branch the
    /// `tau = 0` sample is `floor + k / EPSILON`, so queries inside the first
    /// interval are dominated by that sample and overshoot the exact price.
    pub fn point_at_tau(&self, tau: f64) -> Option<CurvePoint> {
        self.interpolate(|p| p.tau, tau)
    }

    /// Linear interpolation along `key`, which must be non-decreasing over the samples.
    fn interpolate(&self, key: impl Fn(&CurvePoint) -> f64, x: f64) -> Option<CurvePoint> {
        let first = self.points.first()?;
        let last = self.points.last()?;

        let x = if x.is_nan() { key(first) } else { x };
        if x <= key(first) {
            return Some(*first);
        }
        if x >= key(last) {
            return Some(*last);
        }

        let index = self.points.partition_point(|p| key(p) <= x);
        // key(first) < x < key(last) guarantees 1 <= index < len
        let lo = &self.points[index - 1];
        let hi = &self.points[index];
        let span = key(hi) - key(lo);
        if span <= 0.0 {
            return Some(*lo);
        }

        let t = (x - key(lo)) / span;
        Some(CurvePoint {
            tau: lerp(lo.tau, hi.tau, t),
            u: lerp(lo.u, hi.u, t),
            price: lerp(lo.price, hi.price, t),
        })
    }
}

/// Linear interpolation, kept inside `[a, b]` despite rounding.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (a + (b - a) * t).clamp(a.min(b), a.max(b))
}

impl<'a> IntoIterator for &'a CurveSeries {
    type Item = &'a CurvePoint;
    type IntoIter = std::slice::Iter<'a, CurvePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
