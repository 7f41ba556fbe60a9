//! Core curve types: epoch parameters, premium seeds, sampled points.
//!
//! Prices are human token units (already descaled), times are unix seconds.
//! Every value here is immutable once built; a sale produces a new
//! [`EpochParameters`] via [`EpochParameters::next_epoch`].

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_STEPS, DEFAULT_U_MAX, DEGENERATE_WINDOW_SECS, GENESIS_EPOCH};
use crate::error::CurveError;

/// How the initial premium `D` of an epoch is seeded.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PremiumSeed {
    /// Epoch 1: no prior sale, premium is `genesis_price - genesis_floor`.
    Genesis { genesis_price: f64, genesis_floor: f64 },
    /// The premium `D` is known directly.
    Rate(f64),
    /// `D = rate * prior_interval_secs`, the interval between the last two sales.
    Accrued { rate: f64, prior_interval_secs: f64 },
    /// No premium rate defined; the curve falls back to the pure `k / tau` form.
    Undefined,
}

impl PremiumSeed {
    /// The seeded premium `D`, or `None` in the degenerate branch.
    pub fn premium(&self) -> Option<f64> {
        match *self {
            Self::Genesis {
                genesis_price,
                genesis_floor,
            } => Some(genesis_price - genesis_floor),
            Self::Rate(d) => Some(d),
            Self::Accrued {
                rate,
                prior_interval_secs,
            } => Some(rate * prior_interval_secs),
            Self::Undefined => None,
        }
    }

    pub fn is_genesis(&self) -> bool {
        matches!(self, Self::Genesis { .. })
    }
}

/// Snapshot of one pricing epoch, as handed over by the auction layer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct EpochParameters {
    /// Ordinal of the pricing epoch. `0` means no epoch has started yet.
    pub epoch_index: u64,
    /// Price the ask never falls below within this epoch.
    pub floor: f64,
    /// Decay constant `k`. Larger values decay more slowly.
    pub k: f64,
    /// Seed for the initial premium `D`.
    pub premium: PremiumSeed,
    /// Unix seconds of the last sale (the curve anchor).
    pub start_time_secs: f64,
    /// Evaluation time. Only sizes the sampled window.
    pub now_time_secs: f64,
}

impl EpochParameters {
    /// Genesis epoch: floor and premium come from the configured genesis prices.
    pub fn genesis(genesis_floor: f64, genesis_price: f64, k: f64, start_time_secs: f64) -> Self {
        Self {
            epoch_index: GENESIS_EPOCH,
            floor: genesis_floor,
            k,
            premium: PremiumSeed::Genesis {
                genesis_price,
                genesis_floor,
            },
            start_time_secs,
            now_time_secs: start_time_secs,
        }
    }

    /// The premium `D` seeding this epoch, `None` in the degenerate branch.
    pub fn premium_seed(&self) -> Option<f64> {
        self.premium.premium()
    }

    /// Seconds elapsed since the last sale, clamped at zero.
    ///
    /// Non-finite timestamps count as no elapsed time.
    pub fn elapsed_secs(&self) -> f64 {
        let tau = self.now_time_secs - self.start_time_secs;
        if tau.is_finite() { tau.max(0.0) } else { 0.0 }
    }

    /// Same epoch evaluated at a different wall-clock time.
    pub fn at(&self, now_time_secs: f64) -> Self {
        Self {
            now_time_secs,
            ..*self
        }
    }

    /// Epoch following a sale at `sale_price` settled at `sale_time_secs`.
    ///
    /// The floor is re-pinned to the sale price and the anchor moves to the
    /// sale time. `k` carries over.
    pub fn next_epoch(&self, sale_price: f64, sale_time_secs: f64, premium: PremiumSeed) -> Self {
        Self {
            epoch_index: self.epoch_index.saturating_add(1),
            floor: sale_price,
            k: self.k,
            premium,
            start_time_secs: sale_time_secs,
            now_time_secs: sale_time_secs.max(self.now_time_secs),
        }
    }

    /// Check that this epoch defines a curve.
    ///
    /// Returns the first problem found; `Ok(())` means sampling will produce points.
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.epoch_index == 0 {
            return Err(CurveError::NoSales);
        }
        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(CurveError::InvalidDecayConstant(self.k));
        }
        if !self.floor.is_finite() {
            return Err(CurveError::NonFiniteFloor(self.floor));
        }
        if let Some(d) = self.premium_seed() {
            if !d.is_finite() || d <= 0.0 {
                return Err(CurveError::InvalidPremium(d));
            }
        }
        Ok(())
    }
}

/// One sample of the ask curve.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint {
    /// Seconds since epoch start.
    pub tau: f64,
    /// Normalized time: `tau / half_life`, or `tau` in the degenerate branch.
    pub u: f64,
    /// Ask price at `tau`.
    pub price: f64,
}

/// Sampling options for a plotted curve.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CurveOptions {
    /// Explicit right edge of the window in `u` units. Derived from "now" when `None`.
    pub u_max: Option<f64>,
    /// Lower bound for the derived window, in half-lives.
    pub u_max_default: f64,
    /// Window (seconds) used in the degenerate branch when nothing has elapsed.
    pub degenerate_window_secs: f64,
    /// Number of intervals; the curve has `steps + 1` points.
    pub steps: usize,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            u_max: None,
            u_max_default: DEFAULT_U_MAX,
            degenerate_window_secs: DEGENERATE_WINDOW_SECS,
            steps: DEFAULT_STEPS,
        }
    }
}

impl CurveOptions {
    pub fn with_u_max(self, u_max: f64) -> Self {
        Self {
            u_max: Some(u_max),
            ..self
        }
    }

    pub fn with_steps(self, steps: usize) -> Self {
        Self { steps, ..self }
    }
}
