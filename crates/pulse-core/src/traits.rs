//! Trait interfaces for the Pulse curve.
//!
//! [`AskCurve`] is the contract between the snapshot/rendering layer and the
//! pricing math (pulse-curve implements it).

use crate::types::EpochParameters;

/// Pure computation of half-life and ask price.
///
/// Implementations are stateless: every call depends only on its arguments,
/// so one instance can be shared freely across threads and render passes.
pub trait AskCurve: Send + Sync {
    /// Seconds for the premium to halve: `k / D`, or `+inf` when `d` is
    /// `None` or non-positive.
    fn half_life(&self, k: f64, d: Option<f64>) -> f64;

    /// Ask price `tau` seconds after the epoch started.
    ///
    /// `d = None` selects the degenerate `floor + k / tau` branch.
    fn ask(&self, floor: f64, k: f64, d: Option<f64>, tau: f64) -> f64;

    /// Half-life of an epoch's curve.
    ///
    /// Default implementation delegates to [`half_life`](Self::half_life).
    fn epoch_half_life(&self, epoch: &EpochParameters) -> f64 {
        self.half_life(epoch.k, epoch.premium_seed())
    }

    /// Ask price `tau` seconds into `epoch`.
    ///
    /// Default implementation delegates to [`ask`](Self::ask).
    fn ask_at(&self, epoch: &EpochParameters, tau: f64) -> f64 {
        self.ask(epoch.floor, epoch.k, epoch.premium_seed(), tau)
    }

    /// Ask price at the epoch's own "now".
    fn current_ask(&self, epoch: &EpochParameters) -> f64 {
        self.ask_at(epoch, epoch.elapsed_secs())
    }
}
