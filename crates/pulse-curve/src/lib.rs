//! # pulse-curve — Pulse auction ask-curve engine.
//!
//! The ask price of the auctioned asset decays hyperbolically from
//! `floor + D` towards `floor` after each sale:
//! - **Steady state**: `price(tau) = floor + k / (tau + k / D)`, so the premium
//!   halves every `k / D` seconds.
//! - **Genesis**: the same hyperbola, seeded with `D = genesis_price - genesis_floor`.
//! - **Degenerate**: with no premium rate, `price(tau) = floor + k / tau`.
//!
//! Curves are sampled in normalized time `u = tau / half_life` for plotting,
//! and the sampled series answers interpolated hover queries.
//! Everything here is pure and stateless.

pub mod engine;
pub mod sampler;
pub mod series;

pub use engine::{compute_ask, compute_half_life, PulseCurveEngine};
pub use sampler::{build_curve_points, resolve_window, sample_curve, CurveSampler, CurveWindow};
pub use series::CurveSeries;
