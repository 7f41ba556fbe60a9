//! Curve constants. Prices are in human token units, times in seconds.

/// Floor applied wherever a denominator could vanish.
pub const EPSILON: f64 = 1e-9;

/// Default number of sampling intervals for a plotted curve (`steps + 1` points).
pub const DEFAULT_STEPS: usize = 120;

/// Minimum sampled window, in half-lives, when the caller does not supply one.
pub const DEFAULT_U_MAX: f64 = 10.0;

/// Sampled window (seconds) for the degenerate branch when no time has elapsed.
pub const DEGENERATE_WINDOW_SECS: f64 = 600.0;

/// Decimals of the quote token. On-chain amounts are `human * 10^TOKEN_DECIMALS`.
pub const TOKEN_DECIMALS: u32 = 18;

/// Largest decimals value whose scale factor `10^decimals` fits in a `u128`.
pub const MAX_TOKEN_DECIMALS: u32 = 38;

/// Epoch index of the genesis epoch (before any sale has settled).
pub const GENESIS_EPOCH: u64 = 1;

/// Upper bound on sampling intervals per curve.
pub const MAX_STEPS: usize = 100_000;
