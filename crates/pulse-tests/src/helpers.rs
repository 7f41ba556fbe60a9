//! Shared fixtures for integration tests.

use std::path::PathBuf;

use pulse_core::types::{EpochParameters, PremiumSeed};

/// Unix time the fixtures' epochs start at.
pub const T0: f64 = 1_700_000_000.0;

/// Decay constant of the degenerate fixture: `k / 600 = 2666.67`.
pub const DEGENERATE_K: f64 = 1_600_000.0;

/// Genesis epoch: floor 900, genesis price 1000, k 1000 (half-life 10s).
pub fn genesis_epoch() -> EpochParameters {
    EpochParameters::genesis(900.0, 1000.0, 1000.0, T0)
}

/// Steady-state epoch: floor 10, D 1, k 1000 (half-life 1000s).
pub fn steady_epoch() -> EpochParameters {
    EpochParameters {
        epoch_index: 5,
        floor: 10.0,
        k: 1000.0,
        premium: PremiumSeed::Rate(1.0),
        start_time_secs: T0,
        now_time_secs: T0,
    }
}

/// Epoch 2 without a premium rate, evaluated ten minutes after the sale.
pub fn degenerate_epoch() -> EpochParameters {
    EpochParameters {
        epoch_index: 2,
        floor: 0.0,
        k: DEGENERATE_K,
        premium: PremiumSeed::Undefined,
        start_time_secs: T0,
        now_time_secs: T0 + 600.0,
    }
}

/// Assert two floats agree within `tol`.
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}

/// Write a snapshot JSON document into `dir` and return its path.
pub fn write_snapshot(dir: &tempfile::TempDir, name: &str, json: &serde_json::Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, json.to_string()).unwrap();
    path
}
