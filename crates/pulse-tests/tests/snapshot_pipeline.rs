//! Snapshot files flowing through normalization into sampled curves.
//!
//! Each test writes a snapshot the way the auction layer reports it (raw
//! fixed-point strings, hex, u256 limbs), loads it from disk and checks the
//! resulting curve.

use pulse_core::error::{CurveError, PulseError, SnapshotError};
use pulse_core::snapshot::{load_validated_epoch, AuctionSnapshot};
use pulse_core::traits::AskCurve;
use pulse_core::types::{CurveOptions, PremiumSeed};
use pulse_curve::{build_curve_points, PulseCurveEngine};
use pulse_tests::helpers::*;
use serde_json::json;

#[test]
fn genesis_snapshot_with_raw_amounts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        "genesis.json",
        &json!({
            "is_genesis": true,
            "floor": "900000000000000000000",
            "genesis_price": { "low": "0x3635c9adc5dea00000", "high": 0 },
            "k": "1000",
            "last_sale_time": T0,
            "now": T0 + 10.0,
        }),
    );

    let epoch = load_validated_epoch(&path, 0.0).unwrap();
    assert_eq!(epoch.floor, 900.0);
    assert_eq!(epoch.premium_seed(), Some(100.0));

    let engine = PulseCurveEngine::new();
    assert_eq!(engine.epoch_half_life(&epoch), 10.0);
    assert_close(engine.current_ask(&epoch), 950.0, 1e-9);
}

#[test]
fn steady_snapshot_seeds_premium_from_prior_interval() {
    let dir = tempfile::tempdir().unwrap();
    // 0.01 token/s accrued over the 100s between the last two sales
    let path = write_snapshot(
        &dir,
        "steady.json",
        &json!({
            "epoch_index": 9,
            "floor": "0x8ac7230489e80000",
            "premium_rate": "10000000000000000",
            "prior_interval_secs": 100,
            "k": 1000,
            "last_sale_time": "0x6553f100",
            "now": 1_700_001_000u64,
        }),
    );

    let epoch = load_validated_epoch(&path, 0.0).unwrap();
    assert_eq!(epoch.floor, 10.0);
    assert_eq!(epoch.start_time_secs, 1_700_000_000.0);
    assert!(matches!(epoch.premium, PremiumSeed::Accrued { .. }));
    assert_close(epoch.premium_seed().unwrap(), 1.0, 1e-12);

    // one half-life has passed
    assert_close(PulseCurveEngine::new().current_ask(&epoch), 10.5, 1e-9);
}

#[test]
fn degenerate_snapshot_curve() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        "epoch2.json",
        &json!({
            "epoch_index": 2,
            "floor": 0,
            "k": DEGENERATE_K,
            "last_sale_time": T0,
            "now": T0 + 600.0,
        }),
    );

    let epoch = load_validated_epoch(&path, 0.0).unwrap();
    let series = build_curve_points(&epoch, &CurveOptions::default());
    assert_eq!(series.len(), 121);
    assert_close(series.last().unwrap().price, 2666.67, 0.01);
}

#[test]
fn snapshot_without_now_uses_fallback() {
    let snap = AuctionSnapshot::from_json(
        &json!({ "epoch_index": 3, "floor": 10, "k": 1000, "premium_rate": 1, "last_sale_time": T0 })
            .to_string(),
    )
    .unwrap();
    let epoch = snap.to_epoch(T0 + 250.0).unwrap();
    assert_eq!(epoch.elapsed_secs(), 250.0);
}

#[test]
fn no_sales_snapshot_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        "empty.json",
        &json!({ "floor": 0, "k": 1000, "last_sale_time": 0 }),
    );
    let err = load_validated_epoch(&path, 0.0).unwrap_err();
    assert!(matches!(err, PulseError::Curve(CurveError::NoSales)));
}

#[test]
fn malformed_amount_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_snapshot(
        &dir,
        "bad.json",
        &json!({ "epoch_index": 2, "floor": "12.5", "k": 1000, "last_sale_time": 0 }),
    );
    let err = load_validated_epoch(&path, 0.0).unwrap_err();
    assert!(matches!(
        err,
        PulseError::Snapshot(SnapshotError::InvalidAmount { field: "floor", .. })
    ));
}

#[test]
fn invalid_snapshot_still_samples_to_empty_curve() {
    // the shape is fine, the curve is not: builder returns nothing instead of failing
    let snap = AuctionSnapshot::from_json(
        &json!({ "epoch_index": 4, "floor": 10, "k": 1000, "premium_rate": 0, "last_sale_time": 0 })
            .to_string(),
    )
    .unwrap();
    let epoch = snap.to_epoch(0.0).unwrap();
    assert_eq!(epoch.validate(), Err(CurveError::InvalidPremium(0.0)));
    assert!(build_curve_points(&epoch, &CurveOptions::default()).is_empty());
}
