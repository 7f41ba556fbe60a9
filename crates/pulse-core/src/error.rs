//! Error types for the Pulse curve.
use thiserror::Error;

/// Why an epoch cannot produce a curve.
///
/// The math itself never fails; these are the states a caller detects before
/// sampling and maps to a display label.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("invalid decay constant: {0}")] InvalidDecayConstant(f64),
    #[error("non-finite floor: {0}")] NonFiniteFloor(f64),
    #[error("invalid premium: {0}")] InvalidPremium(f64),
    #[error("no sales yet")] NoSales,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("missing field: {0}")] MissingField(&'static str),
    #[error("invalid amount for {field}: {value}")] InvalidAmount { field: &'static str, value: String },
    #[error("amount overflow for {0}")] Overflow(&'static str),
    #[error("unsupported token decimals: {0}")] InvalidDecimals(u32),
    #[error("json: {0}")] Json(String),
    #[error("io: {0}")] Io(String),
}

#[derive(Error, Debug)]
pub enum PulseError {
    #[error(transparent)] Curve(#[from] CurveError),
    #[error(transparent)] Snapshot(#[from] SnapshotError),
}
