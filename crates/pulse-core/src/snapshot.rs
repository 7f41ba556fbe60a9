//! Auction snapshot normalization.
//!
//! The auction layer reports quantities in whatever shape the chain returned
//! them: JSON numbers in human units, decimal or `0x` hex strings of raw
//! fixed-point integers, or `{ low, high }` u256 limb pairs. This module is
//! the single place those shapes are coerced into the plain `f64` values the
//! curve math consumes.
//!
//! Token amounts (floor, premium rate, genesis prices) are descaled by
//! `10^token_decimals`. Counts and times (`k`, timestamps, intervals) are
//! taken as plain integers.

use std::path::Path;

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::constants::{GENESIS_EPOCH, MAX_TOKEN_DECIMALS, TOKEN_DECIMALS};
use crate::error::{PulseError, SnapshotError};
use crate::types::{EpochParameters, PremiumSeed};

/// `2^128` as a float, the weight of the high limb of a u256.
const U128_SPAN: f64 = 340_282_366_920_938_463_463_374_607_431_768_211_456.0;

/// One u256 limb as reported over JSON.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum RawLimb {
    Number(u64),
    Text(String),
}

impl RawLimb {
    fn to_u128(&self, field: &'static str) -> Result<u128, SnapshotError> {
        match self {
            Self::Number(n) => Ok(u128::from(*n)),
            Self::Text(s) => parse_raw_integer(field, s),
        }
    }
}

/// A numeric quantity in any of the shapes the auction layer emits.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum RawAmount {
    /// Already in human units.
    Number(f64),
    /// Raw fixed-point integer, decimal or `0x` hex.
    Text(String),
    /// Raw fixed-point u256 split into 128-bit limbs.
    Limbs { low: RawLimb, high: RawLimb },
}

impl RawAmount {
    /// Value in human units, descaling raw integers by `10^decimals`.
    pub fn to_human(&self, field: &'static str, decimals: u32) -> Result<f64, SnapshotError> {
        match self {
            Self::Number(x) => Ok(*x),
            Self::Text(s) => descale(parse_raw_integer(field, s)?, decimals),
            Self::Limbs { low, high } => {
                let low = low.to_u128(field)?;
                let high = high.to_u128(field)?;
                if high == 0 {
                    return descale(low, decimals);
                }
                let scale = scale_factor(decimals)?;
                Ok((as_f64(high) * U128_SPAN + as_f64(low)) / as_f64(scale))
            }
        }
    }

    /// Value with no token scaling applied.
    pub fn to_plain(&self, field: &'static str) -> Result<f64, SnapshotError> {
        self.to_human(field, 0)
    }
}

/// Parse a raw unsigned integer given in decimal or `0x`-prefixed hex.
pub fn parse_raw_integer(field: &'static str, s: &str) -> Result<u128, SnapshotError> {
    let s = s.trim();
    let invalid = || SnapshotError::InvalidAmount {
        field,
        value: s.to_string(),
    };

    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if digits.is_empty() {
            return Err(invalid());
        }
        // hex::decode wants whole bytes
        let padded = if digits.len() % 2 == 1 {
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        let bytes = hex::decode(&padded).map_err(|_| invalid())?;
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        let significant = &bytes[start..];
        if significant.len() > 16 {
            return Err(SnapshotError::Overflow(field));
        }
        return Ok(significant
            .iter()
            .fold(0u128, |acc, &b| (acc << 8) | u128::from(b)));
    }

    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    s.parse::<u128>().map_err(|_| SnapshotError::Overflow(field))
}

/// Convert a raw fixed-point integer to human units: `raw / 10^decimals`.
///
/// Whole and fractional parts are converted separately so amounts with many
/// decimals keep their integer part exact up to `f64` precision.
pub fn descale(raw: u128, decimals: u32) -> Result<f64, SnapshotError> {
    let scale = scale_factor(decimals)?;
    let whole = raw / scale;
    let frac = raw % scale;
    Ok(as_f64(whole) + as_f64(frac) / as_f64(scale))
}

fn scale_factor(decimals: u32) -> Result<u128, SnapshotError> {
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(SnapshotError::InvalidDecimals(decimals));
    }
    10u128
        .checked_pow(decimals)
        .ok_or(SnapshotError::InvalidDecimals(decimals))
}

fn as_f64(v: u128) -> f64 {
    v.to_f64().unwrap_or(f64::INFINITY)
}

fn required<'a>(
    value: &'a Option<RawAmount>,
    field: &'static str,
) -> Result<&'a RawAmount, SnapshotError> {
    value.as_ref().ok_or(SnapshotError::MissingField(field))
}

/// Auction state as reported by the snapshot provider.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AuctionSnapshot {
    /// Current epoch ordinal. `0` with `is_genesis = false` means no sale yet.
    #[serde(default)]
    pub epoch_index: u64,
    pub floor: Option<RawAmount>,
    pub k: Option<RawAmount>,
    pub premium_rate: Option<RawAmount>,
    pub prior_interval_secs: Option<RawAmount>,
    pub genesis_price: Option<RawAmount>,
    pub genesis_floor: Option<RawAmount>,
    pub last_sale_time: Option<RawAmount>,
    pub now: Option<RawAmount>,
    pub token_decimals: Option<u32>,
    #[serde(default)]
    pub is_genesis: bool,
}

impl AuctionSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Json(e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SnapshotError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Normalize into curve inputs. `now_fallback` is used when the snapshot
    /// carries no evaluation time.
    ///
    /// Only shape errors are reported here; whether the epoch defines a curve
    /// is left to [`EpochParameters::validate`].
    pub fn to_epoch(&self, now_fallback: f64) -> Result<EpochParameters, SnapshotError> {
        let decimals = self.token_decimals.unwrap_or(TOKEN_DECIMALS);
        if decimals > MAX_TOKEN_DECIMALS {
            return Err(SnapshotError::InvalidDecimals(decimals));
        }

        let mut floor = required(&self.floor, "floor")?.to_human("floor", decimals)?;
        let k = required(&self.k, "k")?.to_plain("k")?;
        let start_time_secs =
            required(&self.last_sale_time, "last_sale_time")?.to_plain("last_sale_time")?;
        let now_time_secs = match &self.now {
            Some(now) => now.to_plain("now")?,
            None => now_fallback,
        };

        let premium = if self.is_genesis {
            let genesis_price =
                required(&self.genesis_price, "genesis_price")?.to_human("genesis_price", decimals)?;
            // the genesis curve starts at genesis_price, so it also pins the floor
            if let Some(v) = &self.genesis_floor {
                floor = v.to_human("genesis_floor", decimals)?;
            }
            let genesis_floor = floor;
            PremiumSeed::Genesis {
                genesis_price,
                genesis_floor,
            }
        } else {
            match (&self.premium_rate, &self.prior_interval_secs) {
                (Some(rate), Some(interval)) => PremiumSeed::Accrued {
                    rate: rate.to_human("premium_rate", decimals)?,
                    prior_interval_secs: interval.to_plain("prior_interval_secs")?,
                },
                (Some(rate), None) => PremiumSeed::Rate(rate.to_human("premium_rate", decimals)?),
                (None, _) => PremiumSeed::Undefined,
            }
        };

        let epoch_index = if self.is_genesis && self.epoch_index == 0 {
            GENESIS_EPOCH
        } else {
            self.epoch_index
        };

        Ok(EpochParameters {
            epoch_index,
            floor,
            k,
            premium,
            start_time_secs,
            now_time_secs,
        })
    }
}

/// Load a snapshot file and return an epoch that is known to define a curve.
pub fn load_validated_epoch(path: &Path, now_fallback: f64) -> Result<EpochParameters, PulseError> {
    let epoch = AuctionSnapshot::from_path(path)?.to_epoch(now_fallback)?;
    epoch.validate()?;
    Ok(epoch)
}
