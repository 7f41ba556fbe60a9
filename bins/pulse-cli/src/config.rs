//! CLI configuration loaded from environment variables.
//!
//! Every setting has a default; the environment only overrides. Command-line
//! flags in turn override the environment.

use anyhow::{bail, Context, Result};
use pulse_core::constants::{
    DEFAULT_STEPS, DEFAULT_U_MAX, DEGENERATE_WINDOW_SECS, MAX_STEPS, MAX_TOKEN_DECIMALS,
    TOKEN_DECIMALS,
};
use pulse_core::types::CurveOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct CurveConfig {
    /// Sampling intervals per plotted curve.
    pub steps: usize,
    /// Minimum sampled window, in half-lives.
    pub u_max_default: f64,
    /// Degenerate-branch window (seconds) when nothing has elapsed.
    pub degenerate_window_secs: f64,
    /// Decimals used to descale raw snapshot amounts that do not specify their own.
    pub token_decimals: u32,
    /// Log level filter string (e.g. "info", "pulse_curve=trace").
    pub log_level: String,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            u_max_default: DEFAULT_U_MAX,
            degenerate_window_secs: DEGENERATE_WINDOW_SECS,
            token_decimals: TOKEN_DECIMALS,
            log_level: "info".to_string(),
        }
    }
}

impl CurveConfig {
    /// Load configuration from `PULSE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let steps = match lookup("PULSE_STEPS") {
            Some(v) => v
                .trim()
                .parse()
                .context("PULSE_STEPS must be a positive integer")?,
            None => defaults.steps,
        };
        check_steps(steps)?;

        let u_max_default = match lookup("PULSE_U_MAX_DEFAULT") {
            Some(v) => v
                .trim()
                .parse()
                .context("PULSE_U_MAX_DEFAULT must be a number")?,
            None => defaults.u_max_default,
        };
        check_positive("PULSE_U_MAX_DEFAULT", u_max_default)?;

        let degenerate_window_secs = match lookup("PULSE_DEGENERATE_WINDOW_SECS") {
            Some(v) => v
                .trim()
                .parse()
                .context("PULSE_DEGENERATE_WINDOW_SECS must be a number")?,
            None => defaults.degenerate_window_secs,
        };
        check_positive("PULSE_DEGENERATE_WINDOW_SECS", degenerate_window_secs)?;

        let token_decimals = match lookup("PULSE_TOKEN_DECIMALS") {
            Some(v) => v
                .trim()
                .parse()
                .context("PULSE_TOKEN_DECIMALS must be a non-negative integer")?,
            None => defaults.token_decimals,
        };
        if token_decimals > MAX_TOKEN_DECIMALS {
            bail!("PULSE_TOKEN_DECIMALS must be at most {MAX_TOKEN_DECIMALS}");
        }

        let log_level = lookup("PULSE_LOG").unwrap_or(defaults.log_level);

        Ok(Self {
            steps,
            u_max_default,
            degenerate_window_secs,
            token_decimals,
            log_level,
        })
    }

    /// Sampling options for the engine, with optional per-command overrides.
    pub fn curve_options(&self, steps: Option<usize>, u_max: Option<f64>) -> Result<CurveOptions> {
        let steps = steps.unwrap_or(self.steps);
        check_steps(steps)?;
        if let Some(u) = u_max {
            check_positive("--u-max", u)?;
        }
        Ok(CurveOptions {
            u_max,
            u_max_default: self.u_max_default,
            degenerate_window_secs: self.degenerate_window_secs,
            steps,
        })
    }
}

fn check_steps(steps: usize) -> Result<()> {
    if steps == 0 || steps > MAX_STEPS {
        bail!("steps must be between 1 and {MAX_STEPS}, got {steps}");
    }
    Ok(())
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{name} must be a positive number, got {value}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_env_gives_defaults() {
        let cfg = CurveConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, CurveConfig::default());
    }

    #[test]
    fn default_values() {
        let cfg = CurveConfig::default();
        assert_eq!(cfg.steps, 120);
        assert_eq!(cfg.u_max_default, 10.0);
        assert_eq!(cfg.degenerate_window_secs, 600.0);
        assert_eq!(cfg.token_decimals, 18);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn env_overrides() {
        let cfg = CurveConfig::from_lookup(lookup(&[
            ("PULSE_STEPS", "240"),
            ("PULSE_U_MAX_DEFAULT", "4.5"),
            ("PULSE_DEGENERATE_WINDOW_SECS", " 900 "),
            ("PULSE_TOKEN_DECIMALS", "6"),
            ("PULSE_LOG", "pulse_curve=trace"),
        ]))
        .unwrap();
        assert_eq!(cfg.steps, 240);
        assert_eq!(cfg.u_max_default, 4.5);
        assert_eq!(cfg.degenerate_window_secs, 900.0);
        assert_eq!(cfg.token_decimals, 6);
        assert_eq!(cfg.log_level, "pulse_curve=trace");
    }

    #[test]
    fn rejects_bad_values() {
        for (key, value) in [
            ("PULSE_STEPS", "abc"),
            ("PULSE_STEPS", "0"),
            ("PULSE_STEPS", "1000000"),
            ("PULSE_U_MAX_DEFAULT", "-1"),
            ("PULSE_U_MAX_DEFAULT", "NaN"),
            ("PULSE_DEGENERATE_WINDOW_SECS", "0"),
            ("PULSE_TOKEN_DECIMALS", "39"),
            ("PULSE_TOKEN_DECIMALS", "-2"),
        ] {
            assert!(
                CurveConfig::from_lookup(lookup(&[(key, value)])).is_err(),
                "{key}={value} should be rejected"
            );
        }
    }

    #[test]
    fn curve_options_from_config() {
        let cfg = CurveConfig::default();
        let opts = cfg.curve_options(None, None).unwrap();
        assert_eq!(opts, CurveOptions::default());
    }

    #[test]
    fn curve_options_overrides() {
        let cfg = CurveConfig::default();
        let opts = cfg.curve_options(Some(16), Some(2.0)).unwrap();
        assert_eq!(opts.steps, 16);
        assert_eq!(opts.u_max, Some(2.0));
        assert!(cfg.curve_options(Some(0), None).is_err());
        assert!(cfg.curve_options(None, Some(-1.0)).is_err());
    }
}
