//! pulse-cli — Command-line front end for the Pulse ask curve.
//!
//! Evaluates half-lives and ask prices directly from parameters, and samples
//! or queries the curve of an auction snapshot file (JSON).

mod config;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pulse_core::error::CurveError;
use pulse_core::snapshot::AuctionSnapshot;
use pulse_core::traits::AskCurve;
use pulse_core::types::EpochParameters;
use pulse_curve::{CurveSeries, PulseCurveEngine};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::CurveConfig;

/// Pulse auction curve inspector.
#[derive(Parser)]
#[command(name = "pulse-cli")]
#[command(version, about = "Inspect the Pulse auction ask curve.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Half-life of the premium, in seconds.
    HalfLife(HalfLifeArgs),
    /// Ask price at a given elapsed time.
    Ask(AskArgs),
    /// Sample the curve of a snapshot.
    Curve(CurveArgs),
    /// Interpolated hover query on the curve of a snapshot.
    Query(QueryArgs),
    /// Display state of a snapshot's curve.
    Status(StatusArgs),
}

#[derive(Args)]
struct HalfLifeArgs {
    /// Decay constant.
    #[arg(long)]
    k: f64,

    /// Initial premium. Omit for the degenerate branch.
    #[arg(long)]
    d: Option<f64>,
}

#[derive(Args)]
struct AskArgs {
    /// Floor price, in token units.
    #[arg(long)]
    floor: f64,

    /// Decay constant.
    #[arg(long)]
    k: f64,

    /// Initial premium. Omit for the degenerate branch.
    #[arg(long)]
    d: Option<f64>,

    /// Seconds since the epoch started.
    #[arg(long)]
    tau: f64,
}

#[derive(Args)]
struct CurveArgs {
    /// Path to the auction snapshot (JSON).
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Sampling intervals (default: PULSE_STEPS or 120).
    #[arg(long)]
    steps: Option<usize>,

    /// Right edge of the window, in half-lives (seconds for the degenerate branch).
    #[arg(long)]
    u_max: Option<f64>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct QueryArgs {
    /// Path to the auction snapshot (JSON).
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Normalized time to query.
    #[arg(long, conflicts_with = "tau", required_unless_present = "tau")]
    u: Option<f64>,

    /// Elapsed seconds to query.
    #[arg(long)]
    tau: Option<f64>,

    /// Sampling intervals (default: PULSE_STEPS or 120).
    #[arg(long)]
    steps: Option<usize>,

    /// Right edge of the window, in half-lives (seconds for the degenerate branch).
    #[arg(long)]
    u_max: Option<f64>,
}

#[derive(Args)]
struct StatusArgs {
    /// Path to the auction snapshot (JSON).
    #[arg(short, long)]
    snapshot: PathBuf,
}

/// Machine-readable output of the `curve` command.
#[derive(Serialize)]
struct CurveReport<'a> {
    epoch_index: u64,
    status: String,
    half_life: f64,
    elapsed_secs: f64,
    current_ask: Option<f64>,
    curve: &'a CurveSeries,
}

fn main() -> Result<()> {
    let config = CurveConfig::from_env().context("Invalid PULSE_* configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = PulseCurveEngine::new();

    match cli.command {
        Commands::HalfLife(args) => half_life(&engine, args),
        Commands::Ask(args) => ask(&engine, args),
        Commands::Curve(args) => curve(&engine, &config, args),
        Commands::Query(args) => query(&engine, &config, args),
        Commands::Status(args) => status(&config, args),
    }
}

fn half_life(engine: &PulseCurveEngine, args: HalfLifeArgs) -> Result<()> {
    println!("{}", engine.half_life(args.k, args.d));
    Ok(())
}

fn ask(engine: &PulseCurveEngine, args: AskArgs) -> Result<()> {
    println!("{}", engine.ask(args.floor, args.k, args.d, args.tau));
    Ok(())
}

/// Sample and print the curve of a snapshot.
fn curve(engine: &PulseCurveEngine, config: &CurveConfig, args: CurveArgs) -> Result<()> {
    let epoch = load_epoch(&args.snapshot, config)?;
    let options = config.curve_options(args.steps, args.u_max)?;
    let series = engine.curve(&epoch, &options);
    let label = status_label(&epoch);

    info!(
        epoch = epoch.epoch_index,
        points = series.len(),
        status = %label,
        "Sampled curve"
    );

    let report = CurveReport {
        epoch_index: epoch.epoch_index,
        current_ask: epoch.validate().ok().map(|_| engine.current_ask(&epoch)),
        status: label,
        half_life: engine.epoch_half_life(&epoch),
        elapsed_secs: epoch.elapsed_secs(),
        curve: &series,
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{json}");
        return Ok(());
    }

    println!("Epoch:      {}", report.epoch_index);
    println!("Status:     {}", report.status);
    println!("Half-life:  {}", report.half_life);
    println!("Elapsed:    {:.3}s", report.elapsed_secs);
    if let Some(p) = report.current_ask {
        println!("Ask now:    {p:.9}");
    }
    if series.is_empty() {
        return Ok(());
    }
    println!();
    println!("{:>12} {:>16} {:>20}", "u", "tau", "price");
    for p in &series {
        println!("{:>12.6} {:>16.3} {:>20.9}", p.u, p.tau, p.price);
    }
    Ok(())
}

/// Interpolated lookup on the sampled curve, alongside the exact price.
fn query(engine: &PulseCurveEngine, config: &CurveConfig, args: QueryArgs) -> Result<()> {
    let epoch = load_epoch(&args.snapshot, config)?;
    if let Err(e) = epoch.validate() {
        bail!("No curve for snapshot: {}", label_for(&e));
    }

    let options = config.curve_options(args.steps, args.u_max)?;
    let series = engine.curve(&epoch, &options);
    let point = match (args.u, args.tau) {
        (Some(u), _) => series.point_at_u(u),
        (None, Some(tau)) => series.point_at_tau(tau),
        (None, None) => bail!("Either --u or --tau is required"),
    };
    let Some(point) = point else {
        bail!("Curve has no samples");
    };
    debug!(u = point.u, tau = point.tau, "Hover query");

    println!("u:      {:.6}", point.u);
    println!("tau:    {:.3}s", point.tau);
    println!("price:  {:.9}", point.price);
    println!("exact:  {:.9}", engine.ask_at(&epoch, point.tau));
    Ok(())
}

fn status(config: &CurveConfig, args: StatusArgs) -> Result<()> {
    let epoch = load_epoch(&args.snapshot, config)?;
    println!("{}", status_label(&epoch));
    Ok(())
}

/// Load and normalize a snapshot, filling in the configured token decimals
/// and the wall clock where the snapshot leaves them out.
fn load_epoch(path: &Path, config: &CurveConfig) -> Result<EpochParameters> {
    let mut snapshot = AuctionSnapshot::from_path(path)
        .with_context(|| format!("Failed to load snapshot: {}", path.display()))?;
    snapshot.token_decimals.get_or_insert(config.token_decimals);
    snapshot
        .to_epoch(wall_clock_secs())
        .with_context(|| format!("Malformed snapshot: {}", path.display()))
}

fn wall_clock_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// User-facing state of an epoch's curve.
fn status_label(epoch: &EpochParameters) -> String {
    match epoch.validate() {
        Ok(()) => "ready".to_string(),
        Err(e) => label_for(&e),
    }
}

fn label_for(e: &CurveError) -> String {
    match e {
        CurveError::NoSales => "no sales yet".to_string(),
        other => format!("invalid configuration: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pulse_core::types::PremiumSeed;

    fn epoch() -> EpochParameters {
        EpochParameters {
            epoch_index: 3,
            floor: 10.0,
            k: 1000.0,
            premium: PremiumSeed::Rate(1.0),
            start_time_secs: 0.0,
            now_time_secs: 0.0,
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ask() {
        let cli = Cli::try_parse_from([
            "pulse-cli", "ask", "--floor", "10", "--k", "1000", "--d", "1", "--tau", "1000",
        ])
        .unwrap();
        match cli.command {
            Commands::Ask(args) => {
                assert_eq!(args.floor, 10.0);
                assert_eq!(args.d, Some(1.0));
                assert_eq!(args.tau, 1000.0);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn query_requires_u_or_tau() {
        assert!(Cli::try_parse_from(["pulse-cli", "query", "-s", "x.json"]).is_err());
        assert!(
            Cli::try_parse_from(["pulse-cli", "query", "-s", "x.json", "--u", "1", "--tau", "2"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["pulse-cli", "query", "-s", "x.json", "--tau", "2"]).is_ok());
    }

    #[test]
    fn status_labels() {
        assert_eq!(status_label(&epoch()), "ready");
        let none = EpochParameters {
            epoch_index: 0,
            ..epoch()
        };
        assert_eq!(status_label(&none), "no sales yet");
        let bad = EpochParameters { k: 0.0, ..epoch() };
        assert!(status_label(&bad).starts_with("invalid configuration"));
    }

    #[test]
    fn report_serializes_infinite_half_life_as_null() {
        let series = CurveSeries::empty();
        let report = CurveReport {
            epoch_index: 0,
            status: "no sales yet".into(),
            half_life: f64::INFINITY,
            elapsed_secs: 0.0,
            current_ask: None,
            curve: &series,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["half_life"].is_null());
        assert!(json["curve"]["points"].as_array().unwrap().is_empty());
    }

    #[test]
    fn load_epoch_applies_config_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        std::fs::write(
            &path,
            r#"{"epoch_index": 2, "floor": "2500000", "k": 100, "last_sale_time": 0, "now": 10}"#,
        )
        .unwrap();
        let config = CurveConfig {
            token_decimals: 6,
            ..CurveConfig::default()
        };
        let epoch = load_epoch(&path, &config).unwrap();
        assert_eq!(epoch.floor, 2.5);
        assert_eq!(epoch.now_time_secs, 10.0);
    }
}
