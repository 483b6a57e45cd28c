//! Volatility contribution analysis CLI tool.
//!
//! Decomposes the volatility of a weighted portfolio into per-asset
//! contributions and optionally computes a rolling statistic for one asset.
//!
//! Usage: `cargo run --bin analyze --features cli -- --returns FILE [OPTIONS]`
//! Example: `analyze --returns returns.csv --weight SPY=0.6 --weight TLT=0.4 --rolling SPY`
//!
//! The CSV holds a `date` column followed by one column of periodic returns
//! per asset.

use std::{collections::HashMap, path::PathBuf};

use clap::Parser;
use polars::prelude::*;
use riskdecomp::{
    model::{RiskPipeline, RollingConfig, RollingMode, RollingWindowEngine},
    primitives::{AssetId, PortfolioWeights, ReturnsTable},
    stats,
    utils::{contribution_frame, returns_table_from_wide, rolling_frame},
};

/// Portfolio volatility contribution analysis
#[derive(Parser, Debug)]
#[command(name = "analyze")]
#[command(version, about, long_about = None)]
struct Args {
    /// Wide returns CSV: a date column followed by one column per asset
    #[arg(short, long)]
    returns: PathBuf,

    /// Name of the date column
    #[arg(long, default_value = "date")]
    date_column: String,

    /// Portfolio weight as SYMBOL=WEIGHT; repeat per asset. Unlisted assets
    /// get zero weight. Without any, every asset is weighted equally.
    #[arg(short, long = "weight", value_parser = parse_weight)]
    weights: Vec<(String, f64)>,

    /// Compute a rolling statistic for this asset
    #[arg(long)]
    rolling: Option<String>,

    /// Rolling window length in observations
    #[arg(short = 'k', long, default_value_t = 20)]
    window: usize,

    /// Rolling statistic: std_dev, variance, mean or skewness
    #[arg(short, long, default_value = "std_dev")]
    statistic: String,

    /// Update rolling moments incrementally instead of recomputing windows
    #[arg(long)]
    incremental: bool,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_weight(s: &str) -> Result<(String, f64), String> {
    let (symbol, weight) =
        s.split_once('=').ok_or_else(|| format!("expected SYMBOL=WEIGHT, got '{s}'"))?;
    let weight: f64 = weight.trim().parse().map_err(|e| format!("invalid weight '{weight}': {e}"))?;
    if !weight.is_finite() {
        return Err(format!("weight for {symbol} is not finite"));
    }
    Ok((symbol.trim().to_string(), weight))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(e) = run(&args) {
        tracing::error!(error = %e, "analysis failed");
        return Err(e);
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_returns(args)?;
    tracing::info!(
        n_observations = table.n_observations(),
        n_assets = table.n_assets(),
        "loaded returns"
    );

    let weights = build_weights(&table, &args.weights)?;
    let report = RiskPipeline::new().run(&table, &weights)?;

    let rolling = match &args.rolling {
        Some(symbol) => {
            let series = table
                .series(&AssetId::new(symbol.as_str()))
                .ok_or_else(|| format!("asset {symbol} not found in returns"))?;
            let statistic = stats::by_name(&args.statistic)
                .ok_or_else(|| format!("unknown statistic '{}'", args.statistic))?;
            let mode =
                if args.incremental { RollingMode::Incremental } else { RollingMode::Recompute };
            let engine =
                RollingWindowEngine::with_config(RollingConfig { window: args.window, mode });
            Some(engine.compute(&series, statistic.as_ref())?)
        }
        None => None,
    };

    if args.json {
        let output = serde_json::json!({ "contributions": report, "rolling": rolling });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Portfolio volatility: {:.6}", report.total_volatility);
    println!("{}", contribution_frame(&report)?);
    if let Some(top) = report.largest_contributor() {
        println!("Largest contributor: {} ({:.2}%)", top.asset, 100.0 * top.percentage);
    }

    if let Some(rolling) = rolling {
        println!(
            "\nRolling {} for {} (window {})",
            rolling.statistic, rolling.asset, rolling.window
        );
        if rolling.is_empty() {
            println!("Series is shorter than the window; no values.");
        } else {
            println!("{}", rolling_frame(&rolling)?);
        }
    }

    Ok(())
}

fn load_returns(args: &Args) -> Result<ReturnsTable, Box<dyn std::error::Error>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(args.returns.clone()))?
        .finish()?;
    tracing::debug!(shape = ?df.shape(), path = %args.returns.display(), "read csv");

    Ok(returns_table_from_wide(&df, &args.date_column)?)
}

fn build_weights(
    table: &ReturnsTable,
    given: &[(String, f64)],
) -> Result<PortfolioWeights, Box<dyn std::error::Error>> {
    if given.is_empty() {
        tracing::info!("no weights given, using equal weights");
        return Ok(PortfolioWeights::equal(table.assets().to_vec()));
    }

    let mut by_symbol: HashMap<&str, f64> = HashMap::new();
    for (symbol, weight) in given {
        if table.asset_index(&AssetId::new(symbol.as_str())).is_none() {
            return Err(format!("weight given for unknown asset {symbol}").into());
        }
        if by_symbol.insert(symbol.as_str(), *weight).is_some() {
            return Err(format!("weight given twice for {symbol}").into());
        }
    }

    // Weights follow the table's column order
    let weights =
        table.assets().iter().map(|a| by_symbol.get(a.as_str()).copied().unwrap_or(0.0)).collect();
    Ok(PortfolioWeights::new(table.assets().to_vec(), weights)?)
}
