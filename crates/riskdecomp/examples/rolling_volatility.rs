//! Example: Rolling Volatility
//!
//! Simulates a daily return series whose volatility doubles halfway through
//! and tracks it with a 21-day rolling standard deviation, comparing full
//! window recomputation against incremental moment updates.
//!
//! Run with: `cargo run --example rolling_volatility --features full`

use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use riskdecomp::{
    model::{RollingConfig, RollingMode, RollingWindowEngine},
    primitives::{AssetReturnSeries, Date},
    stats::{Skewness, StdDev},
    utils::rolling_frame,
};

/// Rolling window (~1 trading month)
const WINDOW: usize = 21;

/// Days per volatility regime
const REGIME_DAYS: usize = 126;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "=".repeat(60));
    println!("  ROLLING VOLATILITY");
    println!("{}\n", "=".repeat(60));

    let series = simulate_series()?;
    println!("[*] Simulated {} daily returns for {}\n", series.len(), series.asset());

    let annualized = StdDev::annualized(252.0);
    let recompute = RollingWindowEngine::new(WINDOW);
    let incremental = RollingWindowEngine::with_config(RollingConfig {
        window: WINDOW,
        mode: RollingMode::Incremental,
    });

    let full = recompute.compute(&series, &annualized)?;
    let fast = incremental.compute(&series, &annualized)?;

    let max_gap = full
        .points
        .iter()
        .zip(&fast.points)
        .map(|(a, b)| (a.value - b.value).abs())
        .fold(0.0_f64, f64::max);
    println!("[+] {} windows, recompute vs incremental max gap: {max_gap:.2e}\n", full.len());

    println!("Last five windows:");
    println!("{}", rolling_frame(&full)?.tail(Some(5)));

    // Windows entirely inside one regime
    let values = full.values();
    let calm = &values[..=REGIME_DAYS - WINDOW];
    let stressed = &values[REGIME_DAYS..];
    println!(
        "\n[+] Average annualized volatility: calm {:.1}%, stressed {:.1}%",
        100.0 * calm.iter().sum::<f64>() / calm.len() as f64,
        100.0 * stressed.iter().sum::<f64>() / stressed.len() as f64
    );

    let skew = recompute.compute(&series, &Skewness)?;
    if let Some(last) = skew.last() {
        println!("[+] Skewness of the window ending {}: {:.3}", last.date, last.value);
    }

    Ok(())
}

fn simulate_series() -> Result<AssetReturnSeries, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(17);
    let calm = Normal::new(0.0004, 0.007)?;
    let stressed = Normal::new(-0.0002, 0.014)?;

    let start = Date::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;
    let dates: Vec<Date> = start.iter_days().take(2 * REGIME_DAYS).collect();
    let returns = (0..2 * REGIME_DAYS)
        .map(|i| if i < REGIME_DAYS { calm.sample(&mut rng) } else { stressed.sample(&mut rng) })
        .collect();

    Ok(AssetReturnSeries::new("SPY".into(), dates, returns)?)
}
