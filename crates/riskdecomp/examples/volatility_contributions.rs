//! Example: Volatility Contribution Decomposition
//!
//! Simulates two years of daily returns for a small multi-asset portfolio,
//! estimates the sample covariance and splits portfolio volatility into
//! marginal, component and percentage contributions.
//!
//! Run with: `cargo run --example volatility_contributions --features full`

use riskdecomp::{model::RiskPipeline, primitives::PortfolioWeights, utils::contribution_frame};
use simulate::simulate_returns;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Trading days of simulated history (~2 years)
const TRADING_DAYS: usize = 504;

/// Annualization factor for daily volatility
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Portfolio: (symbol, weight, daily drift, daily volatility, market beta)
const PORTFOLIO: &[(&str, f64, f64, f64, f64)] = &[
    ("SPY", 0.40, 0.0004, 0.004, 1.0),
    ("EFA", 0.15, 0.0003, 0.005, 0.9),
    ("TLT", 0.25, 0.0001, 0.008, -0.3),
    ("GLD", 0.10, 0.0002, 0.009, 0.1),
    ("CASH", 0.10, 0.0001, 0.0, 0.0),
];

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "=".repeat(70));
    println!("  VOLATILITY CONTRIBUTIONS");
    println!("{}\n", "=".repeat(70));

    let table = simulate_returns(PORTFOLIO, TRADING_DAYS, 2024)?;
    println!(
        "[*] Simulated {} days for {} assets ({} to {})\n",
        table.n_observations(),
        table.n_assets(),
        table.dates()[0],
        table.dates()[table.n_observations() - 1]
    );

    let weights = PortfolioWeights::from_pairs(PORTFOLIO.iter().map(|p| (p.0, p.1)))?;
    let report = RiskPipeline::new().run(&table, &weights)?;

    println!(
        "[+] Portfolio volatility: {:.4}% daily, {:.2}% annualized\n",
        100.0 * report.total_volatility,
        100.0 * report.total_volatility * TRADING_DAYS_PER_YEAR.sqrt()
    );
    println!("{}\n", contribution_frame(&report)?);

    println!("{:<8} {:>10} {:>14}", "Asset", "Weight", "Risk share");
    println!("{}", "-".repeat(34));
    for c in report.iter() {
        println!("{:<8} {:>9.1}% {:>13.1}%", c.asset, 100.0 * c.weight, 100.0 * c.percentage);
    }
    println!("{}", "-".repeat(34));
    println!(
        "{:<8} {:>9.1}% {:>13.1}%",
        "Total",
        100.0 * weights.total(),
        100.0 * report.percentage_sum()
    );

    if let Some(top) = report.largest_contributor() {
        println!(
            "\n[+] {} carries {:.1}% of the risk on {:.1}% of the capital",
            top.asset,
            100.0 * top.percentage,
            100.0 * top.weight
        );
    }

    println!("\n[*] Report as JSON:\n{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

// ============================================================================
// SIMULATION
// ============================================================================

mod simulate {
    use rand::{SeedableRng, rngs::StdRng};
    use rand_distr::{Distribution, Normal};
    use riskdecomp::primitives::{AssetId, Date, ReturnsTable};

    /// One-factor simulation: each asset loads `beta` on a common market
    /// shock plus its own idiosyncratic noise.
    pub(crate) fn simulate_returns(
        portfolio: &[(&str, f64, f64, f64, f64)],
        n_days: usize,
        seed: u64,
    ) -> Result<ReturnsTable, Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let market = Normal::new(0.0, 0.008)?;
        let unit = Normal::new(0.0, 1.0)?;

        let start = Date::from_ymd_opt(2023, 1, 2).ok_or("invalid start date")?;
        let dates: Vec<Date> = start.iter_days().take(n_days).collect();
        let shocks: Vec<f64> = (0..n_days).map(|_| market.sample(&mut rng)).collect();

        let columns = portfolio
            .iter()
            .map(|&(symbol, _, drift, vol, beta)| {
                let values = shocks
                    .iter()
                    .map(|m| drift + beta * m + vol * unit.sample(&mut rng))
                    .collect();
                (AssetId::new(symbol), values)
            })
            .collect();

        Ok(ReturnsTable::from_columns(dates, columns)?)
    }
}
