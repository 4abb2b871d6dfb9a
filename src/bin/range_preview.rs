//! Preview complementary ranges and tick bounds
//!
//! Usage: range_preview [MIN_PRICE MAX_PRICE]
//!
//! Reads the calculator config, mirrors the UP range into its DOWN
//! complement and prints the aligned tick bounds for every configured fee
//! tier in both token orders as JSON.

use anyhow::{bail, Context, Result};
use scalar_lp_provisioner::bin_common::{load_config_from_env, parse_args, ConfigType};
use scalar_lp_provisioner::lp_calculator::application::calculate_complementary_ranges;
use scalar_lp_provisioner::lp_calculator::infrastructure::{init_tracing, CalculatorConfig};
use serde_json::json;
use tracing::info;

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load config first (before logging is initialized)
    let config_path = load_config_from_env(ConfigType::Calculator);
    let config = CalculatorConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    init_tracing(&config.log_level);
    config.log();

    let (min_price, max_price) = match parse_args().as_slice() {
        [] => (config.price_range.min_price, config.price_range.max_price),
        [min, max] => (
            min.parse::<f64>().context("MIN_PRICE must be a number")?,
            max.parse::<f64>().context("MAX_PRICE must be a number")?,
        ),
        _ => bail!("usage: range_preview [MIN_PRICE MAX_PRICE]"),
    };

    let ranges = calculate_complementary_ranges(min_price, max_price)?;
    info!(
        "DOWN [{:.4}, {:.4}] @ {:.4} | UP [{:.4}, {:.4}] @ {:.4}",
        ranges.down.min_price,
        ranges.down.max_price,
        ranges.down.initial_price,
        ranges.up.min_price,
        ranges.up.max_price,
        ranges.up.initial_price
    );

    let calculator = config.range_calculator();
    let mut tiers = Vec::new();
    for (fee, spacing) in calculator.fee_tiers().iter() {
        let mut sides = Vec::new();
        for (side, range) in [("DOWN", &ranges.down), ("UP", &ranges.up)] {
            for is_token0_outcome in [true, false] {
                let bounds = calculator.calculate_tick_bounds(
                    range.min_price,
                    range.max_price,
                    spacing,
                    is_token0_outcome,
                );
                let entry = match bounds {
                    Ok(ticks) => {
                        info!(
                            "fee {} {} outcome={} -> {}",
                            fee,
                            side,
                            if is_token0_outcome { "token0" } else { "token1" },
                            ticks
                        );
                        json!({
                            "side": side,
                            "is_token0_outcome": is_token0_outcome,
                            "tick_lower": ticks.lower,
                            "tick_upper": ticks.upper,
                            "tick_width": ticks.width(),
                        })
                    }
                    Err(e) => json!({
                        "side": side,
                        "is_token0_outcome": is_token0_outcome,
                        "error": e.to_string(),
                    }),
                };
                sides.push(entry);
            }
        }
        tiers.push(json!({
            "fee_tier": fee.0,
            "tick_spacing": spacing,
            "bounds": sides,
        }));
    }

    let output = json!({
        "ranges": ranges,
        "probability_sum": ranges.probability_sum(),
        "fee_tiers": tiers,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
