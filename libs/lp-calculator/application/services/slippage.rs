//! Slippage minimums for mint calls

use ethers::types::U256;

use crate::domain::errors::{CalculatorError, Result};
use crate::domain::models::MinAmounts;
use crate::math::full_math::mul_div;

/// Tolerance resolution: 1e18 (WAD)
pub const WAD: u64 = 1_000_000_000_000_000_000;

/// Minimum acceptable amounts for a tolerance in `[0, 1)`
///
/// `min = amount * (1e18 - tolerance_wad) / 1e18`, truncated.
pub fn calculate_min_amounts(amount0: U256, amount1: U256, slippage_tolerance: f64) -> Result<MinAmounts> {
    let keep_wad = U256::from(WAD - tolerance_wad(slippage_tolerance)?);
    let denominator = U256::from(WAD);

    Ok(MinAmounts {
        amount0_min: mul_div(amount0, keep_wad, denominator)?,
        amount1_min: mul_div(amount1, keep_wad, denominator)?,
    })
}

/// Tolerance scaled to 1e18, truncated toward zero
pub fn tolerance_wad(slippage_tolerance: f64) -> Result<u64> {
    if !(0.0..1.0).contains(&slippage_tolerance) {
        return Err(CalculatorError::validation(format!(
            "slippage tolerance must be in [0, 1), got {}",
            slippage_tolerance
        )));
    }
    let wad = (slippage_tolerance * WAD as f64).floor() as u64;
    // the f64 product can round up to a full 1e18 just below 1.0
    Ok(wad.min(WAD - 1))
}
