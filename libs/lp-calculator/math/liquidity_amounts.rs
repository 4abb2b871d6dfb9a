//! Liquidity <-> token amount formulas used when minting positions
//!
//! Same arithmetic and rounding as the AMM's periphery `LiquidityAmounts`
//! library: liquidity is rounded down from amounts and amounts are rounded
//! down from liquidity, so a plan computed here never asks the pool for more
//! than the position manager will accept.

use ethers::types::U256;

use super::full_math::{mul_div, q96};
use crate::domain::errors::{CalculatorError, Result};

fn sorted(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256) -> (U256, U256) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

fn to_u128(liquidity: U256) -> Result<u128> {
    if liquidity > U256::from(u128::MAX) {
        return Err(CalculatorError::validation(format!(
            "liquidity {} overflows uint128",
            liquidity
        )));
    }
    Ok(liquidity.as_u128())
}

/// Liquidity received for `amount0` of token0 between two sqrt prices
///
/// `amount0 * (sqrt(upper) * sqrt(lower)) / (sqrt(upper) - sqrt(lower))`
pub fn get_liquidity_for_amount0(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> Result<u128> {
    let (lower, upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let intermediate = mul_div(lower, upper, q96())?;
    to_u128(mul_div(amount0, intermediate, upper - lower)?)
}

/// Liquidity received for `amount1` of token1 between two sqrt prices
///
/// `amount1 / (sqrt(upper) - sqrt(lower))`
pub fn get_liquidity_for_amount1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: U256,
) -> Result<u128> {
    let (lower, upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    to_u128(mul_div(amount1, q96(), upper - lower)?)
}

/// Maximum liquidity the given amounts can mint at the current price
pub fn get_liquidity_for_amounts(
    sqrt_price_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
    amount1: U256,
) -> Result<u128> {
    let (lower, upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_price_x96 <= lower {
        get_liquidity_for_amount0(lower, upper, amount0)
    } else if sqrt_price_x96 < upper {
        let liquidity0 = get_liquidity_for_amount0(sqrt_price_x96, upper, amount0)?;
        let liquidity1 = get_liquidity_for_amount1(lower, sqrt_price_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        get_liquidity_for_amount1(lower, upper, amount1)
    }
}

/// Token0 owed for `liquidity` between two sqrt prices
pub fn get_amount0_for_liquidity(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
) -> Result<U256> {
    let (lower, upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if lower.is_zero() {
        return Err(CalculatorError::range("sqrt price must be non-zero"));
    }
    Ok(mul_div(U256::from(liquidity) << 96, upper - lower, upper)? / lower)
}

/// Token1 owed for `liquidity` between two sqrt prices
pub fn get_amount1_for_liquidity(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
) -> Result<U256> {
    let (lower, upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    mul_div(U256::from(liquidity), upper - lower, q96())
}

/// Token amounts backing `liquidity` at the current price
pub fn get_amounts_for_liquidity(
    sqrt_price_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
) -> Result<(U256, U256)> {
    let (lower, upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);

    if sqrt_price_x96 <= lower {
        Ok((get_amount0_for_liquidity(lower, upper, liquidity)?, U256::zero()))
    } else if sqrt_price_x96 < upper {
        Ok((
            get_amount0_for_liquidity(sqrt_price_x96, upper, liquidity)?,
            get_amount1_for_liquidity(lower, sqrt_price_x96, liquidity)?,
        ))
    } else {
        Ok((U256::zero(), get_amount1_for_liquidity(lower, upper, liquidity)?))
    }
}
