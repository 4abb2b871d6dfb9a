//! Price <-> tick conversion
//!
//! Prices arrive as `f64` probabilities. Instead of `ln(price) / ln(1.0001)`
//! the price is decomposed into its exact binary mantissa and exponent,
//! lifted to a Q64.96 square root with integer arithmetic, and resolved
//! against the on-chain tick ladder. The resulting tick is the one the AMM
//! itself would report for that sqrt price.

use ethers::types::{U256, U512};

use super::full_math::{narrow, q96, sqrt_u512, u256_to_f64};
use super::tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio};
use crate::domain::errors::{CalculatorError, Result};

/// Largest left shift that keeps `mantissa * 2^shift` inside 512 bits
const MAX_X192_SHIFT: i32 = 400;

/// Convert a price (token1 per token0, raw units) to sqrt(price) * 2^96
pub fn sqrt_price_x96_from_price(price: f64) -> Result<U256> {
    if !price.is_finite() || price <= 0.0 {
        return Err(CalculatorError::validation(format!(
            "price must be finite and positive, got {}",
            price
        )));
    }

    let (mantissa, exponent) = decompose(price);
    let shift = exponent + 192;
    if shift > MAX_X192_SHIFT {
        return Err(CalculatorError::range(format!("price {} above the tick ladder", price)));
    }

    let price_x192 = if shift >= 0 {
        U512::from(mantissa) << shift as usize
    } else if shift <= -64 {
        U512::zero()
    } else {
        U512::from(mantissa) >> (-shift) as usize
    };

    narrow(sqrt_u512(price_x192))
}

/// `floor(log_1.0001(price))`
pub fn price_to_tick(price: f64) -> Result<i32> {
    get_tick_at_sqrt_ratio(sqrt_price_x96_from_price(price)?)
}

/// `1.0001^tick`, derived from the exact sqrt ratio
pub fn tick_to_price(tick: i32) -> Result<f64> {
    Ok(price_from_sqrt_price_x96(get_sqrt_ratio_at_tick(tick)?))
}

/// Square a Q64.96 sqrt price back into an `f64` price
pub fn price_from_sqrt_price_x96(sqrt_price_x96: U256) -> f64 {
    let sqrt_price = u256_to_f64(sqrt_price_x96) / u256_to_f64(q96());
    sqrt_price * sqrt_price
}

/// Scale a human price (whole token1 per whole token0) into raw units
pub fn to_raw_price(price: f64, decimals0: u8, decimals1: u8) -> f64 {
    price * 10f64.powi(decimals1 as i32 - decimals0 as i32)
}

/// Inverse of [`to_raw_price`]
pub fn from_raw_price(raw_price: f64, decimals0: u8, decimals1: u8) -> f64 {
    raw_price * 10f64.powi(decimals0 as i32 - decimals1 as i32)
}

/// Exact `mantissa * 2^exponent` form of a positive finite `f64`
fn decompose(value: f64) -> (u64, i32) {
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);

    if exponent == 0 {
        // subnormal
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exponent - 1075)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::{MAX_TICK, MIN_TICK};

    #[test]
    fn test_price_to_tick_known_values() {
        let cases = [
            (0.05, -29959),
            (0.5, -6932),
            (0.95, -513),
            (0.01, -46055),
            (1.0, 0),
            (1.0 / 0.95, 512),
            (20.0, 29958),
        ];
        for (price, expected) in cases {
            assert_eq!(price_to_tick(price).unwrap(), expected, "price {}", price);
        }
    }

    #[test]
    fn test_price_to_tick_matches_log_formula() {
        for price in [0.001f64, 0.123, 0.333, 0.75, 0.999, 2.5, 1234.5] {
            let expected = (price.ln() / 1.0001f64.ln()).floor() as i32;
            let tick = price_to_tick(price).unwrap();
            assert!((tick - expected).abs() <= 1, "price {} tick {} vs {}", price, tick, expected);
        }
    }

    #[test]
    fn test_sqrt_price_of_one_is_q96() {
        assert_eq!(sqrt_price_x96_from_price(1.0).unwrap(), q96());
        assert_eq!(sqrt_price_x96_from_price(4.0).unwrap(), q96() * U256::from(2));
        assert_eq!(sqrt_price_x96_from_price(0.25).unwrap(), q96() / U256::from(2));
    }

    #[test]
    fn test_invalid_prices_rejected() {
        for price in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                sqrt_price_x96_from_price(price),
                Err(CalculatorError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_price_off_ladder() {
        assert!(matches!(price_to_tick(1e300), Err(CalculatorError::Range(_))));
        assert!(matches!(price_to_tick(1e-300), Err(CalculatorError::Range(_))));
    }

    #[test]
    fn test_tick_to_price() {
        assert!((tick_to_price(0).unwrap() - 1.0).abs() < 1e-15);
        let p = tick_to_price(-6932).unwrap();
        assert!((p - 1.0001f64.powi(-6932)).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_across_ladder() {
        for tick in (MIN_TICK + 1..MAX_TICK).step_by(9973) {
            let back = price_to_tick(tick_to_price(tick).unwrap()).unwrap();
            assert!((back - tick).abs() <= 1, "tick {} came back as {}", tick, back);
        }
    }

    #[test]
    fn test_raw_price_scaling() {
        // 18-decimal outcome vs 6-decimal collateral
        let raw = to_raw_price(0.5, 18, 6);
        assert!((raw - 0.5e-12).abs() < 1e-24);
        assert!((from_raw_price(raw, 18, 6) - 0.5).abs() < 1e-15);
        assert_eq!(to_raw_price(0.5, 18, 18), 0.5);
    }
}
