//! 512-bit intermediate arithmetic
//!
//! Products of two Q64.96 values or of an amount and a Q96 factor overflow
//! 256 bits, so every `a * b / d` goes through `U512` before narrowing back.

use ethers::types::{U256, U512};

use crate::domain::errors::{CalculatorError, Result};

/// 2^96, the Q64.96 fixed-point unit
pub fn q96() -> U256 {
    U256::one() << 96
}

/// Narrow a 512-bit value back to 256 bits, failing on overflow
pub fn narrow(value: U512) -> Result<U256> {
    U256::try_from(value)
        .map_err(|_| CalculatorError::validation("intermediate value overflows 256 bits"))
}

/// `floor(a * b / denominator)` with a full 512-bit product
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(CalculatorError::validation("mul_div by zero"));
    }

    let product = U512::from(a) * U512::from(b);
    narrow(product / U512::from(denominator))
}

/// Floor square root by Newton iteration from an upper-bound guess
pub fn sqrt_u512(y: U512) -> U512 {
    if y.is_zero() {
        return U512::zero();
    }

    let mut z = U512::one() << ((y.bits() + 1) / 2);
    loop {
        let x = (z + y / z) >> 1;
        if x >= z {
            return z;
        }
        z = x;
    }
}

/// Lossy conversion used only for display and float round-trips
pub fn u256_to_f64(value: U256) -> f64 {
    value
        .0
        .iter()
        .rev()
        .fold(0.0_f64, |acc, limb| acc * 18446744073709551616.0 + *limb as f64)
}
