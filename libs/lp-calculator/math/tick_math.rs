//! Tick math matching the AMM's on-chain `TickMath` library
//!
//! `get_sqrt_ratio_at_tick` reproduces the contract bit for bit: the same
//! magic constants, the same 128-bit shifts and the same final round-up from
//! Q128.128 to Q64.96. The reverse direction binary-searches that function,
//! which gives the exact greatest tick whose ratio does not exceed the input.

use ethers::types::{U256, U512};

use super::full_math::narrow;
use crate::domain::errors::{CalculatorError, Result};

/// Lowest tick the AMM accepts
pub const MIN_TICK: i32 = -887272;
/// Highest tick the AMM accepts
pub const MAX_TICK: i32 = 887272;

/// `get_sqrt_ratio_at_tick(MIN_TICK)`
pub const MIN_SQRT_RATIO: U256 = U256([4295128739, 0, 0, 0]);
/// `get_sqrt_ratio_at_tick(MAX_TICK)` = 1461446703485210103287273052203988822378723970342
pub const MAX_SQRT_RATIO: U256 = U256([0x5d951d5263988d26, 0xefd1fc6a50648849, 0xfffd8963, 0]);

/// sqrt(1.0001)^-1 in Q128.128, the factor for bit 0
const SQRT_RATIO_BIT_0: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

/// sqrt(1.0001)^-(2^i) in Q128.128 for bits 1..=19
const SQRT_RATIO_FACTORS: [u128; 19] = [
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

/// Calculate sqrt(1.0001^tick) * 2^96
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(CalculatorError::range(format!(
            "tick {} out of bounds [{}, {}]",
            tick, MIN_TICK, MAX_TICK
        )));
    }

    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(SQRT_RATIO_BIT_0)
    } else {
        U256::one() << 128
    };

    for (i, factor) in SQRT_RATIO_FACTORS.iter().enumerate() {
        if abs_tick & (0x2 << i) != 0 {
            ratio = mul_shift_128(ratio, *factor)?;
        }
    }

    // Computed for the negative tick; invert for positive ones
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up so the result never undershoots
    let shifted = ratio >> 32;
    if (ratio & U256::from(u32::MAX)).is_zero() {
        Ok(shifted)
    } else {
        Ok(shifted + U256::one())
    }
}

/// Greatest tick whose sqrt ratio is `<= sqrt_price_x96`
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(CalculatorError::range(format!(
            "sqrt price {} outside the tick ladder",
            sqrt_price_x96
        )));
    }

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;

    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(mid)? <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Ok(low)
}

/// Round a tick down to a multiple of `tick_spacing`
pub fn align_tick_down(tick: i32, tick_spacing: i32) -> i32 {
    tick.div_euclid(tick_spacing) * tick_spacing
}

/// Round a tick up to a multiple of `tick_spacing`
pub fn align_tick_up(tick: i32, tick_spacing: i32) -> i32 {
    if tick.rem_euclid(tick_spacing) == 0 {
        tick
    } else {
        (tick.div_euclid(tick_spacing) + 1) * tick_spacing
    }
}

/// Lowest tick usable with `tick_spacing`
pub fn min_usable_tick(tick_spacing: i32) -> i32 {
    align_tick_up(MIN_TICK, tick_spacing)
}

/// Highest tick usable with `tick_spacing`
pub fn max_usable_tick(tick_spacing: i32) -> i32 {
    align_tick_down(MAX_TICK, tick_spacing)
}

fn mul_shift_128(ratio: U256, factor: u128) -> Result<U256> {
    narrow((U512::from(ratio) * U512::from(factor)) >> 128)
}
