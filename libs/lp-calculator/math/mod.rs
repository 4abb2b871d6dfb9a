//! Math Layer
//!
//! Integer fixed-point math shared by every calculator: 512-bit
//! multiply-divide, the AMM's tick ladder, price conversion, and the
//! liquidity/amount formulas the position manager mints with.

pub mod full_math;
pub mod liquidity_amounts;
pub mod price_math;
pub mod tick_math;

pub use full_math::{mul_div, q96};
pub use liquidity_amounts::{
    get_amount0_for_liquidity, get_amount1_for_liquidity, get_amounts_for_liquidity,
    get_liquidity_for_amount0, get_liquidity_for_amount1, get_liquidity_for_amounts,
};
pub use price_math::{
    price_from_sqrt_price_x96, price_to_tick, sqrt_price_x96_from_price, tick_to_price,
};
pub use tick_math::{
    align_tick_down, align_tick_up, get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio,
    max_usable_tick, min_usable_tick, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK,
};
