//! Range calculation for outcome pools
//!
//! Turns a probability range into spacing-aligned tick bounds for one pool,
//! and mirrors an UP range into the complementary DOWN range.
//!
//! Orientation:
//! - outcome is token0: pool price is collateral per outcome, so the tick
//!   interval is `[tick(min), tick(max)]`
//! - outcome is token1: pool price is outcome per collateral, so the
//!   interval is `[tick(1/max), tick(1/min)]`

use tracing::debug;

use crate::domain::errors::{CalculatorError, Result};
use crate::domain::models::{
    ComplementaryRanges, FeeTier, FeeTierTable, PriceRange, Tick, TickRange, TokenPair,
};
use crate::math::price_math::{sqrt_price_x96_from_price, to_raw_price};
use crate::math::tick_math::{
    align_tick_down, align_tick_up, get_tick_at_sqrt_ratio, max_usable_tick, min_usable_tick,
    MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK,
};

/// Computes tick bounds using an immutable fee tier table
#[derive(Debug, Clone, Default)]
pub struct RangeCalculator {
    fee_tiers: FeeTierTable,
}

impl RangeCalculator {
    /// Create a new range calculator
    pub fn new(fee_tiers: FeeTierTable) -> Self {
        Self { fee_tiers }
    }

    pub fn fee_tiers(&self) -> &FeeTierTable {
        &self.fee_tiers
    }

    /// Tick spacing for a fee tier
    pub fn tick_spacing(&self, fee_tier: FeeTier) -> Result<i32> {
        self.fee_tiers.tick_spacing(fee_tier)
    }

    /// Tick bounds for tokens with equal decimals
    pub fn calculate_tick_bounds(
        &self,
        min_price: f64,
        max_price: f64,
        tick_spacing: i32,
        is_token0_outcome: bool,
    ) -> Result<TickRange> {
        tick_bounds(min_price, max_price, tick_spacing, is_token0_outcome, 0, 0)
    }

    /// Tick bounds for a concrete pair, honoring each token's decimals
    pub fn calculate_tick_bounds_for_pair(
        &self,
        min_price: f64,
        max_price: f64,
        tick_spacing: i32,
        pair: &TokenPair,
    ) -> Result<TickRange> {
        tick_bounds(
            min_price,
            max_price,
            tick_spacing,
            pair.is_token0_outcome,
            pair.decimals0,
            pair.decimals1,
        )
    }

    /// Tick bounds with the spacing looked up from the fee tier
    pub fn tick_bounds_for_fee_tier(
        &self,
        range: &PriceRange,
        fee_tier: FeeTier,
        pair: &TokenPair,
    ) -> Result<TickRange> {
        let tick_spacing = self.tick_spacing(fee_tier)?;
        self.calculate_tick_bounds_for_pair(range.min_price, range.max_price, tick_spacing, pair)
    }
}

/// Mirror `[min, max]` into the DOWN range `[1 - max, 1 - min]`
pub fn calculate_complementary_ranges(min_price: f64, max_price: f64) -> Result<ComplementaryRanges> {
    let up = PriceRange::new(min_price, max_price)?;
    let down = PriceRange::new(1.0 - max_price, 1.0 - min_price)?;

    debug!(
        "[RangeCalculator] complementary ranges: UP [{:.4}, {:.4}] @ {:.4}, DOWN [{:.4}, {:.4}] @ {:.4}",
        up.min_price, up.max_price, up.initial_price, down.min_price, down.max_price, down.initial_price
    );

    Ok(ComplementaryRanges { down, up })
}

fn tick_bounds(
    min_price: f64,
    max_price: f64,
    tick_spacing: i32,
    is_token0_outcome: bool,
    decimals0: u8,
    decimals1: u8,
) -> Result<TickRange> {
    if tick_spacing <= 0 {
        return Err(CalculatorError::validation(format!(
            "tick spacing must be positive, got {}",
            tick_spacing
        )));
    }
    let range = PriceRange::new(min_price, max_price)?;

    // 1. Probability range -> raw pool prices (token1 per token0)
    let (lower_price, upper_price) = if is_token0_outcome {
        (range.min_price, range.max_price)
    } else {
        (invert(range.max_price), invert(range.min_price))
    };
    let lower_raw = to_raw_price(lower_price, decimals0, decimals1);
    let upper_raw = to_raw_price(upper_price, decimals0, decimals1);

    // 2. Raw prices -> ladder ticks
    let lower_tick = ladder_tick(lower_raw)?;
    let upper_tick = ladder_tick(upper_raw)?;

    // 3. Widen outward to the spacing and keep inside the usable ladder
    let lower = align_tick_down(lower_tick, tick_spacing).max(min_usable_tick(tick_spacing));
    let upper = align_tick_up(upper_tick, tick_spacing).min(max_usable_tick(tick_spacing));

    debug!(
        "[RangeCalculator] [{}, {}] token0_outcome={} spacing={} -> raw ticks [{}, {}] -> aligned [{}, {}]",
        min_price, max_price, is_token0_outcome, tick_spacing, lower_tick, upper_tick, lower, upper
    );

    if lower >= upper {
        return Err(CalculatorError::range(format!(
            "price range [{}, {}] collapses to zero width at spacing {} (tick {})",
            min_price, max_price, tick_spacing, lower
        )));
    }

    TickRange::new(lower, upper, tick_spacing)
}

fn invert(price: f64) -> f64 {
    if price == 0.0 {
        f64::INFINITY
    } else {
        1.0 / price
    }
}

/// Tick for a raw price, pinned to the ladder edges for 0, infinity and
/// prices whose sqrt ratio falls off the ladder
fn ladder_tick(raw_price: f64) -> Result<Tick> {
    if raw_price == 0.0 {
        return Ok(MIN_TICK);
    }
    if raw_price == f64::INFINITY {
        return Ok(MAX_TICK);
    }

    let sqrt_price_x96 = match sqrt_price_x96_from_price(raw_price) {
        Ok(sqrt_price_x96) => sqrt_price_x96,
        Err(CalculatorError::Range(_)) => return Ok(MAX_TICK),
        Err(e) => return Err(e),
    };

    if sqrt_price_x96 < MIN_SQRT_RATIO {
        Ok(MIN_TICK)
    } else if sqrt_price_x96 >= MAX_SQRT_RATIO {
        Ok(MAX_TICK)
    } else {
        get_tick_at_sqrt_ratio(sqrt_price_x96)
    }
}
