//! Property-based tests for the range and allocation calculators
//!
//! Run with: cargo test -p lp-calculator calculator_properties --release

mod common;

use common::fixtures::params;
use ethers::types::U256;
use lp_calculator::application::{
    calculate_complementary_ranges, calculate_liquidity_from_fixed_tokens,
    calculate_token_amounts_for_liquidity, RangeCalculator,
};
use lp_calculator::domain::{FeeTierTable, TickRange};
use lp_calculator::math::{
    max_usable_tick, min_usable_tick, price_to_tick, tick_to_price, MAX_TICK, MIN_TICK,
};
use proptest::prelude::*;

// ============================================================================
// Price <-> tick properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// tick -> price -> tick lands within one tick
    #[test]
    fn tick_round_trip(tick in -400_000i32..400_000) {
        let price = tick_to_price(tick).unwrap();
        let back = price_to_tick(price).unwrap();
        prop_assert!((back - tick).abs() <= 1, "tick {} came back as {}", tick, back);
    }

    /// Higher prices never map to lower ticks
    #[test]
    fn price_to_tick_monotonic(a in 1e-6..1.0f64, b in 1e-6..1.0f64) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(price_to_tick(low).unwrap() <= price_to_tick(high).unwrap());
    }

    /// Ticks stay on the ladder for every probability
    #[test]
    fn price_to_tick_bounded(price in 1e-12..1.0f64) {
        let tick = price_to_tick(price).unwrap();
        prop_assert!((MIN_TICK..=MAX_TICK).contains(&tick));
        prop_assert!(tick <= 0);
    }
}

// ============================================================================
// Range properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// DOWN and UP midpoints always sum to one
    #[test]
    fn complementary_midpoints_sum_to_one(min in 0.0..0.99f64, width in 0.001..1.0f64) {
        let max = (min + width).min(1.0);
        prop_assume!(max > min);

        let ranges = calculate_complementary_ranges(min, max).unwrap();
        prop_assert!((ranges.probability_sum() - 1.0).abs() < 1e-9);
        prop_assert!((ranges.down.min_price - (1.0 - max)).abs() < 1e-12);
        prop_assert!((ranges.down.max_price - (1.0 - min)).abs() < 1e-12);
    }

    /// Bounds are aligned, ordered, usable and cover the requested range
    #[test]
    fn tick_bounds_aligned(
        min in 0.001..0.9f64,
        width in 0.01..0.099f64,
        spacing_index in 0usize..4,
        is_token0_outcome in any::<bool>(),
    ) {
        let spacing = [1, 10, 60, 200][spacing_index];
        let max = min + width;
        let calc = RangeCalculator::new(FeeTierTable::default());

        let range = calc.calculate_tick_bounds(min, max, spacing, is_token0_outcome).unwrap();
        prop_assert_eq!(range.lower % spacing, 0);
        prop_assert_eq!(range.upper % spacing, 0);
        prop_assert!(range.lower < range.upper);
        prop_assert!(range.lower >= min_usable_tick(spacing));
        prop_assert!(range.upper <= max_usable_tick(spacing));

        let (low_price, high_price) = if is_token0_outcome {
            (min, max)
        } else {
            (1.0 / max, 1.0 / min)
        };
        prop_assert!(range.lower <= price_to_tick(low_price).unwrap());
        prop_assert!(range.upper >= price_to_tick(high_price).unwrap());
    }

    /// A wider probability range never yields a narrower tick range
    #[test]
    fn widening_range_never_narrows_ticks(
        min in 0.01..0.5f64,
        width in 0.01..0.4f64,
        lower_stretch in 0.0..1.0f64,
        upper_stretch in 0.0..1.0f64,
        spacing_index in 0usize..4,
        is_token0_outcome in any::<bool>(),
    ) {
        let spacing = [1, 10, 60, 200][spacing_index];
        let max = min + width;
        let wide_min = min * (1.0 - lower_stretch);
        let wide_max = max + (1.0 - max) * upper_stretch;
        let calc = RangeCalculator::new(FeeTierTable::default());

        let narrow = calc.calculate_tick_bounds(min, max, spacing, is_token0_outcome).unwrap();
        let wide = calc
            .calculate_tick_bounds(wide_min, wide_max, spacing, is_token0_outcome)
            .unwrap();
        prop_assert!(wide.lower <= narrow.lower);
        prop_assert!(wide.upper >= narrow.upper);
        prop_assert!(
            wide.width() >= narrow.width(),
            "[{}, {}] -> {} ticks but [{}, {}] -> {} ticks",
            wide_min, wide_max, wide.width(), min, max, narrow.width()
        );
    }
}

// ============================================================================
// Allocation properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Out-of-range positions hold exactly one token
    #[test]
    fn out_of_range_is_single_sided(
        below in -200_000i32..-30000,
        above in -480i32..200_000,
        budget in 1u128..1_000_000_000_000_000_000_000_000u128,
    ) {
        let alloc = calculate_token_amounts_for_liquidity(&params(below), U256::from(budget)).unwrap();
        prop_assert_eq!(alloc.amount0, U256::from(budget));
        prop_assert!(alloc.amount1.is_zero());

        let alloc = calculate_token_amounts_for_liquidity(&params(above), U256::from(budget)).unwrap();
        prop_assert!(alloc.amount0.is_zero());
        prop_assert_eq!(alloc.amount1, U256::from(budget));
    }

    /// In range the collateral budget is spent exactly
    #[test]
    fn in_range_spends_budget(
        current in -29999i32..-480,
        budget in 1u128..1_000_000_000_000_000_000_000_000u128,
    ) {
        let alloc = calculate_token_amounts_for_liquidity(&params(current), U256::from(budget)).unwrap();
        prop_assert_eq!(alloc.collateral_used, U256::from(budget));
    }

    /// Fixed supplies are never exceeded
    #[test]
    fn fixed_supply_conserved(
        current in -40000i32..10000,
        collateral in 0u128..1_000_000_000_000_000_000_000_000u128,
        outcome in 0u128..1_000_000_000_000_000_000_000_000u128,
    ) {
        let alloc = calculate_liquidity_from_fixed_tokens(
            &params(current),
            U256::from(collateral),
            U256::from(outcome),
        ).unwrap();

        prop_assert!(alloc.collateral_used <= U256::from(collateral));
        prop_assert!(alloc.outcome_used <= U256::from(outcome));
    }

    /// Scaling down keeps one supply fully used when both are positive and in range
    #[test]
    fn fixed_supply_binds_one_side(
        current in -29999i32..-480,
        collateral in 1_000_000u128..1_000_000_000_000_000_000_000_000u128,
        outcome in 1_000_000u128..1_000_000_000_000_000_000_000_000u128,
    ) {
        let alloc = calculate_liquidity_from_fixed_tokens(
            &params(current),
            U256::from(collateral),
            U256::from(outcome),
        ).unwrap();

        prop_assert!(
            alloc.collateral_used == U256::from(collateral) || alloc.outcome_used == U256::from(outcome)
        );
    }

    /// Misaligned ranges are rejected
    #[test]
    fn misaligned_range_rejected(offset in 1i32..60) {
        let mut p = params(-6932);
        p.tick_range = TickRange { lower: -30000 + offset, upper: -480 };
        prop_assert!(calculate_token_amounts_for_liquidity(&p, U256::from(1u64)).is_err());
    }
}
