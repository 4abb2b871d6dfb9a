//! Position planner
//!
//! Combines the calculators into a complete provisioning plan for the DOWN
//! and UP pools of one scalar market. The UP pool gets the requested
//! probability range and the DOWN pool its complement.

use ethers::types::U256;
use ethers::utils::format_units;
use tracing::{debug, info, warn};

use super::services::allocator::{amounts_for_allocation, AllocationParams};
use super::services::range_calculator::{calculate_complementary_ranges, RangeCalculator};
use super::services::slippage::calculate_min_amounts;
use crate::domain::errors::{CalculatorError, Result};
use crate::domain::models::{PriceRange, TokenPair};
use crate::domain::plan::{MintPlan, OutcomeSide, PlanRequest, ProvisionPlan, ScalarMarket};
use crate::math::price_math::{
    from_raw_price, sqrt_price_x96_from_price, tick_to_price, to_raw_price,
};
use crate::math::tick_math::get_tick_at_sqrt_ratio;

/// Builds mint plans from pool snapshots and budgets
#[derive(Debug, Clone, Default)]
pub struct PositionPlanner {
    calculator: RangeCalculator,
}

impl PositionPlanner {
    pub fn new(calculator: RangeCalculator) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &RangeCalculator {
        &self.calculator
    }

    /// Plan both outcome pools
    pub fn plan(&self, market: &ScalarMarket, request: &PlanRequest) -> Result<ProvisionPlan> {
        let ranges = calculate_complementary_ranges(request.min_price, request.max_price)?;

        let down = self.plan_side(market, request, OutcomeSide::Down, &ranges.down)?;
        let up = self.plan_side(market, request, OutcomeSide::Up, &ranges.up)?;

        Ok(ProvisionPlan { ranges, down, up })
    }

    fn plan_side(
        &self,
        market: &ScalarMarket,
        request: &PlanRequest,
        side: OutcomeSide,
        range: &PriceRange,
    ) -> Result<MintPlan> {
        let pair = TokenPair::for_outcome(market.outcome(side), market.collateral)?;
        let pool = request.pool(side);

        let tick_spacing = self.calculator.tick_spacing(pool.fee_tier)?;
        if tick_spacing != pool.tick_spacing {
            return Err(CalculatorError::config(format!(
                "{} pool reports tick spacing {} but fee tier {} maps to {}",
                side, pool.tick_spacing, pool.fee_tier, tick_spacing
            )));
        }

        let tick_range = self.calculator.calculate_tick_bounds_for_pair(
            range.min_price,
            range.max_price,
            tick_spacing,
            &pair,
        )?;

        let (current_tick, initialize_sqrt_price_x96) = if pool.is_uninitialized() {
            let sqrt_price_x96 = initial_sqrt_price_x96(range.initial_price, &pair)?;
            let tick = get_tick_at_sqrt_ratio(sqrt_price_x96)?;
            warn!(
                "[PositionPlanner] {} pool has no liquidity, initializing at probability {:.4} (tick {})",
                side, range.initial_price, tick
            );
            (tick, Some(sqrt_price_x96))
        } else {
            (pool.current_tick, None)
        };

        let params = AllocationParams {
            current_tick,
            tick_range,
            is_token0_outcome: pair.is_token0_outcome,
            tick_spacing,
            decimals0: pair.decimals0,
            decimals1: pair.decimals1,
            fee_tier: pool.fee_tier,
        };
        let allocation = request.budget(side).allocate(&params)?;
        let min_amounts = calculate_min_amounts(
            allocation.amount0,
            allocation.amount1,
            request.slippage_tolerance,
        )?;
        let (owed0, owed1) = amounts_for_allocation(&params, &allocation)?;
        debug!(
            "[PositionPlanner] {} L={} owes {} / {} against desired {} / {}",
            side, allocation.liquidity, owed0, owed1, allocation.amount0, allocation.amount1
        );

        let collateral = pair.collateral();
        let outcome = pair.outcome();
        info!(
            "[PositionPlanner] {} [{:.4}, {:.4}] fee {} ticks {} (current {}, p={:.4}): collateral {} outcome {}",
            side,
            range.min_price,
            range.max_price,
            pool.fee_tier,
            tick_range,
            current_tick,
            outcome_probability(current_tick, &pair)?,
            human_amount(allocation.collateral_used, collateral.decimals),
            human_amount(allocation.outcome_used, outcome.decimals),
        );

        Ok(MintPlan {
            side,
            token0: pair.token0,
            token1: pair.token1,
            fee_tier: pool.fee_tier,
            tick_range,
            amount0_desired: allocation.amount0,
            amount1_desired: allocation.amount1,
            amount0_min: min_amounts.amount0_min,
            amount1_min: min_amounts.amount1_min,
            initialize_sqrt_price_x96,
            allocation,
        })
    }
}

/// Pool sqrt price for an outcome probability, honoring token order and decimals
pub fn initial_sqrt_price_x96(probability: f64, pair: &TokenPair) -> Result<U256> {
    if !probability.is_finite() || probability <= 0.0 {
        return Err(CalculatorError::validation(format!(
            "initial probability must be positive, got {}",
            probability
        )));
    }
    let pool_price = if pair.is_token0_outcome {
        probability
    } else {
        1.0 / probability
    };
    sqrt_price_x96_from_price(to_raw_price(pool_price, pair.decimals0, pair.decimals1))
}

/// Outcome probability implied by a pool tick, the inverse of [`initial_sqrt_price_x96`]
pub fn outcome_probability(tick: i32, pair: &TokenPair) -> Result<f64> {
    let pool_price = from_raw_price(tick_to_price(tick)?, pair.decimals0, pair.decimals1);
    Ok(if pair.is_token0_outcome {
        pool_price
    } else {
        1.0 / pool_price
    })
}

fn human_amount(amount: U256, decimals: u8) -> String {
    format_units(amount, decimals as u32).unwrap_or_else(|_| amount.to_string())
}
