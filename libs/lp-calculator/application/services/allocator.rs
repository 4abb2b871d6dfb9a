//! Liquidity allocation
//!
//! Splits a budget between the two pool tokens so that both amounts are
//! backed by one liquidity value over the position's tick range.
//!
//! Two modes:
//! - budget-driven: a single collateral amount is spent in full
//! - fixed-supply: collateral and outcome supplies are already in hand, so
//!   the unconstrained allocation is computed first and then scaled down to
//!   whichever supply runs out first

use ethers::types::U256;
use tracing::debug;

use crate::domain::errors::{CalculatorError, Result};
use crate::domain::models::{
    FeeTier, LiquidityAllocation, LiquidityBudget, SupplyLimits, Tick, TickRange,
};
use crate::math::liquidity_amounts::{
    get_amount0_for_liquidity, get_amount1_for_liquidity, get_amounts_for_liquidity,
    get_liquidity_for_amount0, get_liquidity_for_amount1,
};
use crate::math::tick_math::{get_sqrt_ratio_at_tick, MAX_TICK, MIN_TICK};

/// Pool state and position geometry for one allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationParams {
    pub current_tick: Tick,
    pub tick_range: TickRange,
    pub is_token0_outcome: bool,
    pub tick_spacing: i32,
    pub decimals0: u8,
    pub decimals1: u8,
    pub fee_tier: FeeTier,
}

impl AllocationParams {
    /// Reject (never clamp) malformed geometry
    pub fn validate(&self) -> Result<()> {
        if self.tick_spacing <= 0 {
            return Err(CalculatorError::range(format!(
                "tick spacing must be positive, got {}",
                self.tick_spacing
            )));
        }
        self.tick_range.validate(self.tick_spacing)?;
        if self.current_tick < MIN_TICK || self.current_tick > MAX_TICK {
            return Err(CalculatorError::range(format!(
                "current tick {} outside [{}, {}]",
                self.current_tick, MIN_TICK, MAX_TICK
            )));
        }
        Ok(())
    }

    fn sqrt_ratios(&self) -> Result<SqrtRatios> {
        Ok(SqrtRatios {
            lower: get_sqrt_ratio_at_tick(self.tick_range.lower)?,
            current: get_sqrt_ratio_at_tick(self.current_tick)?,
            upper: get_sqrt_ratio_at_tick(self.tick_range.upper)?,
        })
    }

    fn allocation(&self, amount0: U256, amount1: U256, liquidity: u128) -> LiquidityAllocation {
        LiquidityAllocation::from_amounts(amount0, amount1, liquidity, self.is_token0_outcome)
    }

    fn empty(&self) -> LiquidityAllocation {
        self.allocation(U256::zero(), U256::zero(), 0)
    }
}

#[derive(Debug, Clone, Copy)]
struct SqrtRatios {
    lower: U256,
    current: U256,
    upper: U256,
}

/// Where the current price sits relative to the position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Position holds only token0
    Below,
    InRange,
    /// Position holds only token1
    Above,
}

impl SqrtRatios {
    fn placement(&self) -> Placement {
        if self.current <= self.lower {
            Placement::Below
        } else if self.current < self.upper {
            Placement::InRange
        } else {
            Placement::Above
        }
    }
}

/// Budget-driven allocation: spend `total_value` of collateral
///
/// Below the range the whole budget goes to token0, at or above it to
/// token1. In range the collateral slot takes exactly `total_value` and the
/// outcome amount is derived from the resulting liquidity.
pub fn calculate_token_amounts_for_liquidity(
    params: &AllocationParams,
    total_value: U256,
) -> Result<LiquidityAllocation> {
    params.validate()?;
    if total_value.is_zero() {
        return Ok(params.empty());
    }

    let sqrt = params.sqrt_ratios()?;
    let allocation = match sqrt.placement() {
        Placement::Below => {
            let liquidity = get_liquidity_for_amount0(sqrt.lower, sqrt.upper, total_value)?;
            params.allocation(total_value, U256::zero(), liquidity)
        }
        Placement::Above => {
            let liquidity = get_liquidity_for_amount1(sqrt.lower, sqrt.upper, total_value)?;
            params.allocation(U256::zero(), total_value, liquidity)
        }
        Placement::InRange if params.is_token0_outcome => {
            // collateral is token1
            let liquidity = get_liquidity_for_amount1(sqrt.lower, sqrt.current, total_value)?;
            let amount0 = get_amount0_for_liquidity(sqrt.current, sqrt.upper, liquidity)?;
            params.allocation(amount0, total_value, liquidity)
        }
        Placement::InRange => {
            // collateral is token0
            let liquidity = get_liquidity_for_amount0(sqrt.current, sqrt.upper, total_value)?;
            let amount1 = get_amount1_for_liquidity(sqrt.lower, sqrt.current, liquidity)?;
            params.allocation(total_value, amount1, liquidity)
        }
    };

    debug!(
        "[LiquidityAllocator] budget {} at tick {} over {} -> amount0={} amount1={} L={}",
        total_value,
        params.current_tick,
        params.tick_range,
        allocation.amount0,
        allocation.amount1,
        allocation.liquidity
    );

    Ok(allocation)
}

/// Fixed-supply allocation: never ask for more of either token than is held
pub fn calculate_liquidity_from_fixed_tokens(
    params: &AllocationParams,
    available_collateral: U256,
    available_outcome: U256,
) -> Result<LiquidityAllocation> {
    let supply = SupplyLimits::from_supplies(
        available_collateral,
        available_outcome,
        params.is_token0_outcome,
    );
    match compute_unconstrained(params, &supply) {
        Ok(unconstrained) => clamp_to_supply(params, unconstrained, &supply),
        // collateral alone buys more than uint128 liquidity; bind on the supplies directly
        Err(CalculatorError::Validation(_)) => bind_to_supply(params, &supply),
        Err(e) => Err(e),
    }
}

/// Allocation ignoring the outcome-side supply
///
/// Out of range the matching supply is taken whole. In range the full
/// collateral supply is spent as in the budget-driven mode.
pub fn compute_unconstrained(
    params: &AllocationParams,
    supply: &SupplyLimits,
) -> Result<LiquidityAllocation> {
    params.validate()?;
    if supply.is_empty() {
        return Ok(params.empty());
    }

    let sqrt = params.sqrt_ratios()?;
    match sqrt.placement() {
        Placement::Below => {
            let liquidity = get_liquidity_for_amount0(sqrt.lower, sqrt.upper, supply.amount0)?;
            Ok(params.allocation(supply.amount0, U256::zero(), liquidity))
        }
        Placement::Above => {
            let liquidity = get_liquidity_for_amount1(sqrt.lower, sqrt.upper, supply.amount1)?;
            Ok(params.allocation(U256::zero(), supply.amount1, liquidity))
        }
        Placement::InRange => {
            let collateral = if params.is_token0_outcome {
                supply.amount1
            } else {
                supply.amount0
            };
            calculate_token_amounts_for_liquidity(params, collateral)
        }
    }
}

/// Scale an allocation down to the available supplies
///
/// The binding side (the one permitting less liquidity) is set to its full
/// supply, liquidity is re-derived from it, and the other amount is derived
/// from that same liquidity. An allocation that already fits is returned
/// unchanged.
pub fn clamp_to_supply(
    params: &AllocationParams,
    allocation: LiquidityAllocation,
    supply: &SupplyLimits,
) -> Result<LiquidityAllocation> {
    params.validate()?;
    if allocation.amount0 <= supply.amount0 && allocation.amount1 <= supply.amount1 {
        return Ok(allocation);
    }
    if supply.is_empty() {
        return Ok(params.empty());
    }

    let clamped = bind_to_supply(params, supply)?;

    debug!(
        "[LiquidityAllocator] clamped amount0 {} -> {}, amount1 {} -> {} (supply {} / {}), L={}",
        allocation.amount0,
        clamped.amount0,
        allocation.amount1,
        clamped.amount1,
        supply.amount0,
        supply.amount1,
        clamped.liquidity
    );

    Ok(clamped)
}

/// Allocation with the binding supply used in full
fn bind_to_supply(params: &AllocationParams, supply: &SupplyLimits) -> Result<LiquidityAllocation> {
    params.validate()?;
    if supply.is_empty() {
        return Ok(params.empty());
    }

    let sqrt = params.sqrt_ratios()?;
    match sqrt.placement() {
        Placement::Below => {
            let liquidity = get_liquidity_for_amount0(sqrt.lower, sqrt.upper, supply.amount0)?;
            Ok(params.allocation(supply.amount0, U256::zero(), liquidity))
        }
        Placement::Above => {
            let liquidity = get_liquidity_for_amount1(sqrt.lower, sqrt.upper, supply.amount1)?;
            Ok(params.allocation(U256::zero(), supply.amount1, liquidity))
        }
        Placement::InRange => {
            // a side whose liquidity overflows uint128 cannot be the binding one
            let liquidity0 = get_liquidity_for_amount0(sqrt.current, sqrt.upper, supply.amount0)
                .unwrap_or(u128::MAX);
            let liquidity1 = get_liquidity_for_amount1(sqrt.lower, sqrt.current, supply.amount1)
                .unwrap_or(u128::MAX);
            if liquidity0 == u128::MAX && liquidity1 == u128::MAX {
                return Err(CalculatorError::validation(format!(
                    "supplies {} / {} overflow uint128 liquidity",
                    supply.amount0, supply.amount1
                )));
            }

            if liquidity0 <= liquidity1 {
                let amount1 = get_amount1_for_liquidity(sqrt.lower, sqrt.current, liquidity0)?;
                Ok(params.allocation(supply.amount0, amount1, liquidity0))
            } else {
                let amount0 = get_amount0_for_liquidity(sqrt.current, sqrt.upper, liquidity1)?;
                Ok(params.allocation(amount0, supply.amount1, liquidity1))
            }
        }
    }
}

/// Token amounts actually owed for an allocation's liquidity, rounded down
pub fn amounts_for_allocation(
    params: &AllocationParams,
    allocation: &LiquidityAllocation,
) -> Result<(U256, U256)> {
    params.validate()?;
    let sqrt = params.sqrt_ratios()?;
    get_amounts_for_liquidity(sqrt.current, sqrt.lower, sqrt.upper, allocation.liquidity)
}

impl LiquidityBudget {
    /// Allocate with the mode matching the budget kind
    pub fn allocate(&self, params: &AllocationParams) -> Result<LiquidityAllocation> {
        match self {
            LiquidityBudget::Single(total_value) => {
                calculate_token_amounts_for_liquidity(params, *total_value)
            }
            LiquidityBudget::Fixed { collateral, outcome } => {
                calculate_liquidity_from_fixed_tokens(params, *collateral, *outcome)
            }
        }
    }
}
