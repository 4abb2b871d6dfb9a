//! Core domain models
//!
//! Every value here is built per call from caller-supplied snapshots and
//! dropped when the call returns. Nothing is shared or mutated in place.

use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::errors::{CalculatorError, Result};
use crate::math::tick_math::{MAX_TICK, MIN_TICK};

/// Index into the AMM's geometric price ladder (price = 1.0001^tick)
pub type Tick = i32;

// =============================================================================
// Ticks and prices
// =============================================================================

/// Spacing-aligned tick interval `[lower, upper)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    pub lower: Tick,
    pub upper: Tick,
}

impl TickRange {
    /// Build a range, rejecting anything the pool would refuse to mint
    pub fn new(lower: Tick, upper: Tick, tick_spacing: i32) -> Result<Self> {
        let range = Self { lower, upper };
        range.validate(tick_spacing)?;
        Ok(range)
    }

    /// Check ordering, bounds and alignment
    pub fn validate(&self, tick_spacing: i32) -> Result<()> {
        if tick_spacing <= 0 {
            return Err(CalculatorError::validation(format!(
                "tick spacing must be positive, got {}",
                tick_spacing
            )));
        }
        if self.lower >= self.upper {
            return Err(CalculatorError::range(format!(
                "tick lower {} must be below tick upper {}",
                self.lower, self.upper
            )));
        }
        if self.lower < MIN_TICK || self.upper > MAX_TICK {
            return Err(CalculatorError::range(format!(
                "ticks [{}, {}] outside [{}, {}]",
                self.lower, self.upper, MIN_TICK, MAX_TICK
            )));
        }
        if self.lower % tick_spacing != 0 || self.upper % tick_spacing != 0 {
            return Err(CalculatorError::range(format!(
                "ticks [{}, {}] not aligned to spacing {}",
                self.lower, self.upper, tick_spacing
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.upper - self.lower
    }

    /// Whether a position over this range is active at `tick`
    pub fn contains(&self, tick: Tick) -> bool {
        self.lower <= tick && tick < self.upper
    }
}

impl fmt::Display for TickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// Probability price interval with the pool's starting price at its midpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min_price: f64,
    pub max_price: f64,
    pub initial_price: f64,
}

impl PriceRange {
    /// Validate `0 <= min < max <= 1` and derive the midpoint
    pub fn new(min_price: f64, max_price: f64) -> Result<Self> {
        if !min_price.is_finite() || !max_price.is_finite() {
            return Err(CalculatorError::validation(format!(
                "price range [{}, {}] must be finite",
                min_price, max_price
            )));
        }
        if min_price < 0.0 || max_price > 1.0 {
            return Err(CalculatorError::validation(format!(
                "price range [{}, {}] must lie within [0, 1]",
                min_price, max_price
            )));
        }
        if min_price >= max_price {
            return Err(CalculatorError::validation(format!(
                "min price {} must be below max price {}",
                min_price, max_price
            )));
        }

        Ok(Self {
            min_price,
            max_price,
            initial_price: (min_price + max_price) / 2.0,
        })
    }
}

/// DOWN and UP price ranges whose implied probabilities sum to one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplementaryRanges {
    pub down: PriceRange,
    pub up: PriceRange,
}

impl ComplementaryRanges {
    /// `down.initial_price + up.initial_price`, ~1.0 by construction
    pub fn probability_sum(&self) -> f64 {
        self.down.initial_price + self.up.initial_price
    }
}

// =============================================================================
// Pools and fee tiers
// =============================================================================

/// Pool fee in hundredths of a basis point (3000 = 0.30%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(pub u32);

impl FeeTier {
    pub fn as_percent(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

/// Immutable fee tier -> tick spacing table
///
/// Defaults to the canonical deployment; chains with extra tiers override it
/// through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTierTable {
    spacings: BTreeMap<u32, i32>,
}

impl FeeTierTable {
    pub fn new(entries: impl IntoIterator<Item = (u32, i32)>) -> Result<Self> {
        let table = Self {
            spacings: entries.into_iter().collect(),
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        if self.spacings.is_empty() {
            return Err(CalculatorError::config("fee tier table is empty"));
        }
        for (fee, spacing) in &self.spacings {
            if *spacing <= 0 {
                return Err(CalculatorError::config(format!(
                    "fee tier {} has non-positive tick spacing {}",
                    fee, spacing
                )));
            }
        }
        Ok(())
    }

    /// Tick spacing for `fee`, or a configuration error for unknown tiers
    pub fn tick_spacing(&self, fee: FeeTier) -> Result<i32> {
        self.spacings.get(&fee.0).copied().ok_or_else(|| {
            CalculatorError::config(format!("fee tier {} has no tick spacing mapping", fee.0))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeeTier, i32)> + '_ {
        self.spacings.iter().map(|(fee, spacing)| (FeeTier(*fee), *spacing))
    }
}

impl Default for FeeTierTable {
    fn default() -> Self {
        Self {
            spacings: BTreeMap::from([(100, 1), (500, 10), (3000, 60), (10000, 200)]),
        }
    }
}

/// Point-in-time pool read supplied by the orchestration layer
///
/// May be stale by the time a transaction lands; nothing here guards
/// against that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub current_tick: Tick,
    pub tick_spacing: i32,
    pub liquidity: u128,
    pub fee_tier: FeeTier,
}

impl PoolSnapshot {
    /// A pool with no liquidity has not been seeded with a price yet
    pub fn is_uninitialized(&self) -> bool {
        self.liquidity == 0
    }
}

// =============================================================================
// Tokens
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: Address,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(address: Address, decimals: u8) -> Self {
        Self { address, decimals }
    }
}

/// Canonically ordered pool tokens (`token0 < token1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token0: Address,
    pub token1: Address,
    pub decimals0: u8,
    pub decimals1: u8,
    /// Whether the outcome (non-collateral) token sits in slot 0
    pub is_token0_outcome: bool,
}

impl TokenPair {
    pub fn outcome(&self) -> TokenInfo {
        if self.is_token0_outcome {
            TokenInfo::new(self.token0, self.decimals0)
        } else {
            TokenInfo::new(self.token1, self.decimals1)
        }
    }

    pub fn collateral(&self) -> TokenInfo {
        if self.is_token0_outcome {
            TokenInfo::new(self.token1, self.decimals1)
        } else {
            TokenInfo::new(self.token0, self.decimals0)
        }
    }
}

// =============================================================================
// Budgets and allocations
// =============================================================================

/// What the caller brings to the position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiquidityBudget {
    /// Collateral amount to be spread across both tokens
    Single(U256),
    /// Collateral and outcome tokens already in hand (post-split)
    Fixed { collateral: U256, outcome: U256 },
}

/// Fixed supplies mapped onto canonical token slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplyLimits {
    pub amount0: U256,
    pub amount1: U256,
}

impl SupplyLimits {
    pub fn from_supplies(collateral: U256, outcome: U256, is_token0_outcome: bool) -> Self {
        if is_token0_outcome {
            Self { amount0: outcome, amount1: collateral }
        } else {
            Self { amount0: collateral, amount1: outcome }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount0.is_zero() && self.amount1.is_zero()
    }
}

/// Token amounts for one position, all backed by a single liquidity value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityAllocation {
    pub amount0: U256,
    pub amount1: U256,
    pub collateral_used: U256,
    pub outcome_used: U256,
    pub liquidity: u128,
}

impl LiquidityAllocation {
    pub fn from_amounts(amount0: U256, amount1: U256, liquidity: u128, is_token0_outcome: bool) -> Self {
        let (outcome_used, collateral_used) = if is_token0_outcome {
            (amount0, amount1)
        } else {
            (amount1, amount0)
        };

        Self {
            amount0,
            amount1,
            collateral_used,
            outcome_used,
            liquidity,
        }
    }

    pub fn collateral_needed(&self) -> U256 {
        self.collateral_used
    }

    pub fn outcome_needed(&self) -> U256 {
        self.outcome_used
    }

    pub fn is_single_sided(&self) -> bool {
        self.amount0.is_zero() != self.amount1.is_zero()
    }
}

/// Slippage-protected minimums passed alongside the desired amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinAmounts {
    pub amount0_min: U256,
    pub amount1_min: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_range_validation() {
        assert!(TickRange::new(-30000, -480, 60).is_ok());
        assert!(matches!(TickRange::new(60, 60, 60), Err(CalculatorError::Range(_))));
        assert!(matches!(TickRange::new(120, 60, 60), Err(CalculatorError::Range(_))));
        assert!(matches!(TickRange::new(-30, 60, 60), Err(CalculatorError::Range(_))));
        assert!(matches!(
            TickRange::new(MIN_TICK - 8, 0, 1),
            Err(CalculatorError::Range(_))
        ));
        assert!(matches!(TickRange::new(0, 60, 0), Err(CalculatorError::Validation(_))));
    }

    #[test]
    fn test_tick_range_contains() {
        let range = TickRange { lower: -60, upper: 60 };
        assert!(range.contains(-60));
        assert!(range.contains(0));
        assert!(!range.contains(60));
        assert_eq!(range.width(), 120);
    }

    #[test]
    fn test_price_range_midpoint() {
        let range = PriceRange::new(0.05, 0.95).unwrap();
        assert!((range.initial_price - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_price_range_rejects_bad_bounds() {
        assert!(PriceRange::new(0.6, 0.4).is_err());
        assert!(PriceRange::new(0.5, 0.5).is_err());
        assert!(PriceRange::new(-0.1, 0.5).is_err());
        assert!(PriceRange::new(0.1, 1.5).is_err());
        assert!(PriceRange::new(f64::NAN, 0.5).is_err());
        assert!(PriceRange::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn test_default_fee_tier_table() {
        let table = FeeTierTable::default();
        assert_eq!(table.tick_spacing(FeeTier(100)).unwrap(), 1);
        assert_eq!(table.tick_spacing(FeeTier(500)).unwrap(), 10);
        assert_eq!(table.tick_spacing(FeeTier(3000)).unwrap(), 60);
        assert_eq!(table.tick_spacing(FeeTier(10000)).unwrap(), 200);
        assert!(matches!(
            table.tick_spacing(FeeTier(2500)),
            Err(CalculatorError::Config(_))
        ));
    }

    #[test]
    fn test_fee_tier_table_rejects_bad_spacing() {
        assert!(FeeTierTable::new([(3000, 0)]).is_err());
        assert!(FeeTierTable::new(Vec::<(u32, i32)>::new()).is_err());
        assert!(FeeTierTable::new([(2500, 50)]).is_ok());
    }

    #[test]
    fn test_fee_tier_display() {
        assert_eq!(FeeTier(3000).to_string(), "0.3%");
        assert_eq!(FeeTier(10000).to_string(), "1%");
    }

    #[test]
    fn test_supply_limits_orientation() {
        let limits = SupplyLimits::from_supplies(U256::from(50), U256::from(10), true);
        assert_eq!(limits.amount0, U256::from(10));
        assert_eq!(limits.amount1, U256::from(50));

        let limits = SupplyLimits::from_supplies(U256::from(50), U256::from(10), false);
        assert_eq!(limits.amount0, U256::from(50));
        assert_eq!(limits.amount1, U256::from(10));
    }

    #[test]
    fn test_allocation_orientation() {
        let alloc = LiquidityAllocation::from_amounts(U256::from(7), U256::from(3), 1, false);
        assert_eq!(alloc.collateral_needed(), U256::from(7));
        assert_eq!(alloc.outcome_needed(), U256::from(3));
        assert!(!alloc.is_single_sided());
        assert!(LiquidityAllocation::from_amounts(U256::from(7), U256::zero(), 1, true).is_single_sided());
    }
}
