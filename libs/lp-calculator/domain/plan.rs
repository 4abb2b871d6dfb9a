//! Provisioning plan types
//!
//! A plan is the calculator's hand-off to the transaction layer: for each
//! outcome pool it carries the tick bounds, desired and minimum amounts, and
//! the sqrt price to initialize the pool with when it has no liquidity yet.

use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::models::{
    ComplementaryRanges, FeeTier, LiquidityAllocation, LiquidityBudget, PoolSnapshot, TickRange,
    TokenInfo,
};

/// Which outcome token a pool trades against collateral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeSide {
    Down,
    Up,
}

impl fmt::Display for OutcomeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeSide::Down => write!(f, "DOWN"),
            OutcomeSide::Up => write!(f, "UP"),
        }
    }
}

/// Tokens of a two-outcome scalar market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarMarket {
    pub collateral: TokenInfo,
    pub down: TokenInfo,
    pub up: TokenInfo,
}

impl ScalarMarket {
    pub fn outcome(&self, side: OutcomeSide) -> TokenInfo {
        match side {
            OutcomeSide::Down => self.down,
            OutcomeSide::Up => self.up,
        }
    }
}

/// Everything the planner needs for one DOWN/UP provisioning round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    /// UP-side probability range; the DOWN range is mirrored from it
    pub min_price: f64,
    pub max_price: f64,
    pub down_pool: PoolSnapshot,
    pub up_pool: PoolSnapshot,
    pub down_budget: LiquidityBudget,
    pub up_budget: LiquidityBudget,
    pub slippage_tolerance: f64,
}

impl PlanRequest {
    pub fn pool(&self, side: OutcomeSide) -> &PoolSnapshot {
        match side {
            OutcomeSide::Down => &self.down_pool,
            OutcomeSide::Up => &self.up_pool,
        }
    }

    pub fn budget(&self, side: OutcomeSide) -> &LiquidityBudget {
        match side {
            OutcomeSide::Down => &self.down_budget,
            OutcomeSide::Up => &self.up_budget,
        }
    }
}

/// Mint parameters for one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintPlan {
    pub side: OutcomeSide,
    pub token0: Address,
    pub token1: Address,
    pub fee_tier: FeeTier,
    pub tick_range: TickRange,
    pub amount0_desired: U256,
    pub amount1_desired: U256,
    pub amount0_min: U256,
    pub amount1_min: U256,
    /// Present when the pool must be initialized before minting
    pub initialize_sqrt_price_x96: Option<U256>,
    pub allocation: LiquidityAllocation,
}

/// Mint plans for both outcome pools of one market
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProvisionPlan {
    pub ranges: ComplementaryRanges,
    pub down: MintPlan,
    pub up: MintPlan,
}
