//! Domain Layer
//!
//! Core business types: ticks, price ranges, pools, token pairs, budgets
//! and the allocations and plans computed from them.

pub mod errors;
pub mod models;
pub mod plan;

pub use errors::{CalculatorError, Result};
pub use models::{
    ComplementaryRanges, FeeTier, FeeTierTable, LiquidityAllocation, LiquidityBudget, MinAmounts,
    PoolSnapshot, PriceRange, SupplyLimits, Tick, TickRange, TokenInfo, TokenPair,
};
pub use plan::{MintPlan, OutcomeSide, PlanRequest, ProvisionPlan, ScalarMarket};
