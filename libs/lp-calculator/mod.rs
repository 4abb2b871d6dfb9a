//! Scalar-market liquidity calculator
//!
//! Computes concentrated-liquidity positions for the two outcome pools
//! (DOWN/collateral and UP/collateral) of a scalar prediction market:
//! complementary probability ranges, spacing-aligned tick bounds, token
//! allocations backed by a single liquidity value, and slippage minimums.
//!
//! Everything is a pure function of caller-supplied pool snapshots. Chain
//! reads and transaction submission live elsewhere.
//!
//! ## Layers
//!
//! - **domain**: models, plans and errors
//! - **math**: tick ladder, price conversion and liquidity formulas
//! - **application**: calculators and the position planner
//! - **infrastructure**: configuration and logging

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod math;

pub use application::{
    calculate_complementary_ranges, calculate_liquidity_from_fixed_tokens,
    calculate_min_amounts, calculate_token_amounts_for_liquidity, clamp_to_supply,
    compute_unconstrained, resolve_pair, AllocationParams, PositionPlanner, RangeCalculator,
};
pub use domain::*;
