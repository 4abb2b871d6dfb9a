//! Calculator services
//!
//! Stateless building blocks the planner composes: token ordering, tick
//! range derivation, liquidity allocation and slippage minimums.

pub mod allocator;
pub mod range_calculator;
pub mod slippage;
pub mod token_order;

pub use allocator::{
    amounts_for_allocation, calculate_liquidity_from_fixed_tokens,
    calculate_token_amounts_for_liquidity, clamp_to_supply, compute_unconstrained,
    AllocationParams,
};
pub use range_calculator::{calculate_complementary_ranges, RangeCalculator};
pub use slippage::{calculate_min_amounts, tolerance_wad};
pub use token_order::{is_token0_outcome, parse_address, resolve_pair, sort_tokens};
