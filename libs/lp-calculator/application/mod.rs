//! Application Layer
//!
//! Range, allocation and slippage services plus the planner that combines
//! them into mint plans for both outcome pools of a market.

pub mod planner;
pub mod services;

pub use planner::{initial_sqrt_price_x96, PositionPlanner};
pub use services::*;
