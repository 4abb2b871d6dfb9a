//! Common test utilities for calculator integration tests

#![allow(dead_code)]

pub mod fixtures {
    //! Test fixtures for markets, pools and allocation parameters

    use ethers::types::{Address, U256};
    use lp_calculator::application::AllocationParams;
    use lp_calculator::domain::{FeeTier, PoolSnapshot, ScalarMarket, TickRange, TokenInfo};

    pub const COLLATERAL: &str = "0x2791bca1f2de4661ed88a30c99a7a9449aa84174";
    pub const DOWN_TOKEN: &str = "0x1111111111111111111111111111111111111111";
    pub const UP_TOKEN: &str = "0xf00df00df00df00df00df00df00df00df00df00d";

    /// Whole tokens in 18-decimal base units
    pub fn e18(n: u64) -> U256 {
        U256::from(n) * U256::exp10(18)
    }

    pub fn address(value: &str) -> Address {
        lp_calculator::application::parse_address(value).unwrap()
    }

    /// DOWN sorts before the collateral, UP after it
    pub fn market(collateral_decimals: u8) -> ScalarMarket {
        ScalarMarket {
            collateral: TokenInfo::new(address(COLLATERAL), collateral_decimals),
            down: TokenInfo::new(address(DOWN_TOKEN), 18),
            up: TokenInfo::new(address(UP_TOKEN), 18),
        }
    }

    pub fn pool(current_tick: i32, liquidity: u128) -> PoolSnapshot {
        PoolSnapshot {
            current_tick,
            tick_spacing: 60,
            liquidity,
            fee_tier: FeeTier(3000),
        }
    }

    /// 0.05..0.95 at fee 3000 with the outcome in slot 0
    pub fn params(current_tick: i32) -> AllocationParams {
        AllocationParams {
            current_tick,
            tick_range: TickRange { lower: -30000, upper: -480 },
            is_token0_outcome: true,
            tick_spacing: 60,
            decimals0: 18,
            decimals1: 18,
            fee_tier: FeeTier(3000),
        }
    }
}
