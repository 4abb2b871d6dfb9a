//! Canonical token ordering
//!
//! Pools store their tokens sorted by address. Addresses are normalized once,
//! when parsed into 20-byte values; from then on ordering is a byte
//! comparison, which matches comparing lowercase hex strings.

use ethers::types::Address;

use crate::domain::errors::{CalculatorError, Result};
use crate::domain::models::{TokenInfo, TokenPair};

/// Parse a hex address in any letter case, with or without `0x`
pub fn parse_address(value: &str) -> Result<Address> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != 40 {
        return Err(CalculatorError::validation(format!(
            "address '{}' must have 40 hex digits",
            value
        )));
    }

    let bytes = hex::decode(digits)
        .map_err(|e| CalculatorError::validation(format!("invalid address '{}': {}", value, e)))?;

    Ok(Address::from_slice(&bytes))
}

/// Order two distinct addresses as (token0, token1)
pub fn sort_tokens(a: Address, b: Address) -> Result<(Address, Address)> {
    if a == b {
        return Err(CalculatorError::validation(format!(
            "pool tokens must differ, got {:?} twice",
            a
        )));
    }

    if a < b {
        Ok((a, b))
    } else {
        Ok((b, a))
    }
}

pub fn is_token0_outcome(token0: Address, outcome: Address) -> bool {
    token0 == outcome
}

/// Build the canonical pair for an outcome/collateral pool
pub fn resolve_pair(outcome: TokenInfo, collateral: TokenInfo) -> Result<TokenPair> {
    let (token0, token1) = sort_tokens(outcome.address, collateral.address)?;
    let is_token0_outcome = is_token0_outcome(token0, outcome.address);

    let (decimals0, decimals1) = if is_token0_outcome {
        (outcome.decimals, collateral.decimals)
    } else {
        (collateral.decimals, outcome.decimals)
    };

    Ok(TokenPair {
        token0,
        token1,
        decimals0,
        decimals1,
        is_token0_outcome,
    })
}

impl TokenPair {
    /// Canonical pair for an outcome token trading against `collateral`
    pub fn for_outcome(outcome: TokenInfo, collateral: TokenInfo) -> Result<Self> {
        resolve_pair(outcome, collateral)
    }
}
