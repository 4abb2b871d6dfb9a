//! Calculator error types

use thiserror::Error;

/// Errors raised by the range & allocation calculator.
///
/// Every variant is a rejected input: the calculator is pure, so there is
/// nothing to retry and no partial result is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    /// Malformed price range, tolerance, address or budget
    #[error("Validation error: {0}")]
    Validation(String),

    /// Tick bounds collapse, are misaligned, or leave the tick ladder
    #[error("Range error: {0}")]
    Range(String),

    /// Fee tier without a tick-spacing mapping
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalculatorError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CalculatorError::Validation(msg.into())
    }

    pub fn range(msg: impl Into<String>) -> Self {
        CalculatorError::Range(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        CalculatorError::Config(msg.into())
    }
}

/// Result type for calculator operations
pub type Result<T> = std::result::Result<T, CalculatorError>;
