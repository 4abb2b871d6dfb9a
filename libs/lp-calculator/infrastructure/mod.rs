//! Infrastructure Layer
//!
//! YAML configuration and tracing setup for binaries embedding the
//! calculator.

pub mod config;
pub mod logging;

pub use config::{CalculatorConfig, ConfigError, PriceRangeConfig};
pub use logging::init_tracing;
