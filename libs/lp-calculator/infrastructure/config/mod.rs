use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::application::services::range_calculator::RangeCalculator;
use crate::application::services::slippage::tolerance_wad;
use crate::domain::models::{FeeTierTable, PriceRange};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Calculator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Fee tier -> tick spacing; defaults to the canonical deployment
    #[serde(default)]
    pub fee_tiers: FeeTierTable,
    #[serde(default)]
    pub price_range: PriceRangeConfig,
    #[serde(default = "default_slippage_tolerance")]
    pub slippage_tolerance: f64,
}

/// UP-side probability range; DOWN is mirrored from it
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceRangeConfig {
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for PriceRangeConfig {
    fn default() -> Self {
        Self {
            min_price: 0.05,
            max_price: 0.95,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_slippage_tolerance() -> f64 {
    0.01
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            fee_tiers: FeeTierTable::default(),
            price_range: PriceRangeConfig::default(),
            slippage_tolerance: default_slippage_tolerance(),
        }
    }
}

impl CalculatorConfig {
    /// Load configuration from YAML file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&yaml_content)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(yaml_content: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_yaml::from_str(yaml_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        self.fee_tiers
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        self.price_range()?;

        tolerance_wad(self.slippage_tolerance)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        Ok(())
    }

    /// Validated UP-side price range
    pub fn price_range(&self) -> Result<PriceRange> {
        PriceRange::new(self.price_range.min_price, self.price_range.max_price)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Range calculator over the configured fee tiers
    pub fn range_calculator(&self) -> RangeCalculator {
        RangeCalculator::new(self.fee_tiers.clone())
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  Log level: {}", self.log_level);
        info!(
            "  Price range: [{}, {}]",
            self.price_range.min_price, self.price_range.max_price
        );
        info!("  Slippage tolerance: {}%", self.slippage_tolerance * 100.0);
        for (fee, spacing) in self.fee_tiers.iter() {
            info!("  Fee tier {}: tick spacing {}", fee, spacing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::FeeTier;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
log_level: debug
fee_tiers:
  500: 10
  3000: 60
  2500: 50
price_range:
  min_price: 0.2
  max_price: 0.8
slippage_tolerance: 0.005
"#,
        );

        let config = CalculatorConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.fee_tiers.tick_spacing(FeeTier(2500)).unwrap(), 50);
        assert!(config.fee_tiers.tick_spacing(FeeTier(100)).is_err());
        assert_eq!(config.price_range.min_price, 0.2);
        assert_eq!(config.slippage_tolerance, 0.005);

        let range = config.price_range().unwrap();
        assert!((range.initial_price - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_defaults_applied() {
        let config = CalculatorConfig::from_yaml("{}").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.fee_tiers, FeeTierTable::default());
        assert_eq!(config.price_range.min_price, 0.05);
        assert_eq!(config.price_range.max_price, 0.95);
        assert_eq!(config.slippage_tolerance, 0.01);
        assert_eq!(config.range_calculator().tick_spacing(FeeTier(3000)).unwrap(), 60);
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            "log_level: loud",
            "slippage_tolerance: 1.0",
            "price_range: { min_price: 0.9, max_price: 0.1 }",
            "fee_tiers: { 3000: 0 }",
            "fee_tiers: {}",
        ];
        for yaml in cases {
            assert!(
                matches!(
                    CalculatorConfig::from_yaml(yaml),
                    Err(ConfigError::ValidationError(_))
                ),
                "expected validation error for {}",
                yaml
            );
        }
    }

    #[test]
    fn test_missing_file_and_bad_yaml() {
        assert!(matches!(
            CalculatorConfig::load("/nonexistent/calculator_config.yaml"),
            Err(ConfigError::FileError(_))
        ));
        assert!(matches!(
            CalculatorConfig::from_yaml("slippage_tolerance: [1, 2"),
            Err(ConfigError::YamlError(_))
        ));
    }
}
