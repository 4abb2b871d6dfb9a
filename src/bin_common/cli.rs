//! CLI utilities for binaries
//!
//! Handles configuration path resolution and command line arguments
//! for all binary executables.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Calculator configuration (calculator_config.yaml)
    Calculator,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Calculator => "config/calculator_config.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::Calculator => "CALCULATOR_CONFIG_PATH",
            ConfigType::Custom(_) => "CONFIG_PATH",
        }
    }
}

/// Load configuration path from environment or use default
///
/// # Examples
/// ```
/// use scalar_lp_provisioner::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Calculator);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    resolve_config_path(&config_type, |name| std::env::var(name).ok())
}

/// Resolve a config path against an arbitrary variable lookup
///
/// The lookup result wins when present and non-empty, otherwise the config
/// type's default path is used.
pub fn resolve_config_path<F>(config_type: &ConfigType, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(config_type.env_var_name())
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}
