//! Scalar LP Provisioner - Main Library
//!
//! Range and allocation planning for the DOWN/UP outcome pools of scalar
//! prediction markets.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI)
//! - **lp_calculator**: Calculator library (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use scalar_lp_provisioner::bin_common::{load_config_from_env, ConfigType};
//! use scalar_lp_provisioner::lp_calculator::application::PositionPlanner;
//! ```

// Re-export workspace libraries for convenience
pub use lp_calculator;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;

    pub use cli::{load_config_from_env, parse_args, resolve_config_path, ConfigType};
}
