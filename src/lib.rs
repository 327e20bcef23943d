//! GEX Dashboard - Main Library
//!
//! Simulated gamma-exposure market data with a terminal dashboard.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, runners)
//! - **gexsim**: Simulator, feed controller and dashboard (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use gex_dashboard::bin_common::{load_config_from_env, ConfigType};
//! use gex_dashboard::gexsim::MarketDataController;
//! ```

// Re-export workspace libraries for convenience
pub use gexsim;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{load_config_from_env, parse_args, ConfigType};
    pub use runner::{BinaryRunner, RunConfig};
}
