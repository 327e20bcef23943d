//! Infrastructure Layer
//!
//! Configuration loading, logging setup and process lifecycle helpers.

pub mod config;
pub mod heartbeat;
pub mod logging;
pub mod shutdown;

pub use config::{ConfigError, DashboardConfig, SimulationConfig, SEED_ENV_VAR};
pub use heartbeat::Heartbeat;
pub use logging::{init_file_tracing, init_stderr_tracing, init_tracing};
pub use shutdown::ShutdownManager;
