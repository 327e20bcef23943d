//! GEX Simulator
//!
//! Simulated gamma-exposure market data and a terminal dashboard for it.

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used items
pub use application::{
    spawn_market_feed, FeedHandle, MarketDataController, MarketSimulator, SharedSnapshot,
    SnapshotReceiver,
};
pub use domain::{GammaLevel, GammaProfileMetrics, MarketSnapshot, MarketStatus, Regime, Timeframe};
pub use infrastructure::{
    init_file_tracing, init_stderr_tracing, init_tracing, ConfigError, DashboardConfig, Heartbeat, ShutdownManager,
    SimulationConfig,
};
