//! Domain Layer
//!
//! Plain market data types and the pure calculations derived from them.
//! Depends on nothing else in the crate.

pub mod metrics;
pub mod models;

pub use metrics::GammaProfileMetrics;
pub use models::{
    GammaLevel, MarketSnapshot, MarketStatus, ParseTimeframeError, Regime, Timeframe,
    ALTCOIN_SEASON_THRESHOLD, BITCOIN_SEASON_THRESHOLD,
};
