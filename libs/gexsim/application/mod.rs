//! Application Layer
//!
//! The simulator, the controller that publishes its snapshots, and the
//! dashboard that consumes them.

pub mod feed;
pub mod simulator;
pub mod visualizer;

pub use feed::{spawn_market_feed, FeedHandle, MarketDataController, SharedSnapshot, SnapshotReceiver};
pub use simulator::MarketSimulator;
pub use visualizer::App;
