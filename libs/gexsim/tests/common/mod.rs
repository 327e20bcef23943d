//! Shared helpers for integration tests

#![allow(dead_code)]

use gexsim::{MarketSimulator, SimulationConfig};
use rand::rngs::StdRng;

pub fn seeded_config(seed: u64) -> SimulationConfig {
    SimulationConfig::default().with_seed(seed)
}

pub fn seeded_simulator(seed: u64) -> MarketSimulator<StdRng> {
    MarketSimulator::from_config(seeded_config(seed))
}

/// Config with a short tick period for timer tests
pub fn fast_config(seed: u64, tick_interval_ms: u64) -> SimulationConfig {
    SimulationConfig {
        tick_interval_ms,
        ..seeded_config(seed)
    }
}
