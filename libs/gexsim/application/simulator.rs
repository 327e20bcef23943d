//! Market data simulator
//!
//! Produces and evolves [`MarketSnapshot`]s with a bounded random walk.
//! Every operation takes the previous snapshot by reference and returns a
//! new one; nothing is mutated in place.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{GammaLevel, MarketSnapshot, Regime, Timeframe};
use crate::infrastructure::SimulationConfig;

/// Bell-curve weight for strike index `index` out of `count`
pub fn envelope(index: usize, count: usize) -> f64 {
    let center = (count / 2) as f64;
    let distance = (index as f64 - center).abs();
    (-(distance * distance) / (count as f64 * 1.5)).exp()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub struct MarketSimulator<R: Rng> {
    rng: R,
    config: SimulationConfig,
}

impl MarketSimulator<StdRng> {
    /// Build a simulator seeded from the config, or from OS entropy when no seed is set
    pub fn from_config(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, config)
    }
}

impl<R: Rng> MarketSimulator<R> {
    pub fn new(rng: R, config: SimulationConfig) -> Self {
        Self { rng, config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Create the first snapshot of a feed
    pub fn initialize(&mut self, timeframe: Timeframe) -> MarketSnapshot {
        let flow_dominance = self.config.initial_flow_dominance.min(100);

        MarketSnapshot {
            spot_price: self.config.initial_spot_price,
            gamma_levels: self.generate_gamma(timeframe),
            flow_dominance,
            status: self.config.status,
            regime: Regime::from_flow(flow_dominance),
            timeframe,
            sequence: 0,
        }
    }

    /// Generate a fresh gamma profile for `timeframe`.
    ///
    /// Strikes run `1..=count`; values follow a bell envelope centred on
    /// the middle strike plus a constant floor.
    pub fn generate_gamma(&mut self, timeframe: Timeframe) -> Vec<GammaLevel> {
        let count = timeframe.strike_count();
        let magnitude = timeframe.magnitude();
        let floor = self.config.gamma_floor_offset;

        (0..count)
            .map(|i| {
                let weight = envelope(i, count);
                let call = self.rng.gen::<f64>() * magnitude * weight + floor;
                let put = self.rng.gen::<f64>() * magnitude * weight + floor;

                GammaLevel {
                    strike: (i + 1) as u32,
                    call_gamma: call,
                    put_gamma: -put,
                }
            })
            .collect()
    }

    /// Apply one step of the random walk
    pub fn tick(&mut self, snapshot: &MarketSnapshot) -> MarketSnapshot {
        let cfg = &self.config;
        let rng = &mut self.rng;

        let price_change = (rng.gen::<f64>() - 0.5) * cfg.price_step;
        let spot_price = round_cents(
            (snapshot.spot_price + price_change).clamp(cfg.price_floor, cfg.price_ceiling),
        );

        let gamma_step = cfg.gamma_step;
        let gamma_levels = snapshot
            .gamma_levels
            .iter()
            .map(|level| GammaLevel {
                strike: level.strike,
                call_gamma: (level.call_gamma + (rng.gen::<f64>() - 0.5) * gamma_step).max(0.0),
                put_gamma: (level.put_gamma + (rng.gen::<f64>() - 0.5) * gamma_step).min(0.0),
            })
            .collect();

        let flow_change = ((rng.gen::<f64>() - 0.5) * cfg.flow_step).floor() as i32;
        let flow_dominance = (snapshot.flow_dominance as i32 + flow_change).clamp(0, 100) as u8;

        let regime = if cfg.derive_regime {
            Regime::from_flow(flow_dominance)
        } else {
            snapshot.regime
        };

        MarketSnapshot {
            spot_price,
            gamma_levels,
            flow_dominance,
            status: snapshot.status,
            regime,
            timeframe: snapshot.timeframe,
            sequence: snapshot.sequence + 1,
        }
    }

    /// Regenerate the gamma profile for a new timeframe, keeping every other field
    pub fn set_timeframe(&mut self, snapshot: &MarketSnapshot, timeframe: Timeframe) -> MarketSnapshot {
        MarketSnapshot {
            gamma_levels: self.generate_gamma(timeframe),
            timeframe,
            ..snapshot.clone()
        }
    }
}
