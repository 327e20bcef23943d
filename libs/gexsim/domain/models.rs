//! Market snapshot types shared by the simulator and its subscribers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Flow at or above this level is classified as altcoin season
pub const ALTCOIN_SEASON_THRESHOLD: u8 = 60;
/// Flow at or below this level is classified as bitcoin season
pub const BITCOIN_SEASON_THRESHOLD: u8 = 40;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown timeframe '{0}' (expected 30D, 60D or 90D)")]
pub struct ParseTimeframeError(pub String);

/// Bucket selecting the density and magnitude of the simulated gamma curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "30D")]
    Days30,
    #[serde(rename = "60D")]
    Days60,
    #[serde(rename = "90D")]
    Days90,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Days30, Timeframe::Days60, Timeframe::Days90];

    /// Number of strikes generated for this timeframe
    pub fn strike_count(&self) -> usize {
        match self {
            Timeframe::Days30 => 30,
            Timeframe::Days60 => 60,
            Timeframe::Days90 => 90,
        }
    }

    /// Peak magnitude of the gamma envelope
    pub fn magnitude(&self) -> f64 {
        match self {
            Timeframe::Days30 => 6.0,
            Timeframe::Days60 => 9.0,
            Timeframe::Days90 => 12.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Days30 => "30D",
            Timeframe::Days60 => "60D",
            Timeframe::Days90 => "90D",
        }
    }

    /// Next timeframe in display order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Timeframe::Days30 => Timeframe::Days60,
            Timeframe::Days60 => Timeframe::Days90,
            Timeframe::Days90 => Timeframe::Days30,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    /// Accepts "30D", "30d" or a bare "30"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let days = trimmed
            .strip_suffix('D')
            .or_else(|| trimmed.strip_suffix('d'))
            .unwrap_or(trimmed);

        match days {
            "30" => Ok(Timeframe::Days30),
            "60" => Ok(Timeframe::Days60),
            "90" => Ok(Timeframe::Days90),
            _ => Err(ParseTimeframeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketStatus {
    #[default]
    Open,
    Closed,
    Halted,
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarketStatus::Open => "OPEN",
            MarketStatus::Closed => "CLOSED",
            MarketStatus::Halted => "HALTED",
        };
        f.write_str(s)
    }
}

/// Coarse market-mood classification derived from flow dominance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Regime {
    AltcoinSeason,
    BitcoinSeason,
    Transition,
}

impl Regime {
    /// Classify a flow dominance reading
    pub fn from_flow(flow_dominance: u8) -> Self {
        if flow_dominance >= ALTCOIN_SEASON_THRESHOLD {
            Regime::AltcoinSeason
        } else if flow_dominance <= BITCOIN_SEASON_THRESHOLD {
            Regime::BitcoinSeason
        } else {
            Regime::Transition
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Regime::AltcoinSeason => "ALTCOIN_SEASON",
            Regime::BitcoinSeason => "BITCOIN_SEASON",
            Regime::Transition => "TRANSITION",
        };
        f.write_str(s)
    }
}

/// Simulated exposure at a single strike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaLevel {
    pub strike: u32,
    /// Always >= 0
    pub call_gamma: f64,
    /// Always <= 0
    pub put_gamma: f64,
}

impl GammaLevel {
    pub fn net_gamma(&self) -> f64 {
        self.call_gamma + self.put_gamma
    }
}

/// One complete, immutable view of the simulated market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub spot_price: f64,
    pub gamma_levels: Vec<GammaLevel>,
    pub flow_dominance: u8,
    pub status: MarketStatus,
    pub regime: Regime,
    pub timeframe: Timeframe,
    /// Ticks applied since the snapshot was first created
    pub sequence: u64,
}

/// Strike spacing used when placing the spot marker on the strike axis
pub const SPOT_MARKER_STEP: f64 = 10.0;

impl MarketSnapshot {
    /// Strike the spot marker sits on: spot rounded to the nearest
    /// `SPOT_MARKER_STEP`. May fall outside the generated strike range.
    pub fn spot_strike(&self) -> u32 {
        ((self.spot_price / SPOT_MARKER_STEP).round() * SPOT_MARKER_STEP).max(0.0) as u32
    }

    /// Short one-line description used by log output
    pub fn summary(&self) -> String {
        format!(
            "#{} spot={:.2} flow={}% regime={} tf={} levels={}",
            self.sequence,
            self.spot_price,
            self.flow_dominance,
            self.regime,
            self.timeframe,
            self.gamma_levels.len()
        )
    }
}
