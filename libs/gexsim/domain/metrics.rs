//! Derived gamma-profile statistics shown on the metric cards

use super::models::GammaLevel;

/// Aggregates computed over a gamma profile
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GammaProfileMetrics {
    pub total_call_gamma: f64,
    pub total_put_gamma: f64,
    pub net_gamma: f64,
    /// Strike where cumulative net gamma changes sign (interpolated)
    pub zero_gamma: Option<f64>,
    /// Strike carrying the largest call exposure
    pub call_wall: Option<u32>,
    /// Strike carrying the largest (most negative) put exposure
    pub put_wall: Option<u32>,
}

impl GammaProfileMetrics {
    pub fn from_levels(levels: &[GammaLevel]) -> Self {
        let total_call_gamma: f64 = levels.iter().map(|l| l.call_gamma).sum();
        let total_put_gamma: f64 = levels.iter().map(|l| l.put_gamma).sum();

        let call_wall = levels
            .iter()
            .max_by(|a, b| a.call_gamma.total_cmp(&b.call_gamma))
            .map(|l| l.strike);
        let put_wall = levels
            .iter()
            .min_by(|a, b| a.put_gamma.total_cmp(&b.put_gamma))
            .map(|l| l.strike);

        Self {
            total_call_gamma,
            total_put_gamma,
            net_gamma: total_call_gamma + total_put_gamma,
            zero_gamma: zero_gamma_strike(levels),
            call_wall,
            put_wall,
        }
    }

    pub fn is_net_long(&self) -> bool {
        self.net_gamma > 0.0
    }
}

/// Find the first strike at which cumulative net gamma crosses zero
fn zero_gamma_strike(levels: &[GammaLevel]) -> Option<f64> {
    let mut cumulative = 0.0;
    let mut prev: Option<(f64, f64)> = None;

    for level in levels {
        cumulative += level.net_gamma();
        let strike = level.strike as f64;

        if cumulative == 0.0 {
            return Some(strike);
        }

        if let Some((prev_strike, prev_cum)) = prev {
            if prev_cum * cumulative < 0.0 {
                let fraction = -prev_cum / (cumulative - prev_cum);
                return Some(prev_strike + (strike - prev_strike) * fraction);
            }
        }

        prev = Some((strike, cumulative));
    }

    None
}
