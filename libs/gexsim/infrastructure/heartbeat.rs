//! Heartbeat logging for long-running processes

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Tracks heartbeat intervals for periodic status logging
pub struct Heartbeat {
    interval: Duration,
    last_beat: DateTime<Utc>,
}

impl Heartbeat {
    /// Create a new heartbeat with the given interval in seconds
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval: Duration::from_secs(interval_secs),
            last_beat: Utc::now(),
        }
    }

    /// Check if enough time has passed since the last beat
    pub fn should_beat(&self) -> bool {
        self.should_beat_at(Utc::now())
    }

    fn should_beat_at(&self, now: DateTime<Utc>) -> bool {
        let elapsed = now.signed_duration_since(self.last_beat);
        elapsed.to_std().unwrap_or_default() >= self.interval
    }

    /// Record a heartbeat at the current time
    pub fn beat(&mut self) {
        self.last_beat = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heartbeat_due_after_interval() {
        let heartbeat = Heartbeat::new(30);
        let start = heartbeat.last_beat;

        assert!(!heartbeat.should_beat_at(start + chrono::Duration::seconds(29)));
        assert!(heartbeat.should_beat_at(start + chrono::Duration::seconds(30)));
    }

    #[test]
    fn test_clock_going_backwards_is_not_due() {
        let heartbeat = Heartbeat::new(1);
        let earlier = heartbeat.last_beat - chrono::Duration::seconds(10);
        assert!(!heartbeat.should_beat_at(earlier));
    }

    #[test]
    fn test_beat_restarts_interval() {
        let mut heartbeat = Heartbeat::new(30);
        heartbeat.last_beat -= chrono::Duration::seconds(45);
        assert!(heartbeat.should_beat());

        heartbeat.beat();
        assert!(!heartbeat.should_beat());
        assert!(heartbeat.should_beat_at(heartbeat.last_beat + chrono::Duration::seconds(30)));
    }
}
