//! State management for the dashboard

use std::time::{Duration, Instant};

/// How long a price move stays highlighted
pub const FLASH_DURATION: Duration = Duration::from_millis(300);

/// Number of strikes trimmed from each side per zoom step
const ZOOM_STEP: usize = 2;
/// Zooming in stops at this many visible strikes
const MIN_VISIBLE_STRIKES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDirection {
    Up,
    Down,
    Neutral,
}

impl PriceDirection {
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            PriceDirection::Up
        } else if current < previous {
            PriceDirection::Down
        } else {
            PriceDirection::Neutral
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            PriceDirection::Up => "▲",
            PriceDirection::Down => "▼",
            PriceDirection::Neutral => " ",
        }
    }
}

/// Tracks the direction of the last spot move for the header flash
#[derive(Debug, Clone)]
pub struct PriceFlash {
    last_price: f64,
    direction: PriceDirection,
    changed_at: Option<Instant>,
}

impl PriceFlash {
    pub fn new(price: f64) -> Self {
        Self {
            last_price: price,
            direction: PriceDirection::Neutral,
            changed_at: None,
        }
    }

    /// Record a new price. Unchanged prices leave the current flash alone.
    pub fn observe(&mut self, price: f64, now: Instant) {
        let direction = PriceDirection::between(self.last_price, price);
        if direction != PriceDirection::Neutral {
            self.direction = direction;
            self.changed_at = Some(now);
        }
        self.last_price = price;
    }

    /// Direction to display at `now`; reverts to neutral once the flash expires
    pub fn direction_at(&self, now: Instant) -> PriceDirection {
        match self.changed_at {
            Some(at) if now.saturating_duration_since(at) < FLASH_DURATION => self.direction,
            _ => PriceDirection::Neutral,
        }
    }
}

/// Visible range of strike indices (the chart brush).
///
/// Both ends are inclusive indices into the gamma levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeWindow {
    pub start: usize,
    pub end: usize,
    len: usize,
}

impl StrikeWindow {
    /// Window covering all `len` levels
    pub fn full(len: usize) -> Self {
        Self {
            start: 0,
            end: len.saturating_sub(1),
            len,
        }
    }

    pub fn level_count(&self) -> usize {
        self.len
    }

    pub fn visible_count(&self) -> usize {
        if self.len == 0 {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn is_full(&self) -> bool {
        self.start == 0 && self.end + 1 >= self.len
    }

    /// Reset to the full range when the level count differs
    pub fn sync_len(&mut self, len: usize) {
        if len != self.len {
            *self = Self::full(len);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::full(self.len);
    }

    pub fn zoom_in(&mut self) {
        if self.visible_count() >= MIN_VISIBLE_STRIKES + 2 * ZOOM_STEP {
            self.start += ZOOM_STEP;
            self.end -= ZOOM_STEP;
        }
    }

    pub fn zoom_out(&mut self) {
        if self.len == 0 {
            return;
        }
        self.start = self.start.saturating_sub(ZOOM_STEP);
        self.end = (self.end + ZOOM_STEP).min(self.len - 1);
    }

    pub fn pan_left(&mut self) {
        let shift = self.start.min(ZOOM_STEP);
        self.start -= shift;
        self.end -= shift;
    }

    pub fn pan_right(&mut self) {
        if self.len == 0 {
            return;
        }
        let shift = (self.len - 1 - self.end).min(ZOOM_STEP);
        self.start += shift;
        self.end += shift;
    }

    /// Visible slice of `items`, clamped to its length
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if items.is_empty() || self.start >= items.len() {
            return &[];
        }
        let end = self.end.min(items.len() - 1);
        &items[self.start..=end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_direction() {
        assert_eq!(PriceDirection::between(75.0, 75.5), PriceDirection::Up);
        assert_eq!(PriceDirection::between(75.0, 74.5), PriceDirection::Down);
        assert_eq!(PriceDirection::between(75.0, 75.0), PriceDirection::Neutral);
    }

    #[test]
    fn test_flash_expires() {
        let start = Instant::now();
        let mut flash = PriceFlash::new(75.0);
        assert_eq!(flash.direction_at(start), PriceDirection::Neutral);

        flash.observe(75.4, start);
        assert_eq!(flash.direction_at(start + Duration::from_millis(100)), PriceDirection::Up);
        assert_eq!(flash.direction_at(start + FLASH_DURATION), PriceDirection::Neutral);

        flash.observe(75.1, start + Duration::from_millis(400));
        assert_eq!(flash.direction_at(start + Duration::from_millis(450)), PriceDirection::Down);
    }

    #[test]
    fn test_unchanged_price_keeps_flash() {
        let start = Instant::now();
        let mut flash = PriceFlash::new(75.0);
        flash.observe(74.0, start);
        flash.observe(74.0, start + Duration::from_millis(50));
        assert_eq!(flash.direction_at(start + Duration::from_millis(100)), PriceDirection::Down);
    }

    #[test]
    fn test_window_zoom_and_pan() {
        let mut window = StrikeWindow::full(30);
        assert!(window.is_full());
        assert_eq!(window.visible_count(), 30);

        window.zoom_in();
        assert_eq!((window.start, window.end), (2, 27));

        window.pan_right();
        assert_eq!((window.start, window.end), (4, 29));
        window.pan_right();
        assert_eq!((window.start, window.end), (4, 29));

        window.pan_left();
        window.pan_left();
        window.pan_left();
        assert_eq!((window.start, window.end), (0, 25));

        window.zoom_out();
        assert_eq!((window.start, window.end), (0, 27));
        window.reset();
        assert!(window.is_full());
    }

    #[test]
    fn test_zoom_in_stops_at_minimum() {
        let mut window = StrikeWindow::full(30);
        for _ in 0..50 {
            window.zoom_in();
        }
        assert!(window.visible_count() >= MIN_VISIBLE_STRIKES);
        assert!(window.start <= window.end);
    }

    #[test]
    fn test_sync_len_resets_on_change() {
        let mut window = StrikeWindow::full(30);
        window.zoom_in();
        window.sync_len(30);
        assert!(!window.is_full());

        window.sync_len(90);
        assert_eq!((window.start, window.end), (0, 89));
    }

    #[test]
    fn test_slice_clamps() {
        let items: Vec<u32> = (1..=10).collect();
        let mut window = StrikeWindow::full(10);
        window.zoom_in();
        assert_eq!(window.slice(&items), &[3, 4, 5, 6, 7, 8]);

        let short: Vec<u32> = (1..=4).collect();
        assert_eq!(window.slice(&short), &[3, 4]);

        let empty = StrikeWindow::full(0);
        assert_eq!(empty.visible_count(), 0);
        assert!(empty.slice::<u32>(&[]).is_empty());
    }
}
