//! Main application state and logic for the dashboard

use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Handle;
use tracing::{info, warn};

use super::state::{PriceDirection, PriceFlash, StrikeWindow};
use crate::application::feed::{
    spawn_market_feed, FeedHandle, MarketDataController, SharedSnapshot, SnapshotReceiver,
};
use crate::domain::{GammaLevel, GammaProfileMetrics, Timeframe};
use crate::infrastructure::SimulationConfig;

/// Main application state
pub struct App {
    /// Source of snapshots and target of timeframe changes
    controller: Arc<MarketDataController>,
    /// Repeating tick timer (stopped on drop)
    feed: FeedHandle,
    /// Subscription to snapshot updates
    updates: SnapshotReceiver,
    /// Latest snapshot being rendered
    pub snapshot: SharedSnapshot,
    /// Metrics derived from the latest snapshot
    pub metrics: GammaProfileMetrics,
    /// Header price flash
    pub price_flash: PriceFlash,
    /// Visible strike range of the gamma chart
    pub window: StrikeWindow,
    /// Whether to quit
    pub should_quit: bool,
    /// Status message to show in footer
    pub status_message: Option<String>,
}

impl App {
    /// Create the controller and start its feed on `runtime`
    pub fn initialize(runtime: &Handle, config: SimulationConfig) -> Self {
        let period = config.tick_interval();
        let controller = Arc::new(MarketDataController::new(config));
        let feed = spawn_market_feed(runtime, controller.clone(), period);
        Self::with_feed(controller, feed)
    }

    /// Build the app around an existing controller and feed
    pub fn with_feed(controller: Arc<MarketDataController>, feed: FeedHandle) -> Self {
        let mut updates = controller.subscribe();
        let snapshot = updates.borrow_and_update().clone();

        info!("[Dashboard] Subscribed at {}", snapshot.summary());

        Self {
            controller,
            feed,
            updates,
            metrics: GammaProfileMetrics::from_levels(&snapshot.gamma_levels),
            price_flash: PriceFlash::new(snapshot.spot_price),
            window: StrikeWindow::full(snapshot.gamma_levels.len()),
            snapshot,
            should_quit: false,
            status_message: None,
        }
    }

    /// Pull the latest snapshot if one was published. Returns true on change.
    pub fn refresh(&mut self) -> bool {
        match self.updates.has_changed() {
            Ok(true) => {
                let snapshot = self.updates.borrow_and_update().clone();
                self.apply_snapshot(snapshot, Instant::now());
                true
            }
            Ok(false) => false,
            Err(_) => {
                warn!("[Dashboard] Snapshot channel closed");
                self.should_quit = true;
                false
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: SharedSnapshot, now: Instant) {
        if snapshot.timeframe != self.snapshot.timeframe {
            self.window = StrikeWindow::full(snapshot.gamma_levels.len());
        } else {
            self.window.sync_len(snapshot.gamma_levels.len());
        }

        self.price_flash.observe(snapshot.spot_price, now);
        self.metrics = GammaProfileMetrics::from_levels(&snapshot.gamma_levels);
        self.snapshot = snapshot;
    }

    /// Request a timeframe change and show the result immediately
    pub fn change_timeframe(&mut self, timeframe: Timeframe) {
        self.controller.request_timeframe_change(timeframe);
        self.refresh();
        // The brush always resets on a timeframe request, even for the same bucket
        self.window.reset();
        self.status_message = Some(format!("Timeframe set to {}", timeframe));
    }

    pub fn cycle_timeframe(&mut self) {
        self.change_timeframe(self.snapshot.timeframe.next());
    }

    pub fn zoom_in(&mut self) {
        self.window.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.window.zoom_out();
    }

    pub fn pan_left(&mut self) {
        self.window.pan_left();
    }

    pub fn pan_right(&mut self) {
        self.window.pan_right();
    }

    pub fn reset_zoom(&mut self) {
        self.window.reset();
        self.status_message = None;
    }

    /// Gamma levels inside the current strike window
    pub fn visible_levels(&self) -> &[GammaLevel] {
        self.window.slice(&self.snapshot.gamma_levels)
    }

    pub fn price_direction(&self) -> PriceDirection {
        self.price_flash.direction_at(Instant::now())
    }

    pub fn is_feed_running(&self) -> bool {
        self.feed.is_running()
    }

    /// Stop the tick timer
    pub fn shutdown(&mut self) {
        self.feed.stop();
    }
}
