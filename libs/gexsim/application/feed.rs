//! Market Data Feed
//!
//! [`MarketDataController`] owns the single live snapshot and publishes every
//! replacement through a `watch` channel. [`spawn_market_feed`] drives it with
//! one repeating timer and hands back a [`FeedHandle`] that stops the timer
//! when it is dropped.
//!
//! ## Usage
//!
//! ```ignore
//! let controller = Arc::new(MarketDataController::new(config.simulation.clone()));
//! let mut updates = controller.subscribe();
//! let feed = spawn_market_feed(&Handle::current(), controller.clone(), config.simulation.tick_interval());
//!
//! while updates.changed().await.is_ok() {
//!     let snapshot = updates.borrow_and_update().clone();
//!     // render
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use super::simulator::MarketSimulator;
use crate::domain::{MarketSnapshot, Timeframe};
use crate::infrastructure::SimulationConfig;

/// Snapshot as handed to subscribers
pub type SharedSnapshot = Arc<MarketSnapshot>;

/// Receiving side of the snapshot subscription
pub type SnapshotReceiver = watch::Receiver<SharedSnapshot>;

/// Owns the simulator and the live snapshot
pub struct MarketDataController {
    /// Held while a new snapshot is computed and published so that ticks and
    /// timeframe changes never interleave
    simulator: Mutex<MarketSimulator<StdRng>>,
    sender: watch::Sender<SharedSnapshot>,
}

impl MarketDataController {
    pub fn new(config: SimulationConfig) -> Self {
        let timeframe = config.initial_timeframe;
        Self::with_simulator(MarketSimulator::from_config(config), timeframe)
    }

    pub fn with_simulator(mut simulator: MarketSimulator<StdRng>, timeframe: Timeframe) -> Self {
        let initial = simulator.initialize(timeframe);
        info!("[MarketFeed] Initialized {}", initial.summary());

        let (sender, _) = watch::channel(Arc::new(initial));
        Self {
            simulator: Mutex::new(simulator),
            sender,
        }
    }

    /// Subscribe to snapshot updates. The receiver starts at the current snapshot.
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.sender.subscribe()
    }

    /// The latest published snapshot
    pub fn current(&self) -> SharedSnapshot {
        self.sender.borrow().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Advance the simulation by one step and publish the result
    pub fn tick(&self) -> SharedSnapshot {
        let mut simulator = self.simulator.lock();
        let next = Arc::new(simulator.tick(&self.current()));
        debug!("[MarketFeed] Tick {}", next.summary());
        self.sender.send_replace(next.clone());
        next
    }

    /// Regenerate the gamma profile for `timeframe` and publish the result.
    ///
    /// Requesting the current timeframe still regenerates the levels.
    pub fn request_timeframe_change(&self, timeframe: Timeframe) -> SharedSnapshot {
        let mut simulator = self.simulator.lock();
        let current = self.current();
        let next = Arc::new(simulator.set_timeframe(&current, timeframe));
        info!(
            "[MarketFeed] Timeframe {} -> {} ({} levels)",
            current.timeframe,
            timeframe,
            next.gamma_levels.len()
        );
        self.sender.send_replace(next.clone());
        next
    }
}

/// Handle to the repeating tick task.
///
/// Dropping the handle stops the timer.
pub struct FeedHandle {
    running: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl FeedHandle {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire) && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop ticking immediately
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
            info!("[MarketFeed] Feed stopped");
        }
    }

    /// Stop the timer and wait for the task to wind down
    pub async fn shutdown(mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            info!("[MarketFeed] Feed shut down");
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn the repeating timer that ticks `controller` every `period`.
///
/// The first tick happens one full period after spawning.
pub fn spawn_market_feed(
    runtime: &Handle,
    controller: Arc<MarketDataController>,
    period: Duration,
) -> FeedHandle {
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();

    let task = runtime.spawn(async move {
        info!("[MarketFeed] Feed started (interval: {}ms)", period.as_millis());

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // interval() completes its first tick immediately
        ticker.tick().await;

        while flag.load(Ordering::Acquire) {
            ticker.tick().await;
            if !flag.load(Ordering::Acquire) {
                break;
            }
            controller.tick();
        }
    });

    FeedHandle {
        running,
        task: Some(task),
    }
}
