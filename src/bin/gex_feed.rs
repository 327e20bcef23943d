//! GEX Feed - headless subscriber to the simulated market
//!
//! Logs a summary of every snapshot, or prints each snapshot as a JSON line
//! with `--json`. Stops on Ctrl+C.
//!
//! Usage: gex-feed [--config path.yaml] [--timeframe 60D] [--json]

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Handle;
use tracing::info;

use gex_dashboard::bin_common::{
    cli, load_config_from_env, parse_args, BinaryRunner, ConfigType, RunConfig,
};
use gex_dashboard::gexsim::{
    init_stderr_tracing, init_tracing, spawn_market_feed, DashboardConfig, GammaProfileMetrics, Heartbeat,
    MarketDataController, MarketSnapshot, ShutdownManager, Timeframe,
};

struct FeedRunner {
    run_config: RunConfig,
    config: DashboardConfig,
    timeframe: Option<Timeframe>,
    json: bool,
    shutdown: ShutdownManager,
    snapshots_seen: u64,
}

impl FeedRunner {
    fn emit(&self, snapshot: &MarketSnapshot) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(snapshot)?);
        } else {
            info!("[Feed] {}", snapshot.summary());
        }
        Ok(())
    }

    fn log_heartbeat(&self, snapshot: &MarketSnapshot) {
        let metrics = GammaProfileMetrics::from_levels(&snapshot.gamma_levels);
        info!(
            "[Feed] Heartbeat: {} snapshots | net GEX {:+.2}B | zero gamma {} | call wall {:?} | put wall {:?}",
            self.snapshots_seen,
            metrics.net_gamma,
            metrics
                .zero_gamma
                .map(|s| format!("{:.1}", s))
                .unwrap_or_else(|| "-".to_string()),
            metrics.call_wall,
            metrics.put_wall,
        );
    }
}

impl BinaryRunner for FeedRunner {
    async fn run(&mut self) -> Result<()> {
        self.shutdown.spawn_signal_handler();

        let controller = Arc::new(MarketDataController::new(self.config.simulation.clone()));
        if let Some(timeframe) = self.timeframe {
            controller.request_timeframe_change(timeframe);
        }

        let mut updates = controller.subscribe();
        let feed = spawn_market_feed(
            &Handle::current(),
            controller.clone(),
            self.config.simulation.tick_interval(),
        );

        let mut heartbeat = Heartbeat::new(self.run_config.heartbeat_interval_secs);
        let initial = updates.borrow_and_update().clone();
        self.emit(&initial)?;

        loop {
            tokio::select! {
                _ = self.shutdown.wait() => break,
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = updates.borrow_and_update().clone();
                    self.snapshots_seen += 1;
                    self.emit(&snapshot)?;

                    if heartbeat.should_beat() {
                        self.log_heartbeat(&snapshot);
                        heartbeat.beat();
                    }
                }
            }
        }

        feed.shutdown().await;
        Ok(())
    }

    fn config(&self) -> &RunConfig {
        &self.run_config
    }

    fn stats(&self) -> Option<String> {
        Some(format!("Snapshots received: {}", self.snapshots_seen))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = parse_args();
    let config_type = match cli::flag_value(&args, "--config") {
        Some(path) => ConfigType::Custom(path.to_string()),
        None => ConfigType::Dashboard,
    };
    let config_path = load_config_from_env(config_type);

    // Tracing must exist before the real load so its warnings are visible
    let log_level = DashboardConfig::peek(&config_path).log_level;
    let json = cli::has_flag(&args, "--json");
    if json {
        init_stderr_tracing(&log_level);
    } else {
        init_tracing(&log_level);
    }

    let config = DashboardConfig::load_or_default(&config_path)?;
    config.log();

    let timeframe = cli::flag_value(&args, "--timeframe")
        .map(|tf| tf.parse::<Timeframe>())
        .transpose()
        .context("invalid --timeframe")?;

    let run_config = RunConfig::new("GEX Feed").with_heartbeat(config.heartbeat_interval_secs);

    let mut runner = FeedRunner {
        run_config,
        json,
        timeframe,
        config,
        shutdown: ShutdownManager::new(),
        snapshots_seen: 0,
    };

    runner.execute().await
}
