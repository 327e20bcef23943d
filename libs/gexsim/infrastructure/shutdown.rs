//! Graceful shutdown for the headless feed

use std::future::Future;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

/// Resolves [`ShutdownManager::wait`] once a shutdown trigger fires
pub struct ShutdownManager {
    /// `true` while running
    running: Arc<watch::Sender<bool>>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        let (running, _) = watch::channel(true);
        Self {
            running: Arc::new(running),
        }
    }

    /// Shut down when Ctrl+C is received
    pub fn spawn_signal_handler(&self) {
        self.shutdown_on(async {
            match signal::ctrl_c().await {
                Ok(()) => info!("Received shutdown signal (Ctrl+C)"),
                Err(e) => {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        });
    }

    /// Shut down when `trigger` completes
    pub fn shutdown_on<F>(&self, trigger: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let running = Arc::clone(&self.running);
        tokio::spawn(async move {
            trigger.await;
            info!("Shutting down gracefully...");
            running.send_replace(false);
        });
    }

    /// Wait until shutdown has been triggered
    pub async fn wait(&self) {
        let mut rx = self.running.subscribe();
        // The sender lives as long as `self`, so this only returns on shutdown
        let _ = rx.wait_for(|running| !*running).await;
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::{sleep, timeout, Instant};

    #[tokio::test(start_paused = true)]
    async fn test_wait_resolves_when_trigger_fires() {
        let shutdown = ShutdownManager::new();
        let started = Instant::now();
        shutdown.shutdown_on(sleep(Duration::from_secs(5)));

        shutdown.wait().await;
        assert!(started.elapsed() >= Duration::from_secs(5));

        // Later waiters return immediately
        assert!(timeout(Duration::from_millis(1), shutdown.wait()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_pends_without_trigger() {
        let shutdown = ShutdownManager::new();
        shutdown.shutdown_on(std::future::pending());

        assert!(timeout(Duration::from_secs(60), shutdown.wait()).await.is_err());
    }
}
