use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// Fans a single shutdown event out to every task that cares.
///
/// Late subscribers still observe a shutdown that already happened.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.tx.borrow()
    }

    /// Mark shutdown as started. Only the first call notifies.
    pub fn shutdown(&self) {
        let first = self.tx.send_if_modified(|started| !std::mem::replace(started, true));
        if first {
            info!("Initiating graceful shutdown");
        }
    }

    /// Resolve once [`shutdown`](Self::shutdown) has been called.
    pub async fn wait_for_shutdown(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in self, so the channel cannot close while we wait
        let _ = rx.wait_for(|started| *started).await;
    }

    /// Wait for SIGINT or SIGTERM, or for someone else to call `shutdown`.
    pub async fn wait_for_signal(&self) {
        tokio::select! {
            _ = ctrl_c() => info!("Received SIGINT"),
            _ = terminate() => info!("Received SIGTERM"),
            _ = self.wait_for_shutdown() => {}
        }

        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            error!(error = %e, "Failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_wakes_waiters() {
        let coordinator = ShutdownCoordinator::new();
        let waiter = coordinator.clone();
        let handle = tokio::spawn(async move { waiter.wait_for_shutdown().await });

        assert!(!coordinator.is_shutting_down());
        coordinator.shutdown();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("waiter should be released")
            .unwrap();
        assert!(coordinator.is_shutting_down());
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_past_shutdown() {
        let coordinator = ShutdownCoordinator::new();
        coordinator.shutdown();
        coordinator.shutdown();

        tokio::time::timeout(Duration::from_secs(1), coordinator.wait_for_shutdown())
            .await
            .expect("already shut down");
    }

    #[tokio::test]
    async fn test_wait_for_signal_returns_on_manual_shutdown() {
        let coordinator = ShutdownCoordinator::new();
        let trigger = coordinator.clone();
        tokio::spawn(async move { trigger.shutdown() });

        tokio::time::timeout(Duration::from_secs(1), coordinator.wait_for_signal())
            .await
            .expect("manual shutdown should end the wait");
    }
}
