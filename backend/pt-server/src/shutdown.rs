use tokio::sync::broadcast;

/// Fan-out of the "stop now" signal to the server and background tasks
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self { shutdown_tx }
    }

    /// Trigger shutdown (call this from the signal handler)
    pub fn shutdown(&self) {
        log::info!("Shutdown requested, notifying subscribers");
        let _ = self.shutdown_tx.send(());
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard {
            shutdown_rx: self.shutdown_tx.subscribe(),
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ShutdownGuard {
    shutdown_rx: broadcast::Receiver<()>,
}

impl ShutdownGuard {
    /// Resolves once shutdown is triggered (or the coordinator is gone)
    pub async fn wait(&mut self) {
        let _ = self.shutdown_rx.recv().await;
    }
}
