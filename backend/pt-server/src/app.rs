//! Server lifecycle: `Initializing -> Running -> ShuttingDown -> Stopped`.
//!
//! The HTTP listener runs on a background task while the caller's future
//! (normally [`shutdown_signal`]) decides when to stop. In-flight requests
//! then get the grace period to finish before the server task is aborted.

use crate::{ServerError, ServerResult, ShutdownCoordinator};

use std::fmt;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use log::{error, info, warn};
use tokio::net::TcpListener;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    Initializing,
    Running,
    ShuttingDown,
    Stopped,
}

impl AppPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Running => "running",
            Self::ShuttingDown => "shutting_down",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for AppPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct App {
    listener: TcpListener,
    router: Router,
    grace: Duration,
    phase_tx: watch::Sender<AppPhase>,
}

impl App {
    pub fn new(listener: TcpListener, router: Router, grace: Duration) -> Self {
        let (phase_tx, _) = watch::channel(AppPhase::Initializing);
        Self {
            listener,
            router,
            grace,
            phase_tx,
        }
    }

    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        self.listener.local_addr().map_err(|e| ServerError::Serve {
            message: format!("Failed to read local address: {e}"),
        })
    }

    pub fn phase(&self) -> AppPhase {
        *self.phase_tx.borrow()
    }

    /// Observe phase changes
    pub fn phases(&self) -> watch::Receiver<AppPhase> {
        self.phase_tx.subscribe()
    }

    /// Serve until `stop` resolves, then shut down within the grace period.
    ///
    /// Returns early with an error if the server task fails on its own.
    pub async fn run_until<S>(self, stop: S) -> ServerResult<()>
    where
        S: Future<Output = ()> + Send,
    {
        let App {
            listener,
            router,
            grace,
            phase_tx,
        } = self;

        let shutdown = ShutdownCoordinator::new();
        let mut guard = shutdown.subscribe_guard();

        let server = axum::serve(listener, router)
            .with_graceful_shutdown(async move { guard.wait().await });
        let mut server_task = tokio::spawn(async move { server.await });

        transition(&phase_tx, AppPhase::Running);

        tokio::select! {
            _ = stop => {}
            result = &mut server_task => {
                transition(&phase_tx, AppPhase::Stopped);
                return match result {
                    Ok(Ok(())) => Err(ServerError::Serve {
                        message: "server exited before shutdown was requested".to_string(),
                    }),
                    Ok(Err(e)) => Err(ServerError::Serve { message: e.to_string() }),
                    Err(e) => Err(ServerError::Serve { message: e.to_string() }),
                };
            }
        }

        transition(&phase_tx, AppPhase::ShuttingDown);
        shutdown.shutdown();

        let outcome = match tokio::time::timeout(grace, &mut server_task).await {
            Ok(Ok(Ok(()))) => {
                info!("Graceful shutdown complete");
                Ok(())
            }
            Ok(Ok(Err(e))) => {
                error!("Server shutdown with error: {}", e);
                Err(ServerError::Serve {
                    message: e.to_string(),
                })
            }
            Ok(Err(e)) => Err(ServerError::Serve {
                message: e.to_string(),
            }),
            Err(_elapsed) => {
                warn!(
                    "Grace period of {}ms elapsed, dropping in-flight requests",
                    grace.as_millis()
                );
                server_task.abort();
                Ok(())
            }
        };

        transition(&phase_tx, AppPhase::Stopped);
        outcome
    }
}

fn transition(phase_tx: &watch::Sender<AppPhase>, next: AppPhase) {
    let previous = phase_tx.send_replace(next);
    info!("Application phase: {} -> {}", previous, next);
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
