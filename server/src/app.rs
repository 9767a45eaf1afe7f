//! Application wiring.
//!
//! Builds the file-backed stores, loads the snapshots into a single
//! [`AdmissionController`] and serves the router until shutdown.

use crate::config::Config;
use anyhow::Context;
use axum::Router;
use std::sync::Arc;
use studio_booking_core::environment::SystemClock;
use studio_booking_core::AdmissionController;
use studio_booking_storage::{FileAuditLog, JsonFileSnapshotStore};
use studio_booking_web::{build_router, AppState};
use tokio::net::TcpListener;
use tracing::{error, info};

/// The booking service, loaded and ready to serve.
pub struct BookingApp {
    config: Config,
    admission: Arc<AdmissionController>,
}

impl BookingApp {
    /// Load both snapshots and build the controller.
    ///
    /// # Errors
    ///
    /// Fails when a snapshot file exists but cannot be read or parsed. The
    /// service refuses to start rather than overwrite it with an empty
    /// collection.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let snapshots = JsonFileSnapshotStore::new(
            config.storage.classes_path.clone(),
            config.storage.bookings_path.clone(),
        );
        let audit = FileAuditLog::new(config.storage.audit_log_path.clone());

        let admission = AdmissionController::load(
            Arc::new(snapshots),
            Arc::new(audit),
            Arc::new(SystemClock),
        )
        .await
        .with_context(|| {
            format!(
                "failed to load snapshots from {} and {}",
                config.storage.classes_path.display(),
                config.storage.bookings_path.display()
            )
        })?;

        Ok(Self {
            config,
            admission: Arc::new(admission),
        })
    }

    /// Shared controller
    #[must_use]
    pub fn admission(&self) -> Arc<AdmissionController> {
        Arc::clone(&self.admission)
    }

    /// Router over this app's controller.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(AppState::new(self.admission()))
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Fails if the address cannot be bound or the server stops with an I/O
    /// error.
    pub async fn serve(self) -> anyhow::Result<()> {
        let address = self.config.server.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("failed to bind {address}"))?;

        self.serve_on(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Fails if the server stops with an I/O error.
    pub async fn serve_on(
        self,
        listener: TcpListener,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let local = listener.local_addr().context("listener has no address")?;
        info!(address = %local, "HTTP server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
