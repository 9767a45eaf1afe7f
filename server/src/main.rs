//! Studio Booking Server
//!
//! # Usage
//!
//! ```bash
//! STUDIO_DATA_DIR=./data METRICS_PORT=9000 cargo run --bin studio-booking
//! ```

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use studio_booking_server::{BookingApp, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,studio_booking=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        address = %config.server.bind_address(),
        classes = %config.storage.classes_path.display(),
        bookings = %config.storage.bookings_path.display(),
        audit = %config.storage.audit_log_path.display(),
        "Configuration loaded"
    );

    if let Some(address) = config.metrics_address() {
        PrometheusBuilder::new()
            .with_http_listener(address)
            .install()
            .context("failed to install Prometheus exporter")?;
        tracing::info!(%address, "Prometheus metrics available at /metrics");
    }

    let app = BookingApp::new(config).await?;
    let admission = app.admission();
    tracing::info!(
        classes = admission.class_count().await,
        bookings = admission.booking_count().await,
        "Collections loaded"
    );

    app.serve().await
}
