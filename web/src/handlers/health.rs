//! Health check endpoint.
//!
//! Used by load balancers and monitoring systems to verify the service is
//! up and has its collections loaded.

use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the handler runs
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Registered classes
    pub classes: usize,
    /// Admitted bookings
    pub bookings: usize,
}

/// Liveness check with collection sizes.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {"status": "ok", "version": "0.1.0", "classes": 1, "bookings": 3}
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        classes: state.admission.class_count().await,
        bookings: state.admission.booking_count().await,
    })
}
