//! Router construction.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the service router.
///
/// # Routes
///
/// - `POST /classes` - register a class
/// - `POST /bookings` - book a member into a class
/// - `GET /health` - liveness and collection sizes
///
/// Any other method on these paths gets a 405 with the usual error body.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/classes",
            post(handlers::register_class).fallback(handlers::method_not_allowed),
        )
        .route(
            "/bookings",
            post(handlers::create_booking).fallback(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
