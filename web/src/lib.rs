//! Axum HTTP surface for the studio booking service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP (Axum)                │  ← JSON decode, envelopes
//! │  - Request parsing                      │  ← TraceLayer spans
//! │  - Response serialization               │  ← AppError → {code, message}
//! ├─────────────────────────────────────────┤
//! │          AdmissionController            │
//! │  - Validation                           │
//! │  - Capacity check under one lock        │
//! │  - Snapshot + audit writes              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use studio_booking_web::{build_router, AppState};
//!
//! let app = build_router(AppState::new(Arc::new(controller)));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8088").await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use handlers::ApiResponse;
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
