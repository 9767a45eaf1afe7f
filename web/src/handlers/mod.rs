//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by resource.

pub mod bookings;
pub mod classes;
pub mod health;

use crate::error::AppError;
use crate::WebResult;
use serde::Serialize;
use std::future::Future;
use studio_booking_core::AdmissionError;

pub use bookings::create_booking;
pub use classes::register_class;
pub use health::health_check;

/// Success envelope: `{"message": .., "data": ..}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Human-readable outcome
    pub message: &'static str,
    /// Operation result
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` with `message`.
    #[must_use]
    pub const fn new(message: &'static str, data: T) -> Self {
        Self { message, data }
    }
}

/// Fallback for a known path called with an unsupported method.
#[allow(clippy::unused_async)]
pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

/// Drive an admission operation on its own task.
///
/// Axum drops the handler future when the client goes away. The operation
/// is spawned so that a started registration or booking always reaches its
/// snapshot write and audit entry regardless.
///
/// # Errors
///
/// The operation's own error, or an internal error if the task panicked.
pub(crate) async fn run_to_completion<T, F>(operation: F) -> WebResult<T>
where
    F: Future<Output = Result<T, AdmissionError>> + Send + 'static,
    T: Send + 'static,
{
    let outcome = tokio::spawn(operation)
        .await
        .map_err(anyhow::Error::from)?;
    Ok(outcome?)
}
