//! Application state for Axum handlers.

use std::sync::Arc;
use studio_booking_core::AdmissionController;

/// Application state shared across all HTTP handlers.
///
/// Cloning is cheap; every clone points at the same controller.
#[derive(Clone)]
pub struct AppState {
    /// The single admission controller for this process
    pub admission: Arc<AdmissionController>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(admission: Arc<AdmissionController>) -> Self {
        Self { admission }
    }
}
