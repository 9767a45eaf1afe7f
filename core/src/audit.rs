//! Append-only record of successful operations.
//!
//! Auditing is best effort: the admission controller logs a warning when
//! [`AuditLog::record`] fails and still returns the committed result.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Timestamp layout of a rendered audit line.
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Label recorded after a class is registered.
pub const CLASS_CREATED: &str = "Class created successfully";

/// Label recorded after a booking is admitted.
pub const BOOKING_CREATED: &str = "Booking successful";

/// Audit write failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// The payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The entry could not be stored.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// One audit line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    /// What happened, e.g. [`BOOKING_CREATED`]
    pub label: String,
    /// The committed result
    pub payload: Value,
    /// When it was recorded
    pub recorded_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Build an entry from any serializable payload.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if `payload` cannot be turned into JSON.
    pub fn new<T: Serialize>(
        label: impl Into<String>,
        payload: &T,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, AuditError> {
        let payload =
            serde_json::to_value(payload).map_err(|e| AuditError::Serialization(e.to_string()))?;
        Ok(Self {
            label: label.into(),
            payload,
            recorded_at,
        })
    }

    /// `[DD-MM-YYYY HH:MM:SS] label: {json}` without a trailing newline.
    #[must_use]
    pub fn render_line(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.recorded_at.format(AUDIT_TIMESTAMP_FORMAT),
            self.label,
            self.payload
        )
    }
}

/// Destination for audit entries.
pub trait AuditLog: Send + Sync {
    /// Append one entry.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the entry was not written.
    fn record(
        &self,
        entry: AuditEntry,
    ) -> Pin<Box<dyn Future<Output = Result<(), AuditError>> + Send + '_>>;
}
