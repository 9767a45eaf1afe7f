//! File-backed storage for the studio booking service.
//!
//! This crate provides the two gateways the admission controller writes
//! through:
//!
//! - [`JsonFileSnapshotStore`]: whole-collection JSON snapshots of classes
//!   and bookings, replaced atomically on every save
//! - [`FileAuditLog`]: an append-only text log of successful operations
//!
//! # Example
//!
//! ```ignore
//! use studio_booking_storage::{FileAuditLog, JsonFileSnapshotStore};
//!
//! let snapshots = JsonFileSnapshotStore::new("data/classes.json", "data/bookings.json");
//! let audit = FileAuditLog::new("data/api_responses.log");
//! let controller = AdmissionController::load(
//!     Arc::new(snapshots),
//!     Arc::new(audit),
//!     Arc::new(SystemClock),
//! )
//! .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit_file;
pub mod json_file;

pub use audit_file::FileAuditLog;
pub use json_file::JsonFileSnapshotStore;
