//! # Studio Booking Core
//!
//! Class catalog, booking ledger and admission control for the studio
//! booking service.
//!
//! ## Core Concepts
//!
//! - **Class**: a recurring offering with a name, an inclusive active date
//!   range and a per-day capacity
//! - **Booking**: one member holding one slot of a class on one day
//! - **Admission**: deciding, under a single lock, whether a booking fits
//! - **Snapshot**: the whole collection written out after every change
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │               AdmissionController                │
//! │   validate → lock → lookup/count → append → save │
//! ├────────────────┬────────────────┬────────────────┤
//! │    Catalog     │     Ledger     │   ClassDate    │
//! └────────────────┴────────────────┴────────────────┘
//!          │ SnapshotStore        │ AuditLog     │ Clock
//!          ▼                      ▼              ▼
//!     (storage crate)       (storage crate)  (system)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use studio_booking_core::{AdmissionController, RegisterClassRequest};
//!
//! let controller = AdmissionController::load(snapshots, audit, clock).await?;
//! let class = controller
//!     .register_class(RegisterClassRequest {
//!         name: "Pilates".into(),
//!         start_date: "01-12-2024".into(),
//!         end_date: "20-12-2024".into(),
//!         capacity: 10,
//!     })
//!     .await?;
//! ```

#![forbid(unsafe_code)]

pub mod admission;
pub mod audit;
pub mod catalog;
pub mod date;
pub mod error;
pub mod ledger;
pub mod snapshot;
pub mod types;

pub use admission::{validate_booking, validate_class, AdmissionController};
pub use audit::{AuditEntry, AuditError, AuditLog};
pub use catalog::Catalog;
pub use date::{ClassDate, DateParseError};
pub use error::{AdmissionError, Collection, DateField, ErrorKind};
pub use ledger::Ledger;
pub use snapshot::{SnapshotStore, StorageError, StorageFuture};
pub use types::{
    BookingAdmission, BookingId, BookingRecord, Capacity, ClassDefinition, ClassId,
    CreateBookingRequest, NewBooking, NewClass, RegisterClassRequest,
};

/// Environment module - injected dependencies
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// Only audit timestamps read the clock; admission never compares
    /// against "today".
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
