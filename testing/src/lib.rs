//! # Studio Booking Testing
//!
//! Testing utilities and helpers for the studio booking service.
//!
//! This crate provides:
//! - In-memory implementations of the snapshot store and audit log
//! - A fixed clock for deterministic audit timestamps
//! - Request fixtures and a [`helpers::TestHarness`] wiring them together
//!
//! ## Example
//!
//! ```ignore
//! use studio_booking_testing::helpers::{pilates_class, booking_request, TestHarness};
//!
//! #[tokio::test]
//! async fn test_booking_flow() {
//!     let harness = TestHarness::new();
//!     harness.controller.register_class(pilates_class()).await.unwrap();
//!
//!     let admission = harness
//!         .controller
//!         .create_booking(booking_request("Rahul R P", "16-12-2024", "Pilates"))
//!         .await
//!         .unwrap();
//!     assert_eq!(admission.available_slots, 9);
//! }
//! ```

use chrono::{DateTime, Utc};
use studio_booking_core::environment::Clock;

pub mod snapshot_mocks;

pub use mocks::{test_clock, FixedClock};
pub use snapshot_mocks::{InMemoryAuditLog, InMemorySnapshotStore};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making audit lines reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use studio_booking_testing::mocks::FixedClock;
    /// use studio_booking_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2024-12-16 09:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2024-12-16T09:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and fixtures
pub mod helpers {
    use super::mocks::test_clock;
    use super::snapshot_mocks::{InMemoryAuditLog, InMemorySnapshotStore};
    use std::sync::Arc;
    use studio_booking_core::admission::AdmissionController;
    use studio_booking_core::catalog::Catalog;
    use studio_booking_core::ledger::Ledger;
    use studio_booking_core::snapshot::StorageError;
    use studio_booking_core::types::{CreateBookingRequest, RegisterClassRequest};

    /// Build a registration request.
    #[must_use]
    pub fn class_request(name: &str, start: &str, end: &str, capacity: i64) -> RegisterClassRequest {
        RegisterClassRequest {
            name: name.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            capacity,
        }
    }

    /// `Pilates`, 01-12-2024 to 20-12-2024, capacity 10.
    #[must_use]
    pub fn pilates_class() -> RegisterClassRequest {
        class_request("Pilates", "01-12-2024", "20-12-2024", 10)
    }

    /// Build a booking request.
    #[must_use]
    pub fn booking_request(member: &str, date: &str, class_name: &str) -> CreateBookingRequest {
        CreateBookingRequest {
            member_name: member.to_string(),
            date: date.to_string(),
            class_name: class_name.to_string(),
        }
    }

    /// A controller wired to in-memory doubles, with handles kept for
    /// assertions.
    pub struct TestHarness {
        /// Controller under test
        pub controller: Arc<AdmissionController>,
        /// Snapshot store the controller writes to
        pub snapshots: InMemorySnapshotStore,
        /// Audit log the controller writes to
        pub audit: InMemoryAuditLog,
    }

    impl Default for TestHarness {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TestHarness {
        /// Empty catalog and ledger.
        #[must_use]
        pub fn new() -> Self {
            let snapshots = InMemorySnapshotStore::new();
            let audit = InMemoryAuditLog::new();
            let controller = AdmissionController::new(
                Catalog::new(),
                Ledger::new(),
                Arc::new(snapshots.clone()),
                Arc::new(audit.clone()),
                Arc::new(test_clock()),
            );
            Self {
                controller: Arc::new(controller),
                snapshots,
                audit,
            }
        }

        /// Load the controller from an existing store, as at process start.
        ///
        /// # Errors
        ///
        /// Propagates load errors from the store.
        pub async fn load(snapshots: InMemorySnapshotStore) -> Result<Self, StorageError> {
            let audit = InMemoryAuditLog::new();
            let controller = AdmissionController::load(
                Arc::new(snapshots.clone()),
                Arc::new(audit.clone()),
                Arc::new(test_clock()),
            )
            .await?;
            Ok(Self {
                controller: Arc::new(controller),
                snapshots,
                audit,
            })
        }
    }

    /// Install a test-friendly tracing subscriber once per process.
    ///
    /// Respects `RUST_LOG`; repeated calls are no-ops.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}
