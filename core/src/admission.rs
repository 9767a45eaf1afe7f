//! Admission control for class registration and booking.
//!
//! # Locking
//!
//! One `tokio::sync::Mutex` covers both the [`Catalog`] and the [`Ledger`].
//! A booking holds it from the class lookup through the capacity count, the
//! append and the snapshot write, so two requests for the last slot can
//! never both see it free. Registration takes the same guard, which makes a
//! concurrent registration and booking mutually exclusive as well.
//!
//! The snapshot write happens before the guard is released. A slow disk
//! therefore stalls every other mutating request.
//!
//! ```text
//! CreateBooking:
//!   validate ─► lock ─► find class ─► count ─► append ─► save ─► unlock ─► audit
//!                           │            │
//!                           ▼            ▼
//!                   ClassUnavailable  CapacityExceeded
//! ```
//!
//! # Cancellation
//!
//! Dropping a `register_class` or `create_booking` future while its
//! snapshot write is pending leaves the append in memory with no save and
//! no audit entry. Callers that can be cancelled, such as HTTP handlers,
//! run these operations on a spawned task.
//!
//! # Persistence failures
//!
//! A failed snapshot write is reported as
//! [`AdmissionError::PersistenceFailure`] but the in-memory append is not
//! rolled back. It is written out with the next successful save of the same
//! collection.

use crate::audit::{AuditEntry, AuditLog, BOOKING_CREATED, CLASS_CREATED};
use crate::catalog::Catalog;
use crate::date::ClassDate;
use crate::environment::Clock;
use crate::error::{AdmissionError, Collection, DateField};
use crate::ledger::Ledger;
use crate::snapshot::{SnapshotStore, StorageError};
use crate::types::{
    BookingAdmission, BookingRecord, Capacity, ClassDefinition, CreateBookingRequest, NewBooking,
    NewClass, RegisterClassRequest,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Everything guarded by the admission lock.
#[derive(Debug)]
struct BookingState {
    catalog: Catalog,
    ledger: Ledger,
}

/// Sole mutator of the class catalog and the booking ledger.
///
/// Shared across request handlers as `Arc<AdmissionController>`; it lives
/// for the whole process.
pub struct AdmissionController {
    state: Mutex<BookingState>,
    snapshots: Arc<dyn SnapshotStore>,
    audit: Arc<dyn AuditLog>,
    clock: Arc<dyn Clock>,
}

impl AdmissionController {
    /// Create a controller over already loaded collections.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        ledger: Ledger,
        snapshots: Arc<dyn SnapshotStore>,
        audit: Arc<dyn AuditLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: Mutex::new(BookingState { catalog, ledger }),
            snapshots,
            audit,
            clock,
        }
    }

    /// Seed a controller from the snapshot store.
    ///
    /// # Errors
    ///
    /// Returns the store's error if either snapshot exists but cannot be
    /// read, or a serialization error if a snapshot has used up the id
    /// space. Missing snapshots load as empty collections.
    pub async fn load(
        snapshots: Arc<dyn SnapshotStore>,
        audit: Arc<dyn AuditLog>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StorageError> {
        let classes = snapshots.load_classes().await?;
        let bookings = snapshots.load_bookings().await?;

        info!(
            classes = classes.len(),
            bookings = bookings.len(),
            "Loaded snapshots"
        );

        Ok(Self::new(
            Catalog::from_snapshot(classes)?,
            Ledger::from_snapshot(bookings)?,
            snapshots,
            audit,
            clock,
        ))
    }

    /// Register a new class.
    ///
    /// # Errors
    ///
    /// - `InvalidFields`: empty name or date, or capacity not positive
    /// - `InvalidDateFormat`: `startDate` or `endDate` not `DD-MM-YYYY`
    /// - `InvalidRange`: end date before start date
    /// - `PersistenceFailure`: the class was added but the catalog snapshot
    ///   could not be written
    pub async fn register_class(
        &self,
        request: RegisterClassRequest,
    ) -> Result<ClassDefinition, AdmissionError> {
        let class = validate_class(request).map_err(|e| rejected("class", e))?;

        let stored = {
            let mut state = self.state.lock().await;
            let stored = state.catalog.add(class);

            if let Err(source) = self.snapshots.save_classes(state.catalog.classes()).await {
                return Err(persistence_failure(Collection::Classes, source));
            }
            stored
        };

        metrics::counter!("studio.classes.registered").increment(1);
        info!(
            class_id = %stored.id,
            name = %stored.name,
            start = %stored.start_date,
            end = %stored.end_date,
            capacity = %stored.capacity,
            "Class registered"
        );

        self.record_audit(CLASS_CREATED, &stored).await;
        Ok(stored)
    }

    /// Admit a member into a class on one day.
    ///
    /// # Errors
    ///
    /// - `InvalidFields`: empty member name, date or class name
    /// - `InvalidDateFormat`: `date` not `DD-MM-YYYY`
    /// - `ClassUnavailable`: no class with that name is active that day
    /// - `CapacityExceeded`: the matching class is full that day
    /// - `PersistenceFailure`: the booking was added but the ledger snapshot
    ///   could not be written
    pub async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingAdmission, AdmissionError> {
        let booking = validate_booking(request).map_err(|e| rejected("booking", e))?;

        let admission = {
            let mut state = self.state.lock().await;

            let Some(capacity) = state
                .catalog
                .find_active_on(&booking.class_name, &booking.date)
                .map(|class| class.capacity.value())
            else {
                return Err(rejected(
                    "booking",
                    AdmissionError::ClassUnavailable {
                        class_name: booking.class_name,
                        date: booking.date,
                    },
                ));
            };

            let taken = state.ledger.count_for(&booking.class_name, &booking.date);
            let taken = u32::try_from(taken).unwrap_or(u32::MAX);
            if taken >= capacity {
                return Err(rejected(
                    "booking",
                    AdmissionError::CapacityExceeded {
                        class_name: booking.class_name,
                        date: booking.date,
                        capacity,
                    },
                ));
            }

            let record = state.ledger.add(booking);

            if let Err(source) = self.snapshots.save_bookings(state.ledger.bookings()).await {
                return Err(persistence_failure(Collection::Bookings, source));
            }

            BookingAdmission {
                booking: record,
                available_slots: capacity - taken - 1,
            }
        };

        metrics::counter!("studio.bookings.admitted").increment(1);
        info!(
            booking_id = %admission.booking.id,
            member = %admission.booking.member_name,
            class = %admission.booking.class_name,
            date = %admission.booking.date,
            available_slots = admission.available_slots,
            "Booking admitted"
        );

        self.record_audit(BOOKING_CREATED, &admission).await;
        Ok(admission)
    }

    /// First class named `name` active on `date`, as the booking path sees it.
    pub async fn find_active_on(&self, name: &str, date: &ClassDate) -> Option<ClassDefinition> {
        self.state
            .lock()
            .await
            .catalog
            .find_active_on(name, date)
            .cloned()
    }

    /// Bookings held for `class_name` on `date`.
    pub async fn count_for(&self, class_name: &str, date: &ClassDate) -> usize {
        self.state.lock().await.ledger.count_for(class_name, date)
    }

    /// Number of registered classes.
    pub async fn class_count(&self) -> usize {
        self.state.lock().await.catalog.len()
    }

    /// Number of admitted bookings.
    pub async fn booking_count(&self) -> usize {
        self.state.lock().await.ledger.len()
    }

    /// Copy of every class in registration order.
    pub async fn classes(&self) -> Vec<ClassDefinition> {
        self.state.lock().await.catalog.classes().to_vec()
    }

    /// Copy of every booking in admission order.
    pub async fn bookings(&self) -> Vec<BookingRecord> {
        self.state.lock().await.ledger.bookings().to_vec()
    }

    async fn record_audit<T: Serialize + Sync>(&self, label: &'static str, payload: &T) {
        let entry = match AuditEntry::new(label, payload, self.clock.now()) {
            Ok(entry) => entry,
            Err(error) => {
                warn!(label, %error, "Failed to build audit entry");
                return;
            }
        };

        if let Err(error) = self.audit.record(entry).await {
            warn!(label, %error, "Failed to write audit entry");
        }
    }
}

/// Check a registration request and parse its dates.
///
/// Pure: touches no shared state.
///
/// # Errors
///
/// `InvalidFields`, `InvalidDateFormat` or `InvalidRange`, checked in that
/// order.
pub fn validate_class(request: RegisterClassRequest) -> Result<NewClass, AdmissionError> {
    if request.name.is_empty() {
        return Err(AdmissionError::InvalidFields {
            reason: "name must not be empty",
        });
    }
    if request.start_date.is_empty() || request.end_date.is_empty() {
        return Err(AdmissionError::InvalidFields {
            reason: "startDate and endDate are required",
        });
    }
    let capacity = u32::try_from(request.capacity)
        .ok()
        .filter(|c| *c > 0)
        .ok_or(AdmissionError::InvalidFields {
            reason: "capacity must be a positive integer",
        })?;

    let start_date = parse_field(&request.start_date, DateField::StartDate)?;
    let end_date = parse_field(&request.end_date, DateField::EndDate)?;

    if end_date.is_before(&start_date) {
        return Err(AdmissionError::InvalidRange {
            start: start_date,
            end: end_date,
        });
    }

    Ok(NewClass {
        name: request.name,
        start_date,
        end_date,
        capacity: Capacity::new(capacity),
    })
}

/// Check a booking request and parse its date.
///
/// # Errors
///
/// `InvalidFields` or `InvalidDateFormat`.
pub fn validate_booking(request: CreateBookingRequest) -> Result<NewBooking, AdmissionError> {
    if request.member_name.is_empty() || request.date.is_empty() || request.class_name.is_empty() {
        return Err(AdmissionError::InvalidFields {
            reason: "memberName, date and className are required",
        });
    }

    let date = parse_field(&request.date, DateField::Date)?;

    Ok(NewBooking {
        member_name: request.member_name,
        date,
        class_name: request.class_name,
    })
}

fn parse_field(text: &str, field: DateField) -> Result<ClassDate, AdmissionError> {
    ClassDate::parse(text).map_err(|e| AdmissionError::InvalidDateFormat {
        field,
        value: e.input,
    })
}

fn rejected(operation: &'static str, err: AdmissionError) -> AdmissionError {
    let kind = err.kind();
    debug!(operation, kind = %kind, reason = %err, "Request rejected");
    metrics::counter!("studio.requests.rejected", "operation" => operation, "kind" => kind.as_code())
        .increment(1);
    err
}

fn persistence_failure(collection: Collection, source: StorageError) -> AdmissionError {
    error!(
        collection = collection.as_str(),
        error = %source,
        "Snapshot write failed; in-memory change kept"
    );
    metrics::counter!("studio.persistence.failures", "collection" => collection.as_str())
        .increment(1);
    AdmissionError::PersistenceFailure { collection, source }
}
