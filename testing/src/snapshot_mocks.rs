//! In-memory snapshot and audit doubles
//!
//! - [`InMemorySnapshotStore`]: keeps the last saved snapshot of each collection
//! - [`InMemoryAuditLog`]: collects audit entries
//!
//! Both can be switched into a failing mode to exercise error paths.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only happens after a test already panicked

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use studio_booking_core::audit::{AuditEntry, AuditError, AuditLog};
use studio_booking_core::snapshot::{SnapshotStore, StorageError, StorageFuture};
use studio_booking_core::types::{BookingRecord, ClassDefinition};

/// In-memory snapshot store for fast, deterministic testing.
///
/// Clones share the same storage, so a test can keep a handle for
/// assertions after passing one to the controller.
///
/// # Example
///
/// ```
/// use studio_booking_testing::InMemorySnapshotStore;
/// use studio_booking_core::snapshot::SnapshotStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemorySnapshotStore::new();
/// assert!(store.load_classes().await?.is_empty());
///
/// store.fail_saves(true);
/// assert!(store.save_classes(&[]).await.is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemorySnapshotStore {
    classes: Arc<RwLock<Vec<ClassDefinition>>>,
    bookings: Arc<RwLock<Vec<BookingRecord>>>,
    failing: Arc<AtomicBool>,
    saves: Arc<AtomicUsize>,
    save_delay_ms: Arc<AtomicU64>,
}

impl InMemorySnapshotStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds the given snapshots
    #[must_use]
    pub fn with_snapshots(classes: Vec<ClassDefinition>, bookings: Vec<BookingRecord>) -> Self {
        let store = Self::new();
        *store.classes.write().unwrap() = classes;
        *store.bookings.write().unwrap() = bookings;
        store
    }

    /// Make every following save fail (or succeed again)
    pub fn fail_saves(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make every following save sleep for `delay` before completing
    pub fn delay_saves(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.save_delay_ms.store(millis, Ordering::SeqCst);
    }

    /// Last successfully saved classes
    #[must_use]
    pub fn saved_classes(&self) -> Vec<ClassDefinition> {
        self.classes.read().unwrap().clone()
    }

    /// Last successfully saved bookings
    #[must_use]
    pub fn saved_bookings(&self) -> Vec<BookingRecord> {
        self.bookings.read().unwrap().clone()
    }

    /// Number of successful saves across both collections
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    async fn wait_save_delay(&self) {
        let millis = self.save_delay_ms.load(Ordering::SeqCst);
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    fn check_failing(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Io("injected save failure".to_string()));
        }
        Ok(())
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load_classes(&self) -> StorageFuture<'_, Vec<ClassDefinition>> {
        Box::pin(async move { Ok(self.saved_classes()) })
    }

    fn load_bookings(&self) -> StorageFuture<'_, Vec<BookingRecord>> {
        Box::pin(async move { Ok(self.saved_bookings()) })
    }

    fn save_classes<'a>(&'a self, classes: &'a [ClassDefinition]) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            self.wait_save_delay().await;
            self.check_failing()?;
            *self.classes.write().unwrap() = classes.to_vec();
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn save_bookings<'a>(&'a self, bookings: &'a [BookingRecord]) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            self.wait_save_delay().await;
            self.check_failing()?;
            *self.bookings.write().unwrap() = bookings.to_vec();
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}

/// In-memory audit log.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryAuditLog {
    /// Create an empty audit log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following record fail (or succeed again)
    pub fn fail_records(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All recorded entries in order
    #[must_use]
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().unwrap().clone()
    }

    /// Recorded entry labels in order
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .map(|e| e.label.clone())
            .collect()
    }
}

impl AuditLog for InMemoryAuditLog {
    fn record(
        &self,
        entry: AuditEntry,
    ) -> Pin<Box<dyn Future<Output = Result<(), AuditError>> + Send + '_>> {
        Box::pin(async move {
            if self.failing.load(Ordering::SeqCst) {
                return Err(AuditError::Storage("injected audit failure".to_string()));
            }
            self.entries.write().unwrap().push(entry);
            Ok(())
        })
    }
}
