//! Durable snapshots of the catalog and the ledger.
//!
//! The admission controller never writes incrementally: after every
//! successful mutation it hands the complete collection to a
//! [`SnapshotStore`], which replaces whatever was stored before.
//!
//! # Implementations
//!
//! - `JsonFileSnapshotStore` (in `studio-booking-storage`): one JSON file per collection
//! - `InMemorySnapshotStore` (in `studio-booking-testing`): deterministic tests, failure injection

use crate::types::{BookingRecord, ClassDefinition};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`SnapshotStore`] methods.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Errors that can occur while loading or saving snapshots.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Whole-collection persistence for classes and bookings.
///
/// Loads happen once at startup. Saves happen while the admission guard is
/// held, so implementations never see two concurrent saves of the same
/// collection from one controller.
///
/// # Dyn Compatibility
///
/// Methods return boxed futures so the store can be shared as
/// `Arc<dyn SnapshotStore>`.
pub trait SnapshotStore: Send + Sync {
    /// Load every stored class in stored order.
    ///
    /// A store that has never been written returns an empty vector.
    ///
    /// # Errors
    ///
    /// - `Io`: the backing medium could not be read
    /// - `Serialization`: stored data is malformed
    fn load_classes(&self) -> StorageFuture<'_, Vec<ClassDefinition>>;

    /// Load every stored booking in stored order.
    ///
    /// # Errors
    ///
    /// Same as [`SnapshotStore::load_classes`].
    fn load_bookings(&self) -> StorageFuture<'_, Vec<BookingRecord>>;

    /// Replace the stored classes with `classes`.
    ///
    /// # Errors
    ///
    /// - `Io`: the write did not complete
    /// - `Serialization`: the collection could not be encoded
    fn save_classes<'a>(&'a self, classes: &'a [ClassDefinition]) -> StorageFuture<'a, ()>;

    /// Replace the stored bookings with `bookings`.
    ///
    /// # Errors
    ///
    /// Same as [`SnapshotStore::save_classes`].
    fn save_bookings<'a>(&'a self, bookings: &'a [BookingRecord]) -> StorageFuture<'a, ()>;
}
