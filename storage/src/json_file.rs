//! JSON file snapshot store.
//!
//! Each collection lives in its own file as a pretty-printed JSON array.
//! A save serializes the whole collection, writes it to a temporary sibling
//! and renames it over the target, so a reader sees either the previous
//! snapshot or the new one.
//!
//! A missing file, a zero-length file and a file holding `null` all load as
//! an empty collection.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use studio_booking_core::snapshot::{SnapshotStore, StorageError, StorageFuture};
use studio_booking_core::types::{BookingRecord, ClassDefinition};
use tracing::{debug, warn};

/// Snapshot store over two JSON files.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    classes_path: PathBuf,
    bookings_path: PathBuf,
}

impl JsonFileSnapshotStore {
    /// Create a store over the given files.
    ///
    /// Nothing is touched on disk until the first load or save.
    #[must_use]
    pub fn new(classes_path: impl Into<PathBuf>, bookings_path: impl Into<PathBuf>) -> Self {
        Self {
            classes_path: classes_path.into(),
            bookings_path: bookings_path.into(),
        }
    }

    /// Path of the class catalog file
    #[must_use]
    pub fn classes_path(&self) -> &Path {
        &self.classes_path
    }

    /// Path of the booking ledger file
    #[must_use]
    pub fn bookings_path(&self) -> &Path {
        &self.bookings_path
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load_classes(&self) -> StorageFuture<'_, Vec<ClassDefinition>> {
        Box::pin(read_collection(&self.classes_path))
    }

    fn load_bookings(&self) -> StorageFuture<'_, Vec<BookingRecord>> {
        Box::pin(read_collection(&self.bookings_path))
    }

    fn save_classes<'a>(&'a self, classes: &'a [ClassDefinition]) -> StorageFuture<'a, ()> {
        Box::pin(write_collection(&self.classes_path, classes))
    }

    fn save_bookings<'a>(&'a self, bookings: &'a [BookingRecord]) -> StorageFuture<'a, ()> {
        Box::pin(write_collection(&self.bookings_path, bookings))
    }
}

async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Snapshot file missing, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(StorageError::Io(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let items: Option<Vec<T>> = serde_json::from_slice(&bytes).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Snapshot file is malformed");
        StorageError::Serialization(format!("failed to parse {}: {e}", path.display()))
    })?;

    let items = items.unwrap_or_default();
    debug!(path = %path.display(), count = items.len(), "Snapshot loaded");
    Ok(items)
}

async fn write_collection<T: Serialize + Sync>(
    path: &Path,
    items: &[T],
) -> Result<(), StorageError> {
    let json = serde_json::to_vec_pretty(items).map_err(|e| {
        StorageError::Serialization(format!("failed to encode {}: {e}", path.display()))
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::Io(format!("failed to create {}: {e}", parent.display()))
        })?;
    }

    let temp = temp_sibling(path);
    tokio::fs::write(&temp, &json)
        .await
        .map_err(|e| StorageError::Io(format!("failed to write {}: {e}", temp.display())))?;

    if let Err(e) = tokio::fs::rename(&temp, path).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(StorageError::Io(format!(
            "failed to replace {}: {e}",
            path.display()
        )));
    }

    metrics::counter!("studio.snapshots.written").increment(1);
    debug!(path = %path.display(), count = items.len(), bytes = json.len(), "Snapshot written");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
