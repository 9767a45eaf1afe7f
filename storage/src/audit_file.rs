//! Append-only audit log file.
//!
//! One line per successful operation, in the layout produced by
//! [`AuditEntry::render_line`]. Writers are serialized by an internal lock
//! so concurrent appends never interleave.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use studio_booking_core::audit::{AuditEntry, AuditError, AuditLog};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Audit log that appends to a text file.
#[derive(Debug)]
pub struct FileAuditLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileAuditLog {
    /// Create an audit log writing to `path`. The file is created on the
    /// first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the log file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, line: String) -> Result<(), AuditError> {
        let _guard = self.lock.lock().await;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                AuditError::Storage(format!("failed to open {}: {e}", self.path.display()))
            })?;

        file.write_all(line.as_bytes()).await.map_err(|e| {
            AuditError::Storage(format!("failed to append to {}: {e}", self.path.display()))
        })?;
        file.flush().await.map_err(|e| {
            AuditError::Storage(format!("failed to flush {}: {e}", self.path.display()))
        })
    }
}

impl AuditLog for FileAuditLog {
    fn record(
        &self,
        entry: AuditEntry,
    ) -> Pin<Box<dyn Future<Output = Result<(), AuditError>> + Send + '_>> {
        Box::pin(async move {
            let mut line = entry.render_line();
            line.push('\n');
            self.append(line).await
        })
    }
}
