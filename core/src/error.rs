//! Errors returned by the admission controller.
//!
//! Everything except [`AdmissionError::PersistenceFailure`] is raised before
//! any state changes, so the caller can fix the input and retry.

use crate::date::ClassDate;
use crate::snapshot::StorageError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which date field of a request failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// `startDate` of a class
    StartDate,
    /// `endDate` of a class
    EndDate,
    /// `date` of a booking
    Date,
}

impl DateField {
    /// Request field name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which snapshot a persistence failure concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// The class catalog
    Classes,
    /// The booking ledger
    Bookings,
}

impl Collection {
    /// Lowercase label used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Classes => "classes",
            Self::Bookings => "bookings",
        }
    }

    const fn noun(self) -> &'static str {
        match self {
            Self::Classes => "class",
            Self::Bookings => "booking",
        }
    }
}

/// Error category, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Required field empty or number out of range
    InvalidFields,
    /// Date not in `DD-MM-YYYY`
    InvalidDateFormat,
    /// End date before start date
    InvalidRange,
    /// No class with that name is active on that date
    ClassUnavailable,
    /// Class is fully booked on that date
    CapacityExceeded,
    /// Snapshot write failed after the in-memory change
    PersistenceFailure,
}

impl ErrorKind {
    /// Machine-readable code, e.g. `CAPACITY_EXCEEDED`.
    #[must_use]
    pub const fn as_code(&self) -> &'static str {
        match self {
            Self::InvalidFields => "INVALID_FIELDS",
            Self::InvalidDateFormat => "INVALID_DATE_FORMAT",
            Self::InvalidRange => "INVALID_RANGE",
            Self::ClassUnavailable => "CLASS_UNAVAILABLE",
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::PersistenceFailure => "PERSISTENCE_FAILURE",
        }
    }

    /// `true` for kinds caused by the request rather than the service.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::PersistenceFailure)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Why a registration or booking was not committed (or not persisted).
#[derive(Error, Debug)]
pub enum AdmissionError {
    /// A required field is empty or a number is out of range.
    #[error("Invalid data format: {reason}")]
    InvalidFields {
        /// Which rule was broken
        reason: &'static str,
    },

    /// A date field does not follow `DD-MM-YYYY`.
    #[error("Invalid {field} format, use DD-MM-YYYY")]
    InvalidDateFormat {
        /// The offending field
        field: DateField,
        /// The rejected text
        value: String,
    },

    /// A class would end before it starts.
    #[error("endDate {end} must not be before startDate {start}")]
    InvalidRange {
        /// Requested first day
        start: ClassDate,
        /// Requested last day
        end: ClassDate,
    },

    /// No class named `class_name` is active on `date`.
    #[error("Class '{class_name}' is not available on {date}")]
    ClassUnavailable {
        /// Requested class
        class_name: String,
        /// Requested day
        date: ClassDate,
    },

    /// The class is already fully booked on `date`.
    #[error("No available slots for class '{class_name}' on {date}")]
    CapacityExceeded {
        /// Requested class
        class_name: String,
        /// Requested day
        date: ClassDate,
        /// Daily capacity of the matched class
        capacity: u32,
    },

    /// The change is visible in memory but the snapshot write failed.
    #[error("Failed to save {} data", .collection.noun())]
    PersistenceFailure {
        /// Snapshot that could not be written
        collection: Collection,
        /// Underlying storage error
        #[source]
        source: StorageError,
    },
}

impl AdmissionError {
    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFields { .. } => ErrorKind::InvalidFields,
            Self::InvalidDateFormat { .. } => ErrorKind::InvalidDateFormat,
            Self::InvalidRange { .. } => ErrorKind::InvalidRange,
            Self::ClassUnavailable { .. } => ErrorKind::ClassUnavailable,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::PersistenceFailure { .. } => ErrorKind::PersistenceFailure,
        }
    }
}
