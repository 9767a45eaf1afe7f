//! Domain types for classes and bookings.
//!
//! Field names serialize in camelCase, matching the request bodies and the
//! snapshot files.

use crate::date::ClassDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Identity of a registered class, assigned from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(u64);

impl ClassId {
    /// Creates a new `ClassId`
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an admitted booking, assigned from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(u64);

impl BookingId {
    /// Creates a new `BookingId`
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum bookings a class accepts on a single calendar day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capacity(u32);

impl Capacity {
    /// Creates a new `Capacity`
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the capacity value
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Stored entities
// ============================================================================

/// A recurring class, active every day from `start_date` to `end_date`
/// inclusive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDefinition {
    /// Identity
    pub id: ClassId,
    /// Display name; bookings refer to the class by this name
    #[serde(alias = "className")]
    pub name: String,
    /// First active day
    pub start_date: ClassDate,
    /// Last active day
    pub end_date: ClassDate,
    /// Bookings allowed per day
    pub capacity: Capacity,
}

impl ClassDefinition {
    /// `true` if `date` falls inside `[start_date, end_date]`.
    #[must_use]
    pub fn is_active_on(&self, date: &ClassDate) -> bool {
        !date.is_before(&self.start_date) && !date.is_after(&self.end_date)
    }
}

/// One member holding one slot of a class on one day.
///
/// The class is referenced by name, not by [`ClassId`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Identity
    pub id: BookingId,
    /// Who booked
    pub member_name: String,
    /// Day of the booking
    pub date: ClassDate,
    /// Name of the booked class
    pub class_name: String,
}

/// A validated class that has not been assigned an identity yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewClass {
    /// Display name
    pub name: String,
    /// First active day
    pub start_date: ClassDate,
    /// Last active day
    pub end_date: ClassDate,
    /// Bookings allowed per day
    pub capacity: Capacity,
}

/// A validated booking that has not been admitted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBooking {
    /// Who is booking
    pub member_name: String,
    /// Requested day
    pub date: ClassDate,
    /// Requested class
    pub class_name: String,
}

// ============================================================================
// Requests / results
// ============================================================================

/// Raw input for registering a class.
///
/// Every field defaults when absent so that a missing field is reported as
/// an invalid field rather than a malformed body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterClassRequest {
    /// Class name
    #[serde(alias = "className")]
    pub name: String,
    /// `DD-MM-YYYY`
    pub start_date: String,
    /// `DD-MM-YYYY`
    pub end_date: String,
    /// Must be in `1..=u32::MAX`; anything else is reported as an invalid
    /// field
    pub capacity: i64,
}

/// Raw input for booking a class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookingRequest {
    /// Member name
    pub member_name: String,
    /// `DD-MM-YYYY`
    pub date: String,
    /// Name of the class to book
    pub class_name: String,
}

/// An admitted booking and what is left of the class that day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAdmission {
    /// The stored booking
    pub booking: BookingRecord,
    /// Free slots for the class and date after this booking
    pub available_slots: u32,
}
