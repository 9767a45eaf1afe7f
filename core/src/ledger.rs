//! The set of admitted bookings.

use crate::date::ClassDate;
use crate::snapshot::StorageError;
use crate::types::{BookingId, BookingRecord, NewBooking};

/// Admitted bookings in insertion order.
#[derive(Debug, Clone)]
pub struct Ledger {
    bookings: Vec<BookingRecord>,
    next_id: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// An empty ledger whose first booking gets id 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bookings: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a ledger from a loaded snapshot, continuing ids after the
    /// highest stored one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if the snapshot already holds
    /// id `u64::MAX`, which leaves no id for the next booking.
    pub fn from_snapshot(bookings: Vec<BookingRecord>) -> Result<Self, StorageError> {
        let highest = bookings.iter().map(|b| b.id.value()).max().unwrap_or(0);
        let next_id = highest.checked_add(1).ok_or_else(|| {
            StorageError::Serialization(format!("booking id {highest} leaves no room for new ids"))
        })?;
        Ok(Self { bookings, next_id })
    }

    /// Assigns the next id and appends.
    pub fn add(&mut self, booking: NewBooking) -> BookingRecord {
        let stored = BookingRecord {
            id: BookingId::new(self.next_id),
            member_name: booking.member_name,
            date: booking.date,
            class_name: booking.class_name,
        };
        self.next_id = self.next_id.saturating_add(1);
        self.bookings.push(stored.clone());
        stored
    }

    /// Bookings whose class name and date both match exactly.
    #[must_use]
    pub fn count_for(&self, class_name: &str, date: &ClassDate) -> usize {
        self.bookings
            .iter()
            .filter(|b| b.class_name == class_name && b.date == *date)
            .count()
    }

    /// All bookings in insertion order.
    #[must_use]
    pub fn bookings(&self) -> &[BookingRecord] {
        &self.bookings
    }

    /// Number of bookings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// `true` if nothing is booked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
