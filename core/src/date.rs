//! Calendar dates in the fixed `DD-MM-YYYY` layout.
//!
//! Every date that enters the system goes through [`ClassDate::parse`] and
//! leaves through its `Display` impl, so two dates that compare equal also
//! render to the same text.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// `chrono` format string matching the accepted layout.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Human-readable form of the layout, used in error messages.
pub const DATE_LAYOUT: &str = "DD-MM-YYYY";

/// A date failed to parse as `DD-MM-YYYY`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{input}` is not a valid DD-MM-YYYY date")]
pub struct DateParseError {
    /// The rejected text.
    pub input: String,
}

/// A calendar day with no time-of-day component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassDate(NaiveDate);

impl ClassDate {
    /// Parses `DD-MM-YYYY`.
    ///
    /// The shape is checked before the calendar: `1-12-2024`, `2024-12-01`
    /// and `12/16/2024` are rejected even though `chrono` alone would accept
    /// some of them. Impossible days such as `31-02-2024` are rejected too.
    ///
    /// # Errors
    ///
    /// Returns [`DateParseError`] for any text outside the layout.
    pub fn parse(text: &str) -> Result<Self, DateParseError> {
        let err = || DateParseError {
            input: text.to_string(),
        };

        if !has_layout_shape(text) {
            return Err(err());
        }

        NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Self)
            .map_err(|_| err())
    }

    /// Wraps an already valid calendar day.
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying `chrono` date.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// `true` if `self` is strictly earlier than `other`.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// `true` if `self` is strictly later than `other`.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }
}

/// Two digits, dash, two digits, dash, four digits.
fn has_layout_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl fmt::Display for ClassDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for ClassDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ClassDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClassDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
