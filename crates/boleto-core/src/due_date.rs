//! # Due Date Module
//!
//! Strict `YYYY-MM-DD` parsing for the due date.
//!
//! chrono's `%Y-%m-%d` alone is too lenient (it takes `2024-3-5` and signed
//! years), so the shape is checked first and chrono only validates the
//! calendar.

use chrono::{Datelike, NaiveDate};

use crate::error::{ValidationError, ValidationResult};

/// Input format accepted for the due date.
const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Earliest accepted year.
const MIN_YEAR: i32 = 1;

/// Compact format embedded in the payload.
const COMPACT_FORMAT: &str = "%Y%m%d";

/// A validated due date, remembering the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDate {
    input: String,
    date: NaiveDate,
}

impl DueDate {
    /// Parses a due date.
    ///
    /// ## Rules
    /// - Exactly `YYYY-MM-DD`: 4-digit year, 2-digit month, 2-digit day
    /// - Must be a real calendar date (`2023-02-29` is rejected)
    /// - Year must be at least 1 (`0000-01-01` is rejected)
    ///
    /// ## Example
    /// ```rust
    /// use boleto_core::due_date::DueDate;
    ///
    /// let due = DueDate::parse("2024-03-15").unwrap();
    /// assert_eq!(due.compact(), "20240315");
    ///
    /// assert!(DueDate::parse("15-03-2024").is_err());
    /// assert!(DueDate::parse("2024/03/15").is_err());
    /// ```
    pub fn parse(input: &str) -> ValidationResult<Self> {
        let invalid = || ValidationError::InvalidDate {
            input: input.to_string(),
        };

        if !has_strict_shape(input) {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(input, INPUT_FORMAT)
            .ok()
            .filter(|d| d.year() >= MIN_YEAR)
            .ok_or_else(invalid)?;

        Ok(DueDate {
            input: input.to_string(),
            date,
        })
    }

    /// The text the date was parsed from, echoed back to clients.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.input
    }

    /// The calendar date.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The date as `YYYYMMDD`.
    pub fn compact(&self) -> String {
        self.date.format(COMPACT_FORMAT).to_string()
    }
}

/// `DDDD-DD-DD` with ASCII digits only.
fn has_strict_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
