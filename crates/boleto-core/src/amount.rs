//! # Amount Module
//!
//! The monetary amount typed into the form, kept as an exact decimal.
//!
//! ## Minor-Unit Scaling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "100.00" ──► Decimal(100.00) ──► × 10 ──► 1000 ──► "00001000"          │
//! │  "10.55"  ──► Decimal(10.55)  ──► × 10 ──► 105.5 ─► trunc ─► "00000105" │
//! │                                                                         │
//! │  The factor is 10, not 100.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::error::{ValidationError, ValidationResult};
use crate::AMOUNT_WIDTH;

/// Factor applied to the decimal amount before truncation.
pub const MINOR_UNIT_SCALE: Decimal = Decimal::TEN;

// =============================================================================
// Amount Type
// =============================================================================

/// A validated, non-negative amount.
///
/// Holds the decimal exactly as parsed (scale included, so `100.00` stays
/// `100.00` when echoed back) together with its scaled integer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    value: Decimal,
    minor_units: u64,
}

impl Amount {
    /// Parses an amount.
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - Must be a plain decimal number (`12`, `12.5`, `0.99`); digit
    ///   separators (`1_000`) and exponents (`1e3`) are rejected
    /// - Must not be negative
    /// - The scaled value must fit in a `u64`
    ///
    /// ## Example
    /// ```rust
    /// use boleto_core::amount::Amount;
    ///
    /// let amount = Amount::parse("100.00").unwrap();
    /// assert_eq!(amount.minor_units(), 1000);
    /// assert_eq!(amount.to_string(), "100.00");
    ///
    /// assert!(Amount::parse("-5").is_err());
    /// assert!(Amount::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> ValidationResult<Self> {
        let invalid = || ValidationError::InvalidAmount {
            input: input.to_string(),
        };

        let text = input.trim();
        if !is_plain_decimal(text) {
            return Err(invalid());
        }

        let mut value = Decimal::from_str(text).map_err(|_| invalid())?;

        if value.is_sign_negative() {
            if !value.is_zero() {
                return Err(invalid());
            }
            // "-0" is zero, not a negative amount
            value.set_sign_positive(true);
        }

        let minor_units = value
            .checked_mul(MINOR_UNIT_SCALE)
            .and_then(|scaled| scaled.trunc().to_u64())
            .ok_or_else(invalid)?;

        Ok(Amount { value, minor_units })
    }

    /// The amount as parsed.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// The amount × [`MINOR_UNIT_SCALE`], truncated toward zero.
    #[inline]
    pub fn minor_units(&self) -> u64 {
        self.minor_units
    }

    /// The scaled amount zero-padded to at least [`AMOUNT_WIDTH`] digits.
    ///
    /// ## Example
    /// ```rust
    /// use boleto_core::amount::Amount;
    ///
    /// assert_eq!(Amount::parse("100.00").unwrap().padded_segment(), "00001000");
    /// ```
    pub fn padded_segment(&self) -> String {
        format!("{:0width$}", self.minor_units, width = AMOUNT_WIDTH)
    }
}

/// Optional sign, digits, optional `.` and digits; at least one digit.
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// Serializes as a JSON number carrying the parsed digits (`100.00`, not `100`).
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.value, serializer)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
