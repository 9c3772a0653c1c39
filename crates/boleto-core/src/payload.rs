//! # Payload Encoder
//!
//! Builds the 44-digit barcode payload from a due date and an amount.
//!
//! ## Payload Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  encode("2024-03-15", "100.00")                                         │
//! │                                                                         │
//! │   001 │ 20240315 │ 00001000 │ 0000000000000000000000000                │
//! │   ─┬─   ───┬────   ───┬────   ────────────┬────────────                │
//! │    │       │          │                   └─ '0' fill up to 44          │
//! │    │       │          └─ amount × 10, truncated, ≥ 8 digits             │
//! │    │       └─ due date as YYYYMMDD                                      │
//! │    └─ issuer code                                                       │
//! │                                                                         │
//! │  Fixed-width framing only: no check digit is computed.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use crate::amount::Amount;
use crate::due_date::DueDate;
use crate::error::{Field, ValidationError, ValidationResult};
use crate::{ISSUER_CODE, PAYLOAD_FILL, PAYLOAD_LEN};

// =============================================================================
// Barcode Payload
// =============================================================================

/// A 44-character, digits-only barcode payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BarcodePayload(String);

impl BarcodePayload {
    /// The payload text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the payload, returning the text.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BarcodePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BarcodePayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Encoder
// =============================================================================

/// Output of a successful [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// The 44-digit payload.
    pub payload: BarcodePayload,
    /// The amount as parsed, before scaling.
    pub amount: Amount,
    /// The validated due date.
    pub due_date: DueDate,
}

/// Encodes a due date and an amount into a barcode payload.
///
/// ## Validation Order
/// ```text
/// either field empty? ──► MissingField   (valor reported first)
///      │
///      ▼
/// bad YYYY-MM-DD?     ──► InvalidDate
///      │
///      ▼
/// bad / negative amt? ──► InvalidAmount
///      │
///      ▼
/// "001" + YYYYMMDD + amount ──► frame to 44
/// ```
///
/// ## Example
/// ```rust
/// use boleto_core::payload::encode;
/// use boleto_core::ValidationError;
///
/// let encoded = encode("2024-03-15", "100.00").unwrap();
/// assert_eq!(
///     encoded.payload.as_str(),
///     "00120240315000010000000000000000000000000000"
/// );
///
/// assert!(matches!(
///     encode("2024-03-15", ""),
///     Err(ValidationError::MissingField { .. })
/// ));
/// ```
pub fn encode(due_date: &str, amount: &str) -> ValidationResult<EncodedPayload> {
    if amount.is_empty() {
        return Err(ValidationError::MissingField {
            field: Field::Valor,
        });
    }
    if due_date.is_empty() {
        return Err(ValidationError::MissingField {
            field: Field::DataVencimento,
        });
    }

    let due_date = DueDate::parse(due_date)?;
    let amount = Amount::parse(amount)?;

    let base = format!(
        "{}{}{}",
        ISSUER_CODE,
        due_date.compact(),
        amount.padded_segment()
    );

    Ok(EncodedPayload {
        payload: BarcodePayload(frame(&base)),
        amount,
        due_date,
    })
}

/// Right-pads with [`PAYLOAD_FILL`] or truncates to exactly [`PAYLOAD_LEN`].
///
/// The base code is always ASCII digits, so byte length equals char length.
fn frame(base: &str) -> String {
    let mut framed: String = base.chars().take(PAYLOAD_LEN).collect();
    while framed.len() < PAYLOAD_LEN {
        framed.push(PAYLOAD_FILL);
    }
    framed
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn is_payload(s: &str) -> bool {
        s.len() == PAYLOAD_LEN && s.bytes().all(|b| b.is_ascii_digit())
    }

    #[test]
    fn test_reference_vector() {
        let encoded = encode("2024-03-15", "100.00").unwrap();
        let payload = encoded.payload.as_str();

        assert_eq!(&payload[0..3], "001");
        assert_eq!(&payload[3..11], "20240315");
        assert_eq!(&payload[11..19], "00001000");
        assert!(payload[19..].bytes().all(|b| b == b'0'));

        let expected = format!("{:0<44}", "0012024031500001000");
        assert_eq!(payload, expected);
        assert_eq!(encoded.amount.to_string(), "100.00");
        assert_eq!(encoded.due_date.as_str(), "2024-03-15");
    }

    #[test]
    fn test_deterministic() {
        let a = encode("2031-12-01", "4321.09").unwrap();
        let b = encode("2031-12-01", "4321.09").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_always_44_digits() {
        let cases = [
            ("2024-03-15", "0"),
            ("1999-01-01", "0.01"),
            ("2024-02-29", "99999999.99"),
            ("9999-12-31", "1844674407370955161"),
            ("2000-06-30", "1844674407370955161.5"),
        ];
        for (date, amount) in cases {
            let encoded = encode(date, amount).unwrap();
            assert!(
                is_payload(encoded.payload.as_str()),
                "{date} / {amount} produced {}",
                encoded.payload
            );
        }
    }

    #[test]
    fn test_wide_amount_is_not_clipped_below_44() {
        // 3 + 8 + 11 digits = 22, still padded to 44
        let encoded = encode("2024-03-15", "1234567890").unwrap();
        assert!(encoded.payload.as_str().starts_with("0012024031512345678900"));
    }

    #[test]
    fn test_frame_truncates_long_base() {
        let long = "1".repeat(50);
        assert_eq!(frame(&long), "1".repeat(44));
        assert_eq!(frame("12"), format!("12{}", "0".repeat(42)));
    }

    #[test]
    fn test_invalid_date() {
        assert!(matches!(
            encode("15-03-2024", "100.00"),
            Err(ValidationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_negative_amount() {
        assert!(matches!(
            encode("2024-03-15", "-5"),
            Err(ValidationError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            encode("2024-03-15", ""),
            Err(ValidationError::MissingField {
                field: Field::Valor
            })
        );
        assert_eq!(
            encode("", "100.00"),
            Err(ValidationError::MissingField {
                field: Field::DataVencimento
            })
        );
        assert!(matches!(
            encode("", ""),
            Err(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn test_date_checked_before_amount() {
        assert!(matches!(
            encode("nope", "nope"),
            Err(ValidationError::InvalidDate { .. })
        ));
    }
}
