//! # Domain Types
//!
//! Request and response shapes for barcode generation.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │ GenerateRequest │   │ BarcodeRequestResult │   │ BarcodeResponse │  │
//! │  │  ─────────────  │──►│  ──────────────────  │──►│  ─────────────  │  │
//! │  │  dataVencimento │   │  payload             │   │  barcode        │  │
//! │  │  valor          │   │  original_amount     │   │  valorOriginal  │  │
//! │  │  (both optional)│   │  due_date            │   │  dataVencimento │  │
//! │  └─────────────────┘   │  image_bytes (PNG)   │   │  imageBase64    │  │
//! │                        └──────────────────────┘   └─────────────────┘  │
//! │                                                                         │
//! │  The response JSON is both the HTTP body and the queue message.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::amount::Amount;
use crate::payload::EncodedPayload;

// =============================================================================
// Generate Request
// =============================================================================

/// Body of `POST /api/barcode-generate`.
///
/// Both fields are optional so that absence is reported by the encoder as
/// `MissingField` rather than by the JSON layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Due date text, expected as `YYYY-MM-DD`.
    #[serde(default)]
    pub data_vencimento: Option<String>,

    /// Amount text. A bare JSON number is accepted as well.
    #[serde(default, deserialize_with = "text_or_number")]
    pub valor: Option<String>,
}

impl GenerateRequest {
    /// Parses a raw request body.
    ///
    /// A body that is not a JSON object with the expected field types is
    /// treated as an empty request.
    ///
    /// ## Example
    /// ```rust
    /// use boleto_core::GenerateRequest;
    ///
    /// let req = GenerateRequest::from_body(br#"{"dataVencimento":"2024-03-15","valor":"10"}"#);
    /// assert_eq!(req.due_date(), "2024-03-15");
    ///
    /// let req = GenerateRequest::from_body(b"not json");
    /// assert_eq!(req, GenerateRequest::default());
    /// ```
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The due date, or `""` when absent.
    pub fn due_date(&self) -> &str {
        self.data_vencimento.as_deref().unwrap_or_default()
    }

    /// The amount, or `""` when absent.
    pub fn amount(&self) -> &str {
        self.valor.as_deref().unwrap_or_default()
    }
}

/// Accepts `"12.50"`, `12.50` or `null`.
///
/// Numbers keep their literal text, so `1e3` reaches the amount parser as
/// `"1e3"` and is rejected there.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "valor must be a string or a number, got {other}"
        ))),
    }
}

// =============================================================================
// Barcode Request Result
// =============================================================================

/// Everything produced for one request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeRequestResult {
    /// The 44-digit payload.
    pub payload: String,

    /// The amount as parsed.
    pub original_amount: Amount,

    /// The due date exactly as received.
    pub due_date: String,

    /// PNG bytes rendered for `payload`.
    pub image_bytes: Vec<u8>,
}

impl BarcodeRequestResult {
    /// Combines an encoded payload with its rendered image.
    pub fn new(encoded: EncodedPayload, image_bytes: Vec<u8>) -> Self {
        BarcodeRequestResult {
            payload: encoded.payload.into_string(),
            original_amount: encoded.amount,
            due_date: encoded.due_date.as_str().to_string(),
            image_bytes,
        }
    }

    /// Shapes the result for the wire, base64-encoding the image.
    pub fn to_response(&self) -> BarcodeResponse {
        BarcodeResponse {
            barcode: self.payload.clone(),
            valor_original: self.original_amount,
            data_vencimento: self.due_date.clone(),
            image_base64: STANDARD.encode(&self.image_bytes),
        }
    }
}

// =============================================================================
// Barcode Response
// =============================================================================

/// JSON body returned to the client and published to the queue.
///
/// ```json
/// {
///   "barcode": "00120240315000010000000000000000000000000000",
///   "valorOriginal": 100.00,
///   "dataVencimento": "2024-03-15",
///   "imageBase64": "iVBORw0KGgo..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeResponse {
    pub barcode: String,
    pub valor_original: Amount,
    pub data_vencimento: String,
    pub image_base64: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
