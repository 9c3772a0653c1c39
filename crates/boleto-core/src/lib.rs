//! # boleto-core: Pure Encoding Logic
//!
//! This crate turns a due date and an amount into the 44-digit payload that
//! gets printed as a barcode. Every function here is pure: no I/O, no clock,
//! no randomness.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Boleto Barcode Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Static Form (HTML)                           │   │
//! │  │        dataVencimento + valor ──► barcode text + image          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ POST /api/barcode-generate             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    boleto-api (axum)                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ boleto-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ due_date  │  │  amount   │  │  payload  │  │   types   │  │   │
//! │  │   │ YYYY-MM-DD│  │ ×10 scale │  │ 44 digits │  │ response  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │            ┌───────────────────┴──────────────────┐                     │
//! │  ┌─────────▼─────────┐                 ┌──────────▼─────────┐           │
//! │  │  boleto-render    │                 │   boleto-queue     │           │
//! │  │  Code 128 → PNG   │                 │   Redis list       │           │
//! │  └───────────────────┘                 └────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`payload`] - The encoder: date + amount → 44-digit payload
//! - [`amount`] - Decimal amount with the ×10 minor-unit scaling
//! - [`due_date`] - Strict `YYYY-MM-DD` parsing
//! - [`types`] - Request/response shapes
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use boleto_core::payload::encode;
//!
//! let encoded = encode("2024-03-15", "100.00").unwrap();
//! assert!(encoded.payload.as_str().starts_with("0012024031500001000"));
//! assert_eq!(encoded.payload.as_str().len(), 44);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod due_date;
pub mod error;
pub mod payload;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use amount::Amount;
pub use due_date::DueDate;
pub use error::{Field, ValidationError, ValidationResult};
pub use payload::{encode, BarcodePayload, EncodedPayload};
pub use types::{BarcodeRequestResult, BarcodeResponse, GenerateRequest};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed issuer code prefixed to every payload.
pub const ISSUER_CODE: &str = "001";

/// Exact length of every payload.
pub const PAYLOAD_LEN: usize = 44;

/// Minimum width of the amount segment (zero-padded on the left).
pub const AMOUNT_WIDTH: usize = 8;

/// Character used to fill the payload up to [`PAYLOAD_LEN`].
pub const PAYLOAD_FILL: char = '0';
