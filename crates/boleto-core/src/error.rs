//! # Error Types
//!
//! Validation errors raised by the payload encoder.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  boleto-core errors (this file)                                        │
//! │  └── ValidationError  - Client input failures (HTTP 400)               │
//! │                                                                         │
//! │  boleto-render errors (separate crate)                                 │
//! │  └── RenderError      - Rasterization failures (HTTP 500)              │
//! │                                                                         │
//! │  boleto-queue errors (separate crate)                                  │
//! │  └── QueueError       - Publish failures (logged, never surfaced)      │
//! │                                                                         │
//! │  boleto-api errors (in app)                                            │
//! │  └── ApiError         - What the HTTP client sees                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of each [`ValidationError`] is the exact message the
//! HTTP client receives, so it stays in Portuguese to match the form.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Field
// =============================================================================

/// Request field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The amount (`valor`).
    Valor,
    /// The due date (`dataVencimento`).
    DataVencimento,
}

impl Field {
    /// Wire name of the field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::Valor => "valor",
            Field::DataVencimento => "dataVencimento",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// ## User Workflow
/// ```text
/// Form submit (valor: "-5", dataVencimento: "2024-03-15")
///      │
///      ▼
/// encode() ──► InvalidAmount { input: "-5" }
///      │
///      ▼
/// HTTP 400 "Valor inválido."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of the two fields is absent or empty.
    #[error("Valor e data de vencimento são obrigatórios.")]
    MissingField { field: Field },

    /// The due date is not a real `YYYY-MM-DD` date.
    #[error("Data de vencimento inválida. Use o formato YYYY-MM-DD.")]
    InvalidDate { input: String },

    /// The amount is not a non-negative decimal (or is too large to scale).
    #[error("Valor inválido.")]
    InvalidAmount { input: String },
}

impl ValidationError {
    /// The field that failed validation.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField { field } => *field,
            ValidationError::InvalidDate { .. } => Field::DataVencimento,
            ValidationError::InvalidAmount { .. } => Field::Valor,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
