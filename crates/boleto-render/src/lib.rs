//! # boleto-render: Barcode Rasterization
//!
//! Renders a payload string as a PNG image of a linear barcode.
//!
//! ## Rendering Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  "0012024031500001000..."  (44 digits)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Code128Rasterizer::rasterize(Symbology::Code128, payload)             │
//! │           │                                                             │
//! │           ├── even-length digits ──► charset C (two digits per bar)    │
//! │           └── anything else      ──► charset B                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  bar modules (1 = bar, 0 = space)                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  PNG bytes (height configurable, 1px per module)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`Rasterizer`] trait is the seam the HTTP layer depends on, so tests
//! can swap in a renderer that fails on demand.

pub mod code128;
pub mod error;

pub use code128::Code128Rasterizer;
pub use error::{RenderError, RenderResult};

use std::fmt;

// =============================================================================
// Symbology
// =============================================================================

/// Visual encoding scheme used to draw a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symbology {
    /// Code 128 (ISO/IEC 15417).
    #[default]
    Code128,
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbology::Code128 => f.write_str("code128"),
        }
    }
}

// =============================================================================
// Rasterizer
// =============================================================================

/// Renders a payload into encoded image bytes.
///
/// Implementations are CPU-bound and synchronous; async callers should run
/// them on a blocking thread.
pub trait Rasterizer: Send + Sync {
    /// Renders `payload` with `symbology`, returning PNG bytes.
    fn rasterize(&self, symbology: Symbology, payload: &str) -> RenderResult<Vec<u8>>;
}

/// PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
