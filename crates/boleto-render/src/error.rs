//! # Render Error Types
//!
//! Every variant ends up as a bare HTTP 500; the detail is only logged.

use thiserror::Error;

use crate::Symbology;

/// Result type alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Rasterization failures.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Nothing to draw.
    #[error("Cannot render an empty payload")]
    EmptyPayload,

    /// The symbology cannot represent the payload.
    #[error("{symbology} cannot encode payload: {reason}")]
    Encode {
        symbology: Symbology,
        reason: String,
    },

    /// The image generator failed.
    #[error("Image generation failed: {0}")]
    Image(String),
}
