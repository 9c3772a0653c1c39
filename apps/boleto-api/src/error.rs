//! # API Error Type
//!
//! Maps handler failures onto HTTP responses.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ValidationError::MissingField  ─┐                                     │
//! │  ValidationError::InvalidDate   ─┼─► 400 text/plain "<message>"        │
//! │  ValidationError::InvalidAmount ─┘                                     │
//! │                                                                         │
//! │  RenderError::*                 ─┐                                     │
//! │  panicked / cancelled task      ─┼─► 500, empty body (detail logged)   │
//! │  serialization failure          ─┘                                     │
//! │                                                                         │
//! │  QueueError::*                  ───► never here: logged by the handler │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use boleto_core::ValidationError;
use boleto_render::RenderError;
use tracing::error;

/// Errors returned from HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Rasterization failed: {0}")]
    Rasterization(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Rasterization(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                e.to_string(),
            )
                .into_response(),
            other => {
                error!(error = %other, "Request failed");
                other.status().into_response()
            }
        }
    }
}
