//! HTTP handlers.
//!
//! ## Request Lifecycle
//! ```text
//! Received ──► Validating ──┬──► Rejected (400)
//!                           └──► Encoding ──► Rasterizing ──┬──► RasterFailed (500)
//!                                                           └──► Publishing ──► Responding (200)
//! ```
//!
//! Publishing only hands the message to the dispatcher; whatever happens to
//! it afterwards does not change the response.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use boleto_core::{encode, BarcodeRequestResult, GenerateRequest};
use boleto_render::Symbology;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::AppState;

/// Static form served at `/`.
const INDEX_HTML: &str = include_str!("../static/index.html");

/// `GET /` - the barcode form.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /health` - liveness probe.
pub async fn health() -> &'static str {
    "OK"
}

/// `POST /api/barcode-generate`
///
/// Takes the raw body instead of `Json<_>` so that a malformed body reaches
/// the encoder as missing fields.
pub async fn generate_barcode(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request = GenerateRequest::from_body(&body);

    let encoded = encode(request.due_date(), request.amount()).map_err(|e| {
        debug!(field = %e.field(), error = %e, "Rejected barcode request");
        e
    })?;

    info!(barcode = %encoded.payload, "Código de barras gerado");

    let rasterizer = Arc::clone(&state.rasterizer);
    let payload = encoded.payload.as_str().to_string();
    let image = tokio::task::spawn_blocking(move || {
        rasterizer.rasterize(Symbology::Code128, &payload)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Rasterizer task failed: {e}")))??;

    let result = BarcodeRequestResult::new(encoded, image);
    let body = serde_json::to_string(&result.to_response())
        .map_err(|e| ApiError::Internal(format!("Response serialization failed: {e}")))?;

    if let Err(e) = state.dispatcher.enqueue(body.clone()) {
        warn!(barcode = %result.payload, error = %e, "Barcode not forwarded to queue");
    }

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
