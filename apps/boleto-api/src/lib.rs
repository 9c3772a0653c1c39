//! # Boleto API
//!
//! HTTP surface for barcode generation.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  GET  /                      ───► static form                          │
//! │  GET  /health                ───► "OK"                                 │
//! │  POST /api/barcode-generate  ───► encode ─► rasterize ─► enqueue       │
//! │                                                                         │
//! │  layers: CORS ─► request tracing                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use boleto_queue::DispatchHandle;
use boleto_render::Rasterizer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;

/// Barcode generation endpoint.
pub const GENERATE_PATH: &str = "/api/barcode-generate";

/// Shared application state.
pub struct AppState {
    /// Barcode renderer.
    pub rasterizer: Arc<dyn Rasterizer>,

    /// Feeds generated barcodes to the queue publisher.
    pub dispatcher: DispatchHandle,
}

impl AppState {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, dispatcher: DispatchHandle) -> Self {
        Self {
            rasterizer,
            dispatcher,
        }
    }
}

/// Builds the application router.
pub fn router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route(GENERATE_PATH, post(handlers::generate_barcode))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Builds the CORS layer for `origins`. A `*` entry allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(parsed))
}
