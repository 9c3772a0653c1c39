//! # Boleto API Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  env ──► ApiConfig ──► RedisQueuePublisher ──► PublishDispatcher (task) │
//! │                                                        │                │
//! │                        Code128Rasterizer ──► AppState ◄┘ handle         │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                                     axum::serve (HTTP_PORT)             │
//! │                                                  │ Ctrl+C / SIGTERM     │
//! │                                                  ▼                      │
//! │                                  drain dispatcher, log summary, exit    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use boleto_api::{cors_layer, router, ApiConfig, AppState};
use boleto_queue::{PublishDispatcher, QueuePublisher, RedisQueuePublisher};
use boleto_render::Code128Rasterizer;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Boleto API server...");

    let config = ApiConfig::load().context("Failed to load configuration")?;
    info!(
        port = config.http_port,
        queue = %config.queue_name,
        "Configuration loaded"
    );

    // Publisher connects lazily on first publish
    let publisher: Arc<dyn QueuePublisher> = Arc::new(
        RedisQueuePublisher::new(&config.queue_connection_target, config.queue_name.clone())
            .context("Invalid queue connection target")?,
    );

    let (dispatcher, handle) = PublishDispatcher::new(publisher, config.publish_buffer);
    let dispatcher_task = tokio::spawn(dispatcher.run());

    let state = Arc::new(AppState::new(
        Arc::new(Code128Rasterizer::new(config.barcode_height)),
        handle.clone(),
    ));
    let app = router(state, cors_layer(&config.cors_allowed_origins));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    if let Err(e) = handle.shutdown().await {
        warn!(error = %e, "Dispatcher already stopped");
    }
    match dispatcher_task.await {
        Ok(summary) => info!(
            published = summary.published,
            failed = summary.failed,
            "Dispatcher drained"
        ),
        Err(e) => warn!(error = %e, "Dispatcher task ended abnormally"),
    }

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,boleto_api=debug,boleto_queue=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
