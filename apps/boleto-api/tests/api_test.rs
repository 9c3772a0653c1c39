//! Router tests against in-memory fakes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::Engine;
use boleto_api::{cors_layer, router, AppState, GENERATE_PATH};
use boleto_queue::{
    DispatchHandle, DispatchSummary, PublishDispatcher, QueueError, QueuePublisher, QueueResult,
};
use boleto_render::{Code128Rasterizer, Rasterizer, RenderError, RenderResult, Symbology, PNG_SIGNATURE};
use tower::ServiceExt;

const EXPECTED_BARCODE: &str = "00120240315000010000000000000000000000000000";

// =============================================================================
// Fakes
// =============================================================================

/// Records every published message; fails all of them when `reject` is set.
#[derive(Default)]
struct RecordingPublisher {
    sent: Mutex<Vec<String>>,
    reject: bool,
}

#[async_trait]
impl QueuePublisher for RecordingPublisher {
    fn queue_name(&self) -> &str {
        "test-queue"
    }

    async fn publish(&self, message: &str) -> QueueResult<()> {
        if self.reject {
            return Err(QueueError::Publish {
                queue: "test-queue".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    fn rasterize(&self, symbology: Symbology, _payload: &str) -> RenderResult<Vec<u8>> {
        Err(RenderError::Encode {
            symbology,
            reason: "forced failure".to_string(),
        })
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn app(rasterizer: Arc<dyn Rasterizer>, dispatcher: DispatchHandle) -> Router {
    let state = Arc::new(AppState::new(rasterizer, dispatcher));
    router(state, cors_layer(&["*".to_string()]))
}

fn generate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(GENERATE_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Runs a request with a live dispatcher, then drains it.
async fn send_and_drain(
    publisher: Arc<RecordingPublisher>,
    body: &str,
) -> (StatusCode, String, DispatchSummary) {
    let (dispatcher, handle) = PublishDispatcher::new(publisher, 8);
    let task = tokio::spawn(dispatcher.run());
    let app = app(Arc::new(Code128Rasterizer::default()), handle.clone());

    let (status, text) = send(&app, generate_request(body)).await;

    handle.shutdown().await.unwrap();
    let summary = task.await.unwrap();
    (status, text, summary)
}

// =============================================================================
// Generate
// =============================================================================

#[tokio::test]
async fn test_generate_success_shape() {
    let publisher = Arc::new(RecordingPublisher::default());
    let (status, text, summary) = send_and_drain(
        publisher.clone(),
        r#"{"dataVencimento":"2024-03-15","valor":"100.00"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains(r#""valorOriginal":100.00"#), "body: {text}");

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let barcode = json["barcode"].as_str().unwrap();
    assert_eq!(barcode, EXPECTED_BARCODE);
    assert_eq!(barcode.len(), 44);
    assert!(barcode.bytes().all(|b| b.is_ascii_digit()));
    assert_eq!(json["dataVencimento"], "2024-03-15");

    let image = base64::engine::general_purpose::STANDARD
        .decode(json["imageBase64"].as_str().unwrap())
        .unwrap();
    assert_eq!(&image[..8], &PNG_SIGNATURE);

    // Queue message is the response body
    assert_eq!(summary, DispatchSummary { published: 1, failed: 0 });
    assert_eq!(*publisher.sent.lock().unwrap(), vec![text]);
}

#[tokio::test]
async fn test_generate_content_type_is_json() {
    let (_dispatcher, handle) = PublishDispatcher::new(Arc::new(RecordingPublisher::default()), 8);
    let app = app(Arc::new(Code128Rasterizer::default()), handle);

    let response = app
        .oneshot(generate_request(
            r#"{"dataVencimento":"2024-03-15","valor":"100.00"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn test_generate_accepts_numeric_amount() {
    let (_dispatcher, handle) = PublishDispatcher::new(Arc::new(RecordingPublisher::default()), 8);
    let app = app(Arc::new(Code128Rasterizer::default()), handle);

    let (status, text) = send(
        &app,
        generate_request(r#"{"dataVencimento":"2024-03-15","valor":100.00}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["barcode"], EXPECTED_BARCODE);
}

#[tokio::test]
async fn test_generate_is_deterministic() {
    let (_dispatcher, handle) = PublishDispatcher::new(Arc::new(RecordingPublisher::default()), 8);
    let app = app(Arc::new(Code128Rasterizer::default()), handle);
    let body = r#"{"dataVencimento":"2030-12-31","valor":"1234.56"}"#;

    let (first_status, first) = send(&app, generate_request(body)).await;
    let (second_status, second) = send(&app, generate_request(body)).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_validation_messages() {
    let missing = "Valor e data de vencimento são obrigatórios.";
    let bad_date = "Data de vencimento inválida. Use o formato YYYY-MM-DD.";
    let bad_amount = "Valor inválido.";

    let cases = [
        (r#"{"dataVencimento":"2024-03-15"}"#, missing),
        (r#"{"valor":"100.00"}"#, missing),
        (r#"{"dataVencimento":"","valor":""}"#, missing),
        (r#"{"dataVencimento":"15/03/2024","valor":"100.00"}"#, bad_date),
        (r#"{"dataVencimento":"2024-02-30","valor":"100.00"}"#, bad_date),
        (r#"{"dataVencimento":"2024-03-15","valor":"abc"}"#, bad_amount),
        (r#"{"dataVencimento":"2024-03-15","valor":"-1"}"#, bad_amount),
        (r#"{"dataVencimento":"2024-03-15","valor":"1_0"}"#, bad_amount),
        (r#"{"dataVencimento":"2024-03-15","valor":1e3}"#, bad_amount),
        (r#"{"dataVencimento":"0000-01-01","valor":"1"}"#, bad_date),
        ("not json at all", missing),
        ("", missing),
    ];

    let publisher = Arc::new(RecordingPublisher::default());
    let (dispatcher, handle) = PublishDispatcher::new(publisher.clone(), 8);
    let task = tokio::spawn(dispatcher.run());
    let app = app(Arc::new(Code128Rasterizer::default()), handle.clone());

    for (body, expected) in cases {
        let response = app.clone().oneshot(generate_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(std::str::from_utf8(&bytes).unwrap(), expected, "body: {body}");
    }

    // Rejected requests never reach the queue
    handle.shutdown().await.unwrap();
    let summary = task.await.unwrap();
    assert_eq!(summary, DispatchSummary::default());
    assert!(publisher.sent.lock().unwrap().is_empty());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_rasterizer_failure_is_500_with_empty_body() {
    let publisher = Arc::new(RecordingPublisher::default());
    let (dispatcher, handle) = PublishDispatcher::new(publisher.clone(), 8);
    let task = tokio::spawn(dispatcher.run());
    let app = app(Arc::new(FailingRasterizer), handle.clone());

    let (status, text) = send(
        &app,
        generate_request(r#"{"dataVencimento":"2024-03-15","valor":"100.00"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(text.is_empty());

    handle.shutdown().await.unwrap();
    assert_eq!(task.await.unwrap().published, 0);
}

#[tokio::test]
async fn test_publish_failure_still_succeeds() {
    let publisher = Arc::new(RecordingPublisher {
        reject: true,
        ..Default::default()
    });
    let (status, text, summary) = send_and_drain(
        publisher,
        r#"{"dataVencimento":"2024-03-15","valor":"100.00"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains(EXPECTED_BARCODE));
    assert_eq!(summary, DispatchSummary { published: 0, failed: 1 });
}

#[tokio::test]
async fn test_full_dispatcher_still_succeeds() {
    let (_dispatcher, handle) = PublishDispatcher::new(Arc::new(RecordingPublisher::default()), 1);
    handle.enqueue("occupying the only slot".to_string()).unwrap();
    let app = app(Arc::new(Code128Rasterizer::default()), handle);

    let (status, _) = send(
        &app,
        generate_request(r#"{"dataVencimento":"2024-03-15","valor":"100.00"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_stopped_dispatcher_still_succeeds() {
    let (dispatcher, handle) = PublishDispatcher::new(Arc::new(RecordingPublisher::default()), 8);
    drop(dispatcher);
    let app = app(Arc::new(Code128Rasterizer::default()), handle);

    let (status, _) = send(
        &app,
        generate_request(r#"{"dataVencimento":"2024-03-15","valor":"100.00"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Static routes
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (_dispatcher, handle) = PublishDispatcher::new(Arc::new(RecordingPublisher::default()), 8);
    let app = app(Arc::new(Code128Rasterizer::default()), handle);

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, text) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "OK");
}

#[tokio::test]
async fn test_index_serves_form() {
    let (_dispatcher, handle) = PublishDispatcher::new(Arc::new(RecordingPublisher::default()), 8);
    let app = app(Arc::new(Code128Rasterizer::default()), handle);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = std::str::from_utf8(&bytes).unwrap();
    assert!(html.contains(GENERATE_PATH));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (_dispatcher, handle) = PublishDispatcher::new(Arc::new(RecordingPublisher::default()), 8);
    let app = app(Arc::new(Code128Rasterizer::default()), handle);

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://form.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
