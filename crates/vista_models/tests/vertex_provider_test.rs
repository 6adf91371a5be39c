//! Vertex provider tests against a local wiremock server.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::json;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use vista_core::{AnalysisRequest, RequestContext};
use vista_error::{ContextErrorKind, ProviderErrorKind, VistaError, VistaErrorKind};
use vista_interface::AnalysisProvider;
use vista_models::{GenerationConfig, Provider, ProviderConfig, VertexConfig, VertexProvider};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Counts error-level events.
struct ErrorCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

const MODEL_PATH: &str =
    "/v1/projects/test-project/locations/us-central1/publishers/google/models/gemini-1.5-flash:generateContent";

fn vertex_config(server: &MockServer, credentials: &str) -> VertexConfig {
    VertexConfig {
        project_id: "test-project".to_string(),
        location: "us-central1".to_string(),
        model_name: "gemini-1.5-flash".to_string(),
        credentials: credentials.to_string(),
        endpoint: Some(server.uri()),
    }
}

fn provider(server: &MockServer) -> VertexProvider {
    VertexProvider::new(
        &vertex_config(server, r#"{"access_token": "test-token"}"#),
        &GenerationConfig::default(),
    )
    .expect("provider")
}

fn request() -> AnalysisRequest {
    AnalysisRequest::new(vec![0x89u8, 0x50, 0x4E, 0x47], "image/png", "What is this?")
}

fn ctx() -> RequestContext {
    RequestContext::new(tracing::info_span!("test"))
}

fn text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4}
    })
}

fn provider_kind(err: &VistaError) -> ProviderErrorKind {
    match err.kind() {
        VistaErrorKind::Provider(e) => e.kind.clone(),
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_successful_analysis() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "generationConfig": {"maxOutputTokens": 2048}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("# A PNG header")))
        .expect(1)
        .mount(&server)
        .await;

    let text = provider(&server).analyze(&ctx(), &request()).await?;
    assert_eq!(text, "# A PNG header");
    Ok(())
}

#[tokio::test]
async fn test_request_body_carries_image_and_prefixed_prompt() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("ok")))
        .mount(&server)
        .await;

    provider(&server).analyze(&ctx(), &request()).await?;

    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&received[0].body)?;
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    assert_eq!(parts[0]["inlineData"]["data"], "iVBORw==");
    assert_eq!(
        parts[1]["text"],
        "Please format your response as markdown. Here is the analysis request: What is this?"
    );
    Ok(())
}

#[tokio::test]
async fn test_empty_credentials_send_no_authorization() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("ok")))
        .mount(&server)
        .await;

    let provider = VertexProvider::new(&vertex_config(&server, ""), &GenerationConfig::default())?;
    provider.analyze(&ctx(), &request()).await?;

    let received = server.received_requests().await.unwrap_or_default();
    assert!(!received[0].headers.contains_key("authorization"));
    Ok(())
}

#[tokio::test]
async fn test_zero_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let err = provider(&server)
        .analyze(&ctx(), &request())
        .await
        .unwrap_err();
    assert_eq!(provider_kind(&err), ProviderErrorKind::NoCandidates);
    assert_eq!(err.caller_message(), "no response candidates");
}

#[tokio::test]
async fn test_non_text_first_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"functionCall": {"name": "f"}}]}}]
        })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .analyze(&ctx(), &request())
        .await
        .unwrap_err();
    assert_eq!(provider_kind(&err), ProviderErrorKind::UnexpectedFormat);
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .analyze(&ctx(), &request())
        .await
        .unwrap_err();
    assert_eq!(
        provider_kind(&err),
        ProviderErrorKind::HttpStatus {
            status_code: 500,
            message: "backend exploded".to_string(),
        }
    );
    assert!(!err.is_invalid_argument());
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .analyze(&ctx(), &request())
        .await
        .unwrap_err();
    assert!(matches!(provider_kind(&err), ProviderErrorKind::Decode(_)));
}

#[tokio::test]
async fn test_deadline_aborts_slow_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response("too late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let ctx = ctx().with_timeout(Duration::from_millis(100));
    let err = provider(&server)
        .analyze(&ctx, &request())
        .await
        .unwrap_err();
    match err.kind() {
        VistaErrorKind::Context(e) => assert_eq!(e.kind, ContextErrorKind::DeadlineExceeded),
        other => panic!("expected deadline error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cancelled_context_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("ok")))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = ctx();
    ctx.cancel();
    let err = provider(&server)
        .analyze(&ctx, &request())
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), VistaErrorKind::Context(_)));
}

#[tokio::test]
async fn test_close_twice_then_analyze_fails() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let provider = provider(&server);
    assert!(!provider.is_closed());

    provider.close().await?;
    assert!(provider.is_closed(), "close releases the HTTP client");
    provider.close().await?;

    let err = provider.analyze(&ctx(), &request()).await.unwrap_err();
    assert_eq!(provider_kind(&err), ProviderErrorKind::Closed);
    Ok(())
}

#[tokio::test]
async fn test_provider_enum_selects_vertex() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("via enum")))
        .mount(&server)
        .await;

    let config = ProviderConfig::vertex(vertex_config(&server, ""));
    let provider = Provider::from_config(&config)?;
    assert_eq!(provider.provider_name(), "vertex");
    assert_eq!(provider.analyze(&ctx(), &request()).await?, "via enum");
    Ok(())
}

#[test]
fn test_credentials_without_token_fail_construction() {
    let config = VertexConfig {
        project_id: "p".to_string(),
        location: "l".to_string(),
        model_name: "m".to_string(),
        credentials: r#"{"client_email": "svc@example.iam"}"#.to_string(),
        endpoint: None,
    };
    let err = VertexProvider::new(&config, &GenerationConfig::default()).unwrap_err();
    assert!(matches!(
        provider_kind(&err),
        ProviderErrorKind::Credentials(_)
    ));
}

#[tokio::test]
async fn test_backend_failures_leave_error_logging_to_the_caller() {
    let errors = Arc::new(AtomicUsize::new(0));
    let _guard = tracing_subscriber::registry()
        .with(ErrorCounter(errors.clone()))
        .set_default();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let provider = provider(&server);
    let http_err = provider.analyze(&ctx(), &request()).await.unwrap_err();
    assert!(matches!(
        provider_kind(&http_err),
        ProviderErrorKind::HttpStatus { status_code: 503, .. }
    ));

    server.reset().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    assert!(provider.analyze(&ctx(), &request()).await.is_err());

    assert_eq!(errors.load(Ordering::SeqCst), 0);
}
