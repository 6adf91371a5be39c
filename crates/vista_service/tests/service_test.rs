//! Tests for AnalysisService orchestration.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use vista_core::{AnalysisRequest, RequestContext};
use vista_error::{
    ContextErrorKind, Fault, ProviderError, ProviderErrorKind, ValidationErrorKind, VistaErrorKind,
    VistaResult,
};
use vista_interface::{AnalysisProvider, ImageAnalysis};
use vista_models::MockProvider;
use vista_service::AnalysisService;

/// Provider that counts calls and returns a fixed outcome.
#[derive(Default)]
struct RecordingProvider {
    calls: AtomicUsize,
    closes: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl AnalysisProvider for RecordingProvider {
    async fn analyze(&self, _ctx: &RequestContext, _request: &AnalysisRequest) -> VistaResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ProviderError::new(ProviderErrorKind::HttpStatus {
                status_code: 503,
                message: "unavailable".to_string(),
            })
            .into())
        } else {
            Ok("recorded".to_string())
        }
    }

    async fn close(&self) -> VistaResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

fn ctx() -> RequestContext {
    RequestContext::new(tracing::info_span!("test"))
}

fn recording(fail: bool) -> (Arc<RecordingProvider>, AnalysisService) {
    let provider = Arc::new(RecordingProvider {
        fail,
        ..Default::default()
    });
    let service = AnalysisService::from_provider(provider.clone());
    (provider, service)
}

#[tokio::test]
async fn test_valid_request_reaches_provider() -> anyhow::Result<()> {
    let (provider, service) = recording(false);
    let request = AnalysisRequest::new(vec![1u8, 2, 3], "image/jpeg", "describe");

    let result = service.process_image_and_prompt(&ctx(), &request).await?;
    assert_eq!(result.text, "recorded");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_invalid_requests_never_reach_provider() {
    let (provider, service) = recording(false);
    let cases = [
        (Vec::<u8>::new(), "image/png", "p", ValidationErrorKind::NoImage),
        (vec![1u8], "image/png", "", ValidationErrorKind::NoPrompt),
        (
            vec![1u8],
            "image/gif",
            "p",
            ValidationErrorKind::UnsupportedMimeType("image/gif".to_string()),
        ),
    ];

    for (image, mime, prompt, expected) in cases {
        let request = AnalysisRequest::new(image, mime, prompt);
        let err = service
            .process_image_and_prompt(&ctx(), &request)
            .await
            .unwrap_err();
        assert_eq!(err.fault(), Fault::Caller);
        match err.kind() {
            VistaErrorKind::Validation(e) => assert_eq!(e.kind, expected),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_provider_failure_is_internal() {
    let (provider, service) = recording(true);
    let request = AnalysisRequest::new(vec![1u8], "image/png", "p");

    let err = service
        .process_image_and_prompt(&ctx(), &request)
        .await
        .unwrap_err();
    assert_eq!(err.fault(), Fault::Internal);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_logger_is_an_error() {
    let (provider, service) = recording(false);
    let request = AnalysisRequest::new(vec![1u8], "image/png", "p");

    let err = service
        .process_image_and_prompt(&RequestContext::without_logger(), &request)
        .await
        .unwrap_err();
    match err.kind() {
        VistaErrorKind::Context(e) => assert_eq!(e.kind, ContextErrorKind::MissingLogger),
        other => panic!("expected context error, got {:?}", other),
    }
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_close_delegates_to_provider() -> anyhow::Result<()> {
    let (provider, service) = recording(false);
    service.close().await?;
    assert_eq!(provider.closes.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_with_mock_provider() -> anyhow::Result<()> {
    let service = AnalysisService::new(MockProvider::new());
    assert_eq!(service.provider_name(), "mock");

    let request = AnalysisRequest::new(vec![0u8; 16], "image/png", "What is it?");
    let result = service.process_image_and_prompt(&ctx(), &request).await?;
    assert_eq!(
        result.text,
        "Mock analysis result for prompt: What is it?. Image size: 16 bytes."
    );
    Ok(())
}
