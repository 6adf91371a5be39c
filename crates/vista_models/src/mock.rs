//! Deterministic mock provider.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::debug;
use vista_core::{AnalysisRequest, RequestContext};
use vista_error::{ProviderError, ProviderErrorKind, VistaResult};
use vista_interface::AnalysisProvider;

/// Provider that answers without touching the network.
///
/// Returns the configured canned response, or when none is configured a text
/// derived from the prompt and image size:
///
/// ```
/// use vista_models::MockProvider;
///
/// let provider = MockProvider::new();
/// assert!(provider.response().is_none());
///
/// let canned = MockProvider::with_response("a red square");
/// assert_eq!(canned.response(), Some("a red square"));
/// ```
#[derive(Debug, Default)]
pub struct MockProvider {
    response: Option<String>,
    closed: AtomicBool,
}

impl MockProvider {
    /// A mock that synthesises its response.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that always returns `response`.
    ///
    /// An empty string behaves like [`MockProvider::new`].
    pub fn with_response(response: impl Into<String>) -> Self {
        let response = response.into();
        Self {
            response: (!response.is_empty()).then_some(response),
            closed: AtomicBool::new(false),
        }
    }

    /// The canned response, if one is configured.
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Whether [`AnalysisProvider::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn synthesize(request: &AnalysisRequest) -> String {
        format!(
            "Mock analysis result for prompt: {}. Image size: {} bytes.",
            request.prompt(),
            request.image_size()
        )
    }
}

#[async_trait]
impl AnalysisProvider for MockProvider {
    async fn analyze(&self, ctx: &RequestContext, request: &AnalysisRequest) -> VistaResult<String> {
        if self.is_closed() {
            return Err(ProviderError::new(ProviderErrorKind::Closed).into());
        }

        let response = match &self.response {
            Some(canned) => canned.clone(),
            None => Self::synthesize(request),
        };

        if let Ok(span) = ctx.logger() {
            span.in_scope(|| debug!(response_len = response.len(), "Mock analysis complete"));
        }

        Ok(response)
    }

    async fn close(&self) -> VistaResult<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
