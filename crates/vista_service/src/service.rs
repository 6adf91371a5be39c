//! The image analysis service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use vista_core::{AnalysisRequest, AnalysisResult, RequestContext};
use vista_error::VistaResult;
use vista_interface::{AnalysisProvider, ImageAnalysis};

use crate::validate;

/// Validates requests and forwards them to a single analysis provider.
///
/// The provider is fixed at construction and shared by all concurrent calls.
#[derive(Clone)]
pub struct AnalysisService {
    provider: Arc<dyn AnalysisProvider>,
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl AnalysisService {
    /// Create a service over `provider`.
    pub fn new(provider: impl AnalysisProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Create a service over an already shared provider.
    pub fn from_provider(provider: Arc<dyn AnalysisProvider>) -> Self {
        Self { provider }
    }

    /// Name of the configured provider.
    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }
}

#[async_trait]
impl ImageAnalysis for AnalysisService {
    async fn process_image_and_prompt(
        &self,
        ctx: &RequestContext,
        request: &AnalysisRequest,
    ) -> VistaResult<AnalysisResult> {
        let span = ctx.logger()?;

        validate(request.image_data(), request.mime_type(), request.prompt())?;

        span.in_scope(|| {
            info!(
                image_size = request.image_size(),
                prompt = %request.prompt(),
                provider = self.provider.provider_name(),
                "Processing image and prompt"
            )
        });

        let text = self.provider.analyze(ctx, request).await?;
        Ok(AnalysisResult::new(text))
    }

    async fn close(&self) -> VistaResult<()> {
        self.provider.close().await
    }
}
