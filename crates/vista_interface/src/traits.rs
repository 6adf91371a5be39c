//! Trait definitions for analysis backends and the analysis service.

use async_trait::async_trait;
use vista_core::{AnalysisRequest, AnalysisResult, RequestContext};
use vista_error::VistaResult;

/// Core trait that every analysis backend implements.
///
/// Implementations must be safe for concurrent use: a single provider instance
/// serves every request for the lifetime of the process.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Turn an image and a prompt into text.
    ///
    /// Callers guarantee the request has already been validated.
    async fn analyze(&self, ctx: &RequestContext, request: &AnalysisRequest) -> VistaResult<String>;

    /// Release any held client resources.
    ///
    /// Called once at shutdown; repeated calls must not fail.
    async fn close(&self) -> VistaResult<()>;

    /// Provider name (e.g., "mock", "vertex").
    fn provider_name(&self) -> &'static str;
}

/// The image analysis capability exposed to the transport layer.
#[async_trait]
pub trait ImageAnalysis: Send + Sync {
    /// Validate the request and run it through the configured provider.
    async fn process_image_and_prompt(
        &self,
        ctx: &RequestContext,
        request: &AnalysisRequest,
    ) -> VistaResult<AnalysisResult>;

    /// Shut down the underlying provider.
    async fn close(&self) -> VistaResult<()>;
}
