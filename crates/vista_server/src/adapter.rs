//! The RPC-facing adapter.
//!
//! Per call: admission, delegation to the analysis service, and mapping of
//! the result onto a transport [`Status`]. Backend error detail is logged once
//! here and never returned to the caller.

use std::sync::Arc;

use tracing::{debug, error, warn};
use vista_core::{AnalysisRequest, RequestContext};
use vista_error::VistaResult;
use vista_interface::ImageAnalysis;
use vista_rate_limit::RateLimiter;

use crate::{ImagePromptRequest, ImagePromptResponse, Status};

/// Message returned for every internal fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error processing image and prompt";

/// Message returned when admission control refuses a call.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests";

/// Adapts transport calls onto an [`ImageAnalysis`] service.
#[derive(Clone)]
pub struct ImageAnalysisServer {
    service: Arc<dyn ImageAnalysis>,
    limiter: Arc<RateLimiter>,
}

impl std::fmt::Debug for ImageAnalysisServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAnalysisServer")
            .field("limiter", &self.limiter)
            .finish_non_exhaustive()
    }
}

impl ImageAnalysisServer {
    /// Create an adapter over `service`, gated by `limiter`.
    pub fn new(service: Arc<dyn ImageAnalysis>, limiter: Arc<RateLimiter>) -> Self {
        Self { service, limiter }
    }

    /// Handle one call: admission, then the service.
    pub async fn process_image_and_prompt(
        &self,
        ctx: &RequestContext,
        request: ImagePromptRequest,
    ) -> Result<ImagePromptResponse, Status> {
        self.admit(ctx)?;
        self.process_admitted(ctx, request).await
    }

    /// Check that the call carries a logger and take one token.
    ///
    /// A call without a logger is refused before it consumes a token.
    pub fn admit(&self, ctx: &RequestContext) -> Result<(), Status> {
        let span = ctx.logger().map_err(|e| {
            error!(error = %e, "Call arrived without a logger");
            Status::internal(INTERNAL_ERROR_MESSAGE)
        })?;

        if !self.limiter.allow() {
            span.in_scope(|| warn!("Rejecting call: rate limit exceeded"));
            return Err(Status::resource_exhausted(RATE_LIMITED_MESSAGE));
        }
        Ok(())
    }

    /// Run an already admitted call through the service.
    pub async fn process_admitted(
        &self,
        ctx: &RequestContext,
        request: ImagePromptRequest,
    ) -> Result<ImagePromptResponse, Status> {
        let span = ctx.logger().map_err(|e| {
            error!(error = %e, "Call arrived without a logger");
            Status::internal(INTERNAL_ERROR_MESSAGE)
        })?;

        let request = AnalysisRequest::from(request);
        match self.service.process_image_and_prompt(ctx, &request).await {
            Ok(result) => {
                span.in_scope(|| debug!(response_len = result.text.len(), "Call completed"));
                Ok(result.into())
            }
            Err(e) if e.is_invalid_argument() => {
                span.in_scope(|| debug!(reason = %e.caller_message(), "Rejected invalid request"));
                Err(Status::invalid_argument(e.caller_message()))
            }
            Err(e) => {
                span.in_scope(|| error!(error = %e, "Error processing image and prompt"));
                Err(Status::internal(INTERNAL_ERROR_MESSAGE))
            }
        }
    }

    /// Shut down the underlying service.
    pub async fn close(&self) -> VistaResult<()> {
        self.service.close().await
    }
}
