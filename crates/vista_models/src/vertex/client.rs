//! Vertex AI provider client.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use vista_core::{AnalysisRequest, RequestContext};
use vista_error::{ProviderError, ProviderErrorKind, VistaResult};
use vista_interface::AnalysisProvider;

use super::credentials::resolve_access_token;
use super::dto::{GenerateContentRequest, GenerateContentResponse};
use crate::{GenerationConfig, VertexConfig};

/// Outbound HTTP timeout, independent of the caller's deadline.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosted vision model reached through Vertex AI `generateContent`.
///
/// One instance serves every request. The underlying `reqwest::Client` pools
/// connections and is safe to share. [`AnalysisProvider::close`] drops it,
/// releasing the pool.
///
/// Failures are logged at `debug`/`warn` only; the caller owns the error line.
pub struct VertexProvider {
    client: Mutex<Option<reqwest::Client>>,
    url: String,
    model_name: String,
    access_token: Option<String>,
    generation: GenerationConfig,
}

impl std::fmt::Debug for VertexProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexProvider")
            .field("url", &self.url)
            .field("model_name", &self.model_name)
            .field("authenticated", &self.access_token.is_some())
            .field("generation", &self.generation)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl VertexProvider {
    /// Build a client for the configured model.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection parameters are incomplete, the
    /// credentials cannot be resolved, or the HTTP client cannot be built.
    #[instrument(skip_all, fields(project = %config.project_id, location = %config.location, model = %config.model_name))]
    pub fn new(config: &VertexConfig, generation: &GenerationConfig) -> VistaResult<Self> {
        config.validate()?;
        let access_token = resolve_access_token(&config.credentials)?;

        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::new(ProviderErrorKind::ClientCreation(e.to_string())))?;

        let url = config.generate_content_url();
        debug!(url = %url, authenticated = access_token.is_some(), "Created Vertex provider");

        Ok(Self {
            client: Mutex::new(Some(client)),
            url,
            model_name: config.model_name.clone(),
            access_token,
            generation: *generation,
        })
    }

    /// The `generateContent` URL requests are sent to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Configured model identifier.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Whether the HTTP client has been released by `close`.
    pub fn is_closed(&self) -> bool {
        self.lock_client().is_none()
    }

    fn lock_client(&self) -> std::sync::MutexGuard<'_, Option<reqwest::Client>> {
        // The guarded value is a plain handle, valid even after a panic elsewhere
        self.client.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AnalysisProvider for VertexProvider {
    #[instrument(skip_all, fields(model = %self.model_name, image_size = request.image_size()))]
    async fn analyze(&self, ctx: &RequestContext, request: &AnalysisRequest) -> VistaResult<String> {
        // Clone the handle so the lock is not held across the request
        let client = self
            .lock_client()
            .clone()
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::Closed))?;

        let body = GenerateContentRequest::new(request, &self.generation);
        let mut req = client.post(&self.url).json(&body);
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }

        debug!("Sending generateContent request");
        let response = ctx.guard(req.send()).await?.map_err(|e| {
            warn!("Request failed: {}", e);
            ProviderError::new(ProviderErrorKind::Request(e.to_string()))
        })?;

        let status = response.status();
        let text = ctx.guard(response.text()).await?.map_err(|e| {
            warn!("Failed to read response body: {}", e);
            ProviderError::new(ProviderErrorKind::Decode(e.to_string()))
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Vertex AI returned error");
            return Err(ProviderError::new(ProviderErrorKind::HttpStatus {
                status_code: status.as_u16(),
                message: text,
            })
            .into());
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse response: {}", e);
            ProviderError::new(ProviderErrorKind::Decode(e.to_string()))
        })?;

        let answer = parsed.into_text()?;
        debug!(response_len = answer.len(), "generateContent successful");
        Ok(answer)
    }

    async fn close(&self) -> VistaResult<()> {
        if self.lock_client().take().is_some() {
            debug!("Vertex provider closed, HTTP client released");
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "vertex"
    }
}
