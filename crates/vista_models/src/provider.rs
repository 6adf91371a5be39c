//! Provider selection.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, instrument};
use vista_core::{AnalysisRequest, RequestContext};
use vista_error::VistaResult;
use vista_interface::AnalysisProvider;

use crate::{MockProvider, ProviderConfig, ProviderKind, ProviderMetrics, VertexProvider};

/// The provider chosen at startup.
///
/// Variants are fixed for the life of the process; requests never switch
/// between them.
#[derive(Debug)]
pub enum Provider {
    /// Deterministic mock
    Mock(MockProvider),
    /// Vertex AI hosted model
    Vertex(VertexProvider),
}

impl Provider {
    /// Construct the provider named by `config.kind`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid settings, or a provider
    /// error if the backend client cannot be created.
    #[instrument(skip(config), fields(kind = %config.kind))]
    pub fn from_config(config: &ProviderConfig) -> VistaResult<Self> {
        config.validate()?;

        let provider = match config.kind {
            ProviderKind::Mock => Provider::Mock(match config.mock_response.as_deref() {
                Some(response) => MockProvider::with_response(response),
                None => MockProvider::new(),
            }),
            ProviderKind::Vertex => {
                Provider::Vertex(VertexProvider::new(&config.vertex, &config.generation)?)
            }
        };

        info!("Initialized {} provider", provider.kind());
        Ok(provider)
    }

    /// Which kind of provider this is.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::Mock(_) => ProviderKind::Mock,
            Provider::Vertex(_) => ProviderKind::Vertex,
        }
    }

    fn inner(&self) -> &dyn AnalysisProvider {
        match self {
            Provider::Mock(p) => p,
            Provider::Vertex(p) => p,
        }
    }
}

#[async_trait]
impl AnalysisProvider for Provider {
    async fn analyze(&self, ctx: &RequestContext, request: &AnalysisRequest) -> VistaResult<String> {
        let start = Instant::now();
        let result = self.inner().analyze(ctx, request).await;

        let metrics = ProviderMetrics::get();
        match &result {
            Ok(_) => metrics.record_request(self.provider_name(), start.elapsed().as_secs_f64()),
            Err(e) => metrics.record_error(self.provider_name(), e),
        }
        result
    }

    async fn close(&self) -> VistaResult<()> {
        self.inner().close().await
    }

    fn provider_name(&self) -> &'static str {
        self.inner().provider_name()
    }
}
