//! Analysis provider implementations for Vista.
//!
//! # Available Providers
//!
//! - **Mock** - deterministic text, no network access; used for local runs and
//!   for testing the orchestration layer
//! - **Vertex** - Google Vertex AI `generateContent` with an inline image part
//!
//! The provider is chosen once at startup from [`ProviderConfig`] and never
//! switched per request:
//!
//! ```
//! use vista_models::{Provider, ProviderConfig, ProviderKind};
//!
//! let config = ProviderConfig::mock();
//! let provider = Provider::from_config(&config).unwrap();
//! assert_eq!(provider.kind(), ProviderKind::Mock);
//! ```

mod config;
mod metrics;
mod mock;
mod provider;
mod vertex;

pub use config::{GenerationConfig, ProviderConfig, ProviderKind, VertexConfig};
pub use metrics::ProviderMetrics;
pub use mock::MockProvider;
pub use provider::Provider;
pub use vertex::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationParams,
    InlineData, Part, VertexProvider,
};
