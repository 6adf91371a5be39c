//! Provider configuration.
//!
//! Loaded once at startup and never mutated afterwards.

use serde::{Deserialize, Serialize};
use vista_error::ConfigError;

/// Which backend serves analysis requests.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderKind {
    /// Deterministic mock generator
    Mock,
    /// Google Vertex AI hosted vision model
    Vertex,
}

/// Generation parameters forwarded to the hosted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
    /// Sampling temperature (0.0 to 2.0)
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 2048,
            temperature: 0.4,
        }
    }
}

impl GenerationConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_output_tokens == 0 {
            return Err(ConfigError::new("max_output_tokens must be greater than zero"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::new(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Connection parameters for Vertex AI.
///
/// ```toml
/// [provider.vertex]
/// project_id = "my-project"
/// location = "us-central1"
/// model_name = "gemini-1.5-flash"
/// credentials = "/etc/vista/token.json"
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexConfig {
    /// Google Cloud project id
    #[serde(default)]
    pub project_id: String,
    /// Region, e.g. "us-central1"
    #[serde(default)]
    pub location: String,
    /// Publisher model identifier
    #[serde(default)]
    pub model_name: String,
    /// Path to a JSON credentials file, or the JSON itself; empty for no auth
    #[serde(default)]
    pub credentials: String,
    /// Override for the API base URL (defaults to the regional endpoint)
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl std::fmt::Debug for VertexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexConfig")
            .field("project_id", &self.project_id)
            .field("location", &self.location)
            .field("model_name", &self.model_name)
            .field("credentials", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl VertexConfig {
    /// Check that the connection parameters are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("project_id", &self.project_id),
            ("location", &self.location),
            ("model_name", &self.model_name),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::new(format!(
                    "provider.vertex.{} is required when provider.kind = \"vertex\"",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Full `generateContent` URL for the configured model.
    pub fn generate_content_url(&self) -> String {
        let base = match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}-aiplatform.googleapis.com", self.location),
        };
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            base, self.project_id, self.location, self.model_name
        )
    }
}

/// Provider selection plus backend and generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend kind
    pub kind: ProviderKind,
    /// Canned mock response; synthesised when unset or empty
    #[serde(default)]
    pub mock_response: Option<String>,
    /// Vertex AI connection parameters
    #[serde(default)]
    pub vertex: VertexConfig,
    /// Generation parameters
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl ProviderConfig {
    /// A mock provider configuration with a synthesised response.
    pub fn mock() -> Self {
        Self {
            kind: ProviderKind::Mock,
            mock_response: None,
            vertex: VertexConfig::default(),
            generation: GenerationConfig::default(),
        }
    }

    /// A Vertex provider configuration.
    pub fn vertex(vertex: VertexConfig) -> Self {
        Self {
            kind: ProviderKind::Vertex,
            mock_response: None,
            vertex,
            generation: GenerationConfig::default(),
        }
    }

    /// Check the parameters the selected kind depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation.validate()?;
        if self.kind == ProviderKind::Vertex {
            self.vertex.validate()?;
        }
        Ok(())
    }
}
