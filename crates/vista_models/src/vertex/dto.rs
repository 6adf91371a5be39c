//! Wire types for the `generateContent` call.

use base64::Engine;
use serde::{Deserialize, Serialize};
use vista_core::AnalysisRequest;
use vista_error::{ProviderError, ProviderErrorKind};

use crate::GenerationConfig;

/// Instruction prepended to every prompt.
const MARKDOWN_PREFIX: &str = "Please format your response as markdown. Here is the analysis request: ";

/// Request body for `generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; always a single user turn here
    pub contents: Vec<Content>,
    /// Sampling parameters
    pub generation_config: GenerationParams,
}

impl GenerateContentRequest {
    /// Build the body for one image and prompt.
    ///
    /// The image part comes first, followed by the prefixed prompt.
    pub fn new(request: &AnalysisRequest, generation: &GenerationConfig) -> Self {
        let image = Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: request.mime_type().clone(),
                data: base64::engine::general_purpose::STANDARD.encode(request.image_data()),
            }),
        };
        let prompt = Part {
            text: Some(format!("{}{}", MARKDOWN_PREFIX, request.prompt())),
            inline_data: None,
        };

        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![image, prompt],
            }],
            generation_config: GenerationParams {
                max_output_tokens: generation.max_output_tokens,
                temperature: generation.temperature,
            },
        }
    }
}

/// `generationConfig` block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// One turn of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A text or inline binary part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Base64-encoded binary payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Response body for `generateContent`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn into_text(self) -> Result<String, ProviderError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::NoCandidates))?;

        candidate
            .content
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::UnexpectedFormat))
    }
}
