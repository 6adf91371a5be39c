//! Request and response envelopes for the analysis call.

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use vista_core::{AnalysisRequest, AnalysisResult};

/// Inbound call payload.
///
/// Every field defaults to empty so that missing values reach validation and
/// fail with their specific message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePromptRequest {
    /// Raw image bytes, base64 on the wire
    #[serde(default, with = "base64_bytes")]
    pub image_data: Vec<u8>,
    /// Declared image mime type
    #[serde(default)]
    pub mime_type: String,
    /// Natural-language instruction
    #[serde(default)]
    pub prompt: String,
}

impl From<ImagePromptRequest> for AnalysisRequest {
    fn from(request: ImagePromptRequest) -> Self {
        AnalysisRequest::new(request.image_data, request.mime_type, request.prompt)
    }
}

/// Successful call payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePromptResponse {
    /// Provider output
    pub response_to_prompt: String,
}

impl From<AnalysisResult> for ImagePromptResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            response_to_prompt: result.into_text(),
        }
    }
}

mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| serde::de::Error::custom(format!("image_data is not valid base64: {}", e)))
    }
}
