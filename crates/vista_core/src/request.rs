//! Request type for image analysis.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// An image plus the prompt to analyse it with.
///
/// Constructed per call and dropped when the call returns.
///
/// # Examples
///
/// ```
/// use vista_core::{AnalysisRequest, AnalysisRequestBuilder};
///
/// let request = AnalysisRequestBuilder::default()
///     .image_data(vec![0x89u8, 0x50, 0x4E, 0x47])
///     .mime_type("image/png")
///     .prompt("What is in this image?")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.image_data().len(), 4);
/// assert_eq!(request.mime_type(), "image/png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AnalysisRequest {
    /// Raw image bytes
    image_data: Vec<u8>,
    /// Declared mime type of the image
    mime_type: String,
    /// Natural-language instruction
    prompt: String,
}

impl AnalysisRequest {
    /// Create a request from its parts.
    pub fn new(
        image_data: impl Into<Vec<u8>>,
        mime_type: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            image_data: image_data.into(),
            mime_type: mime_type.into(),
            prompt: prompt.into(),
        }
    }

    /// Image size in bytes.
    pub fn image_size(&self) -> usize {
        self.image_data.len()
    }
}
