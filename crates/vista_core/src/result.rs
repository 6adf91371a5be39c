//! Result type for image analysis.

use serde::{Deserialize, Serialize};

/// Text produced by a provider for one request.
///
/// # Examples
///
/// ```
/// use vista_core::AnalysisResult;
///
/// let result = AnalysisResult::new("A cat on a sofa.");
/// assert_eq!(result.text, "A cat on a sofa.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The analysis text
    pub text: String,
}

impl AnalysisResult {
    /// Wrap analysis text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Consume the result, returning the text.
    pub fn into_text(self) -> String {
        self.text
    }
}
