//! Request validation errors.

/// Reasons a request is rejected before reaching a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// The image payload is empty
    #[display("no image provided")]
    NoImage,
    /// The prompt is empty
    #[display("no prompt provided")]
    NoPrompt,
    /// The mime type is outside the supported set
    #[display("unsupported mime type {:?}", _0)]
    UnsupportedMimeType(String),
}

/// Validation error with source location tracking.
///
/// # Examples
///
/// ```
/// use vista_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::UnsupportedMimeType("image/gif".into()));
/// assert_eq!(err.kind.to_string(), r#"unsupported mime type "image/gif""#);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
