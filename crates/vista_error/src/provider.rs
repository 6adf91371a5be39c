//! Analysis provider error types.

/// Failures raised by an analysis provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// The backend answered without any candidate
    #[display("no response candidates")]
    NoCandidates,
    /// The first candidate could not be read as text
    #[display("unexpected response format")]
    UnexpectedFormat,
    /// Backend returned a non-success HTTP status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// Sending the request failed
    #[display("Request failed: {}", _0)]
    Request(String),
    /// Response body could not be decoded
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
    /// Credentials could not be loaded
    #[display("Invalid credentials: {}", _0)]
    Credentials(String),
    /// Backend client could not be built
    #[display("Failed to create client: {}", _0)]
    ClientCreation(String),
    /// Provider was already shut down
    #[display("provider is closed")]
    Closed,
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use vista_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::NoCandidates);
/// assert!(format!("{}", err).contains("no response candidates"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
