//! Errors raised by the per-call request context.

/// Request context failure conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ContextErrorKind {
    /// No logger span was attached to the call
    #[display("logger not found in request context")]
    MissingLogger,
    /// The caller cancelled the call
    #[display("request cancelled")]
    Cancelled,
    /// The call deadline passed
    #[display("request deadline exceeded")]
    DeadlineExceeded,
}

/// Context error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Context Error: {} at line {} in {}", kind, line, file)]
pub struct ContextError {
    /// The kind of error that occurred
    pub kind: ContextErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ContextError {
    /// Create a new ContextError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ContextErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
