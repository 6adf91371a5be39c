//! Top-level error wrapper types.

use crate::{ConfigError, ContextError, ProviderError, ServerError, ValidationError};

/// Which side of the call an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Fault {
    /// Bad input; the message is safe to return verbatim
    #[display("caller")]
    Caller,
    /// Backend, infrastructure or configuration trouble; detail stays in logs
    #[display("internal")]
    Internal,
}

/// Every error condition the service can produce.
///
/// # Examples
///
/// ```
/// use vista_error::{ProviderError, ProviderErrorKind, VistaError};
///
/// let err: VistaError = ProviderError::new(ProviderErrorKind::NoCandidates).into();
/// assert!(format!("{}", err).contains("no response candidates"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VistaErrorKind {
    /// Request failed validation
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Analysis provider failed
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Request context problem (missing logger, cancellation, deadline)
    #[from(ContextError)]
    Context(ContextError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Transport server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Vista error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vista_error::{ConfigError, Fault, VistaResult};
///
/// fn might_fail() -> VistaResult<()> {
///     Err(ConfigError::new("unknown provider kind"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert_eq!(err.fault(), Fault::Internal);
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vista Error: {}", _0)]
pub struct VistaError(Box<VistaErrorKind>);

impl VistaError {
    /// Create a new error from a kind.
    pub fn new(kind: VistaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VistaErrorKind {
        &self.0
    }

    /// Classify the error as a caller or internal fault.
    ///
    /// Only validation failures are the caller's fault.
    pub fn fault(&self) -> Fault {
        match self.kind() {
            VistaErrorKind::Validation(_) => Fault::Caller,
            _ => Fault::Internal,
        }
    }

    /// True when the error is a caller-fault validation failure.
    pub fn is_invalid_argument(&self) -> bool {
        self.fault() == Fault::Caller
    }

    /// The bare message of the underlying kind, without source location.
    pub fn caller_message(&self) -> String {
        match self.kind() {
            VistaErrorKind::Validation(e) => e.kind.to_string(),
            VistaErrorKind::Provider(e) => e.kind.to_string(),
            VistaErrorKind::Context(e) => e.kind.to_string(),
            VistaErrorKind::Config(e) => e.message.clone(),
            VistaErrorKind::Server(e) => e.kind.to_string(),
        }
    }
}

// Generic From implementation for any type that converts to VistaErrorKind
impl<T> From<T> for VistaError
where
    T: Into<VistaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vista operations.
pub type VistaResult<T> = std::result::Result<T, VistaError>;
