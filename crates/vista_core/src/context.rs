//! Per-call request context.
//!
//! A [`RequestContext`] is created by the transport for every inbound call and
//! threaded explicitly through the adapter, the service and the provider. It
//! carries:
//! - the call's logger, a [`tracing::Span`]
//! - a [`CancellationToken`] the transport trips when the caller goes away
//! - an optional deadline
//!
//! Backend I/O goes through [`RequestContext::guard`] so that cancellation or
//! an expired deadline drops the in-flight future instead of letting it finish
//! unobserved.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Span;
use vista_error::{ContextError, ContextErrorKind};

/// Explicit per-call context: logger span, cancellation and deadline.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vista_core::RequestContext;
///
/// let ctx = RequestContext::new(tracing::info_span!("call"))
///     .with_timeout(Duration::from_secs(5));
///
/// assert!(ctx.logger().is_ok());
/// assert!(ctx.deadline().is_some());
/// assert!(!ctx.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    logger: Option<Span>,
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Create a context that logs into `span`.
    pub fn new(span: Span) -> Self {
        Self {
            logger: Some(span),
            cancellation: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Create a context with no logger attached.
    ///
    /// Any layer that needs to log will fail with
    /// [`ContextErrorKind::MissingLogger`].
    pub fn without_logger() -> Self {
        Self {
            logger: None,
            cancellation: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Replace the cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Set an absolute deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The call's logger span.
    pub fn logger(&self) -> Result<&Span, ContextError> {
        self.logger
            .as_ref()
            .ok_or_else(|| ContextError::new(ContextErrorKind::MissingLogger))
    }

    /// The call's cancellation token.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// The call's deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel the call.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Whether the call has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Run `future` until it completes, the call is cancelled, or the deadline
    /// passes, whichever comes first.
    ///
    /// On cancellation or deadline the future is dropped.
    pub async fn guard<F>(&self, future: F) -> Result<F::Output, ContextError>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return Err(ContextError::new(ContextErrorKind::Cancelled));
        }

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => {
                Err(ContextError::new(ContextErrorKind::Cancelled))
            }
            _ = deadline => {
                Err(ContextError::new(ContextErrorKind::DeadlineExceeded))
            }
            output = future => Ok(output),
        }
    }
}
