//! Error types for the Vista image analysis service.
//!
//! This crate provides the error types used throughout the Vista workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! The kind's display string is the caller-safe message. The wrapper's display
//! adds the source location and is meant for logs.
//!
//! # Examples
//!
//! ```
//! use vista_error::{Fault, ValidationError, ValidationErrorKind, VistaResult};
//!
//! fn check(image: &[u8]) -> VistaResult<()> {
//!     if image.is_empty() {
//!         Err(ValidationError::new(ValidationErrorKind::NoImage))?
//!     }
//!     Ok(())
//! }
//!
//! let err = check(&[]).unwrap_err();
//! assert_eq!(err.fault(), Fault::Caller);
//! assert_eq!(err.caller_message(), "no image provided");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod error;
mod provider;
mod server;
mod validation;

pub use config::ConfigError;
pub use context::{ContextError, ContextErrorKind};
pub use error::{Fault, VistaError, VistaErrorKind, VistaResult};
pub use provider::{ProviderError, ProviderErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
