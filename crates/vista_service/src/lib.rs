//! Image analysis service for Vista.
//!
//! [`AnalysisService`] validates each request with [`validate`], logs it
//! through the call's span, and hands it to the configured provider.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod service;
mod validator;

pub use service::AnalysisService;
pub use validator::validate;
