//! Core data types for the Vista image analysis service.
//!
//! This crate provides the request/response types shared by every layer and the
//! per-call [`RequestContext`] that carries a logger span, a cancellation token
//! and an optional deadline across call boundaries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod mime;
mod request;
mod result;

pub use context::RequestContext;
pub use mime::ImageMimeType;
pub use request::{AnalysisRequest, AnalysisRequestBuilder};
pub use result::AnalysisResult;
