//! Trait definitions for the Vista image analysis service.
//!
//! This crate provides the two capability seams of the service:
//! - [`AnalysisProvider`], implemented by interchangeable backends
//! - [`ImageAnalysis`], implemented by the orchestration service and consumed
//!   by the transport adapter

mod traits;

pub use traits::{AnalysisProvider, ImageAnalysis};
