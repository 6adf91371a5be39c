//! Transport, configuration and process lifecycle for Vista.
//!
//! The [`ImageAnalysisServer`] adapter sits between the transport and the
//! analysis service. It applies admission control and maps service errors
//! onto a [`Status`]. [`router`] exposes it over HTTP with axum, and
//! [`Application`] wires everything together from a [`VistaConfig`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod application;
mod config;
mod observability;
mod router;
mod status;
mod wire;

pub use adapter::{INTERNAL_ERROR_MESSAGE, ImageAnalysisServer, RATE_LIMITED_MESSAGE};
pub use application::Application;
pub use config::{LoggingConfig, ServerConfig, VistaConfig};
pub use observability::init_tracing;
pub use router::{HEALTH_PATH, PROCESS_PATH, RouterOptions, TIMEOUT_HEADER, router};
pub use status::{Code, Status};
pub use wire::{ImagePromptRequest, ImagePromptResponse};
