//! Google Vertex AI hosted vision model.
//!
//! Talks to the `generateContent` REST endpoint directly with `reqwest`.

mod client;
mod credentials;
mod dto;

pub use client::VertexProvider;
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationParams,
    InlineData, Part,
};
