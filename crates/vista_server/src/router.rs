//! HTTP routes.
//!
//! Every analysis call gets its own span carrying a fresh request id. The span
//! and the call's deadline travel in the [`RequestContext`]. When the client
//! disconnects, hyper drops the handler future, which drops any in-flight
//! backend request along with it.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::{Instrument, debug};
use uuid::Uuid;
use vista_core::RequestContext;

use crate::{ImageAnalysisServer, ImagePromptRequest, Status};

/// Path of the analysis call.
pub const PROCESS_PATH: &str = "/v1/image-analysis/process";

/// Path of the liveness probe.
pub const HEALTH_PATH: &str = "/health";

/// Header carrying a per-call deadline in milliseconds.
pub const TIMEOUT_HEADER: &str = "x-request-timeout-ms";

/// Per-router settings.
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    /// Deadline applied when the caller sends none
    pub default_timeout: Option<Duration>,
    /// Largest accepted body in bytes
    pub max_request_bytes: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            default_timeout: None,
            max_request_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Clone)]
struct AppState {
    server: Arc<ImageAnalysisServer>,
    default_timeout: Option<Duration>,
}

/// Build the router for `server`.
pub fn router(server: Arc<ImageAnalysisServer>, options: RouterOptions) -> Router {
    let state = AppState {
        server,
        default_timeout: options.default_timeout,
    };

    Router::new()
        .route(PROCESS_PATH, post(process_image_and_prompt))
        .route(HEALTH_PATH, get(health))
        .layer(DefaultBodyLimit::max(options.max_request_bytes))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn process_image_and_prompt(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let span = tracing::info_span!("process_image_and_prompt", request_id = %Uuid::new_v4());
    let mut ctx = RequestContext::new(span.clone());

    // Admission comes before any decoding of the payload
    if let Err(status) = state.server.admit(&ctx) {
        return status.into_response();
    }

    let timeout = match requested_timeout(&headers) {
        Ok(timeout) => timeout.or(state.default_timeout),
        Err(status) => return status.into_response(),
    };

    let request: ImagePromptRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            span.in_scope(|| debug!(error = %e, "Malformed request body"));
            return Status::invalid_argument(format!("invalid request body: {}", e))
                .into_response();
        }
    };

    if let Some(timeout) = timeout {
        ctx = ctx.with_timeout(timeout);
    }
    // Trips the token if this future is dropped mid-call.
    let _cancel_on_drop = ctx.cancellation().clone().drop_guard();

    let result = state
        .server
        .process_admitted(&ctx, request)
        .instrument(span)
        .await;

    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(status) => status.into_response(),
    }
}

fn requested_timeout(headers: &HeaderMap) -> Result<Option<Duration>, Status> {
    let Some(value) = headers.get(TIMEOUT_HEADER) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(|ms| Some(Duration::from_millis(ms)))
        .ok_or_else(|| {
            Status::invalid_argument(format!(
                "{} must be a positive integer number of milliseconds",
                TIMEOUT_HEADER
            ))
        })
}
