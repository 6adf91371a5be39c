//! Credential resolution for Vertex AI.
//!
//! The configured value is either a path to a JSON document or the JSON
//! document itself. Either way it must carry an `access_token`.

use serde::Deserialize;
use std::path::Path;
use vista_error::{ProviderError, ProviderErrorKind};

#[derive(Deserialize)]
struct TokenDocument {
    access_token: Option<String>,
}

/// Resolve the bearer token for `credentials`.
///
/// Returns `None` for empty credentials, meaning requests go out without an
/// `Authorization` header.
pub(crate) fn resolve_access_token(credentials: &str) -> Result<Option<String>, ProviderError> {
    let credentials = credentials.trim();
    if credentials.is_empty() {
        return Ok(None);
    }

    let document = if credentials.starts_with('{') {
        credentials.to_string()
    } else {
        let path = Path::new(credentials);
        std::fs::read_to_string(path).map_err(|e| {
            ProviderError::new(ProviderErrorKind::Credentials(format!(
                "failed to read {}: {}",
                path.display(),
                e
            )))
        })?
    };

    let parsed: TokenDocument = serde_json::from_str(&document).map_err(|e| {
        ProviderError::new(ProviderErrorKind::Credentials(format!(
            "invalid credentials JSON: {}",
            e
        )))
    })?;

    match parsed.access_token {
        Some(token) if !token.is_empty() => Ok(Some(token)),
        _ => Err(ProviderError::new(ProviderErrorKind::Credentials(
            "credentials JSON has no access_token".to_string(),
        ))),
    }
}
