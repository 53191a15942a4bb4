//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (401, 404, other non-success) so the
//! endpoint modules stay focused on request construction and response
//! mapping.

use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success. Handles:
/// - **401 Unauthorized** → [`ClientError::Unauthorized`]
/// - **404 Not Found** → [`ClientError::NotFound`]
/// - **Other non-success** → [`ClientError::Api`] with the status code and
///   the `detail` of the error body when it has one.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
    match status.as_u16() {
        401 => Err(ClientError::Unauthorized(message)),
        404 => Err(ClientError::NotFound(message)),
        code => Err(ClientError::Api {
            status: code,
            message,
        }),
    }
}

/// Decode a successful response body as JSON.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
}

/// Pull a human-readable message out of an error body.
///
/// The API reports errors as `{"detail": "..."}`; request validation
/// failures carry a list of `{loc, msg}` objects instead.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_string());
    };
    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => Some(detail.clone()),
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let loc = item
                        .get("loc")
                        .and_then(serde_json::Value::as_array)
                        .map(|parts| {
                            parts
                                .iter()
                                .skip(1)
                                .map(|p| p.as_str().map_or_else(|| p.to_string(), str::to_string))
                                .collect::<Vec<_>>()
                                .join(".")
                        })
                        .unwrap_or_default();
                    Some(if loc.is_empty() {
                        msg.to_string()
                    } else {
                        format!("{loc}: {msg}")
                    })
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => Some(trimmed.to_string()),
    }
}
