//! Client error types.

use tek_auth::AuthError;
use thiserror::Error;

/// Errors that can occur when talking to the registration API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered 401; the stored token has been discarded.
    #[error("unauthorized: {0} — run `tkf admin login`")]
    Unauthorized(String),

    /// The API answered 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API returned any other non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// `detail` of the error body, or the raw body.
        message: String,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Token store failure, or an admin call made without a token.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Reading a local file for upload failed.
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}
