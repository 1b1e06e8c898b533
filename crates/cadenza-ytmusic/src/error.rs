// SPDX-License-Identifier: GPL-3.0-or-later

//! Error types for YouTube Music API operations.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Result type alias for YouTube Music operations.
pub type Result<T> = std::result::Result<T, YtMusicError>;

/// Errors that can occur during YouTube Music API operations.
#[derive(Debug, Error)]
pub enum YtMusicError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP response had a non-success status code.
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    /// InnerTube returned an error payload.
    #[error("InnerTube API error: {message}")]
    Api { message: String },

    /// Failed to deserialize a response body.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A required field was absent from the response.
    #[error("Missing expected field: {0}")]
    MissingField(&'static str),

    /// The configured base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// An API call was made before [`initialize`](crate::client::YtMusicClient::initialize).
    #[error("client session is not initialized")]
    NotInitialized,
}

/// Triages an InnerTube response body into a parsed JSON value.
///
/// Non-success statuses keep the raw body for diagnostics. A success status
/// can still carry an `{"error": {...}}` payload, which maps to
/// [`YtMusicError::Api`].
pub(crate) fn parse_innertube_body(status: StatusCode, response_body: &str) -> Result<Value> {
    if !status.is_success() {
        return Err(YtMusicError::HttpStatus {
            status,
            body: response_body.to_string(),
        });
    }

    let value: Value = serde_json::from_str(response_body)?;

    if let Some(message) = value
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
    {
        return Err(YtMusicError::Api {
            message: message.to_string(),
        });
    }

    Ok(value)
}
