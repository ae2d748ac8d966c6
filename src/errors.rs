//! Error handling
//!
//! A single error enum covers every failure the client can surface. Metadata and
//! action errors are programming mistakes and are raised immediately; remote
//! errors carry a best-effort message extracted from the Web API response. No
//! variant is retried by this crate.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Message used when neither a structured error nor a reason phrase is available
pub const UNEXPECTED_ERROR: &str = "Unexpected error";

/// Client error
#[derive(Error, Debug)]
pub enum DataverseError {
    /// Row type lacks its table or identifier association
    #[error("{type_name} is missing expected metadata: {attribute}")]
    MissingMetadata {
        type_name: &'static str,
        attribute: &'static str,
    },

    /// Action value outside create/update/upsert/delete
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// Batch or changeset that cannot be put on the wire
    #[error("Invalid batch: {0}")]
    InvalidBatch(String),

    /// Non-success status returned by the Web API
    #[error("Web API error ({status}): {message}")]
    RemoteApi { status: u16, message: String },

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed service root or request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token acquisition failure
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Successful response missing something the client needs
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Server kept returning continuation links past the configured ceiling
    #[error("Paginated retrieval exceeded {limit} pages")]
    PageLimitExceeded { limit: usize },
}

/// Crate result type
pub type Result<T> = std::result::Result<T, DataverseError>;

impl DataverseError {
    /// Build a remote error from a status code and raw response body
    pub fn remote(status: StatusCode, body: &str) -> Self {
        DataverseError::RemoteApi {
            status: status.as_u16(),
            message: extract_error_message(status, body),
        }
    }

    /// HTTP status carried by a remote error
    pub fn status(&self) -> Option<u16> {
        match self {
            DataverseError::RemoteApi { status, .. } => Some(*status),
            DataverseError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the Web API reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    /// Metadata and action errors are caller bugs
    pub fn is_metadata_error(&self) -> bool {
        matches!(
            self,
            DataverseError::MissingMetadata { .. } | DataverseError::UnsupportedAction(_)
        )
    }
}

/// Structured error body returned by the Web API
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    #[allow(dead_code)]
    pub code: Option<String>,
    pub message: Option<String>,
}

/// Extract the most useful message from an error response.
///
/// Prefers `error.message` from the JSON body, then the reason phrase for
/// non-success statuses, then [`UNEXPECTED_ERROR`].
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorResponse {
        error: Some(ErrorDetail {
            message: Some(message),
            ..
        }),
    }) = serde_json::from_str::<ErrorResponse>(body)
    {
        return message;
    }

    if !status.is_success() {
        if let Some(reason) = status.canonical_reason() {
            return reason.to_string();
        }
    }

    UNEXPECTED_ERROR.to_string()
}
