//! Failure taxonomy of the API client.

use thiserror::Error;

use super::envelope::ApiMessage;
use crate::config::ConfigError;

/// Any failure of an API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required credentials are missing.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// No response was obtained (DNS, connect, TLS, timeout, reset).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A 2xx response whose body is not a JSON envelope.
    #[error("invalid response body (HTTP {status}): {source}")]
    InvalidResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered and reported a failure, either through a non-2xx
    /// status or through `success: false` in the envelope.
    #[error("{}", describe(message, errors))]
    Api {
        status: u16,
        message: String,
        errors: Vec<ApiMessage>,
    },

    /// The request could not be assembled (e.g. a header value with
    /// characters HTTP does not allow).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// `result` does not have the shape the caller asked for.
    #[error("unexpected result payload: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// Classified error for a non-2xx response.
    pub fn from_status(status: u16, errors: Vec<ApiMessage>) -> Self {
        ApiError::Api {
            status,
            message: format!("API request failed with HTTP {}", status),
            errors,
        }
    }

    /// Classified error for a 2xx response with `success: false`.
    pub fn unsuccessful(status: u16, errors: Vec<ApiMessage>) -> Self {
        ApiError::Api {
            status,
            message: "API reported an unsuccessful request".to_string(),
            errors,
        }
    }

    /// HTTP status of a classified error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured errors from the envelope; empty for unclassified failures.
    pub fn errors(&self) -> &[ApiMessage] {
        match self {
            ApiError::Api { errors, .. } => errors,
            _ => &[],
        }
    }
}

fn describe(message: &str, errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return message.to_string();
    }
    let details: Vec<String> = errors
        .iter()
        .map(|e| format!("[{}] {}", e.code, e.message))
        .collect();
    format!("{}: {}", message, details.join("; "))
}
