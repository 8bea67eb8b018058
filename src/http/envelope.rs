//! The API's uniform response wrapper.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;

/// A structured error or message entry from the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Pagination block returned by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub count: Option<u64>,
    pub total_count: Option<u64>,
    pub total_pages: Option<u64>,
    pub cursor: Option<String>,
}

/// Decoded response: `{ success, result, errors, messages, result_info }`.
///
/// `result` is opaque to the client; callers decode it into their own shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

impl Envelope<Value> {
    /// Decode `result` into the caller's type. A missing result decodes as `null`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.result.unwrap_or(Value::Null)).map_err(ApiError::Decode)
    }
}

/// Only the error list, for bodies of failed responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
}

impl ErrorBody {
    /// Errors found in `text`, or none when it is not a JSON envelope.
    pub(crate) fn parse_errors(text: &str) -> Vec<ApiMessage> {
        serde_json::from_str::<ErrorBody>(text)
            .map(|body| body.errors)
            .unwrap_or_default()
    }
}
