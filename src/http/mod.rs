//! API client core: authenticated requests, envelope validation, error
//! classification and retry with exponential backoff.

mod client;
mod envelope;
mod error;
mod message;
mod request;
mod retry;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use envelope::{ApiMessage, Envelope, ResultInfo};
pub use error::ApiError;
pub use message::to_user_message;
pub use request::{ApiRequest, RequestBody, encode_path_segment};
pub use retry::{
    DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_DELAY, Decision, RetryConfig,
    is_transient,
};
