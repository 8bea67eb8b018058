//! Authenticated API client with envelope validation and retry.

use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;

use super::envelope::{Envelope, ErrorBody};
use super::error::ApiError;
use super::request::ApiRequest;
use super::retry::{Decision, RetryConfig};
use crate::config::{Config, ConfigError};
use crate::runtime::Runtime;

/// Production API origin.
pub const DEFAULT_API_URL: &str = "https://api.cloudflare.com/client/v4";

/// Client for the control-plane REST API.
///
/// Holds the credentials resolved once per process and the retry policy used
/// by [`ApiClient::fetch`] and [`ApiClient::call`].
pub struct ApiClient<R: Runtime> {
    client: Client,
    base_url: String,
    config: Config,
    retry: RetryConfig,
    runtime: R,
}

impl<R: Runtime> ApiClient<R> {
    pub fn new(runtime: R, config: Config) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cfkit/", env!("CFKIT_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_API_URL.to_string(),
            config,
            retry: RetryConfig::default(),
            runtime,
        })
    }

    /// Point the client at another origin (used by tests and `--api-url`).
    ///
    /// Fails unless `base_url` is an absolute http(s) URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ApiError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Account identifier for account-scoped endpoints.
    pub fn account_id(&self) -> Result<&str, ApiError> {
        Ok(self.config.require_account_id()?)
    }

    /// Retrying call whose `result` is decoded into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.execute_with_retry(&request, &self.retry)
            .await?
            .decode()
    }

    /// Retrying call for endpoints whose `result` the caller does not need.
    pub async fn call(&self, request: ApiRequest) -> Result<Envelope, ApiError> {
        self.execute_with_retry(&request, &self.retry).await
    }

    /// Single attempt, no retry.
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: &ApiRequest) -> Result<Envelope, ApiError> {
        let url = self.url_for(&request.path);
        debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(self.headers_for(request)?);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if request.method != Method::GET {
            if let Some(body) = &request.body {
                builder = builder.body(body.clone().into_text());
            }
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;

        if !(200..300).contains(&status) {
            return Err(ApiError::from_status(
                status,
                ErrorBody::parse_errors(&text),
            ));
        }

        let envelope: Envelope = serde_json::from_str(&text)
            .map_err(|source| ApiError::InvalidResponse { status, source })?;

        if !envelope.success {
            return Err(ApiError::unsuccessful(status, envelope.errors));
        }

        Ok(envelope)
    }

    /// Run `request` until it succeeds, fails permanently, or the attempts
    /// in `retry` are used up. Waits between attempts grow exponentially.
    pub async fn execute_with_retry(
        &self,
        request: &ApiRequest,
        retry: &RetryConfig,
    ) -> Result<Envelope, ApiError> {
        let mut attempt = 1;

        loop {
            let error = match self.execute(request).await {
                Ok(envelope) => return Ok(envelope),
                Err(e) => e,
            };

            match retry.decide(attempt, &error) {
                Decision::GiveUp => {
                    debug!(
                        "{} {}: giving up after attempt {}/{}: {}",
                        request.method,
                        request.path,
                        attempt,
                        retry.attempts(),
                        error
                    );
                    return Err(error);
                }
                Decision::Retry(delay) => {
                    warn!(
                        "{} {}: attempt {}/{} failed ({}), retrying in {}ms...",
                        request.method,
                        request.path,
                        attempt,
                        retry.attempts(),
                        error,
                        delay.as_millis()
                    );
                    self.runtime.sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Authorization and JSON content type, overridden by the request's own headers.
    fn headers_for(&self, request: &ApiRequest) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();

        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", self.config.api_token))
            .map_err(|_| {
                ApiError::InvalidRequest(
                    "API token contains characters not allowed in an HTTP header".to_string(),
                )
            })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidRequest(format!("invalid header name: {}", name)))?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                ApiError::InvalidRequest(format!("invalid value for header {}", name))
            })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

/// Validate a base URL and drop its trailing slash.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// A request reqwest refused to build never reached the server.
fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::InvalidRequest(format!("could not build request: {}", err))
    } else {
        ApiError::Network(err)
    }
}
