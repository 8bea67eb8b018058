pub mod commands;
pub mod config;
pub mod env_file;
pub mod http;
pub mod resources;
pub mod runtime;
pub mod validate;

/// Shared fixtures for unit tests.
#[cfg(test)]
pub mod test_utils {
    use crate::config::Config;
    use crate::http::{ApiClient, RetryConfig};
    use crate::runtime::MockRuntime;

    /// Account id used by [`test_config`].
    pub const TEST_ACCOUNT: &str = "acc123";

    /// Credentials with a token and an account id.
    pub fn test_config() -> Config {
        Config {
            api_token: "test_token".to_string(),
            account_id: Some(TEST_ACCOUNT.to_string()),
            account_email: None,
        }
    }

    /// Client against `url` that makes a single attempt and never waits.
    pub fn test_client(url: &str) -> ApiClient<MockRuntime> {
        let mut runtime = MockRuntime::new();
        runtime.expect_sleep().never();

        ApiClient::new(runtime, test_config())
            .expect("build client")
            .with_base_url(url)
            .expect("valid base url")
            .with_retry(RetryConfig::no_retry())
    }

    /// Same as [`test_client`] but without an account id.
    pub fn test_client_without_account(url: &str) -> ApiClient<MockRuntime> {
        let mut runtime = MockRuntime::new();
        runtime.expect_sleep().never();

        let config = Config {
            account_id: None,
            ..test_config()
        };
        ApiClient::new(runtime, config)
            .expect("build client")
            .with_base_url(url)
            .expect("valid base url")
            .with_retry(RetryConfig::no_retry())
    }

    /// A successful envelope around `result`.
    pub fn ok_body(result: serde_json::Value) -> String {
        serde_json::json!({
            "success": true,
            "errors": [],
            "messages": [],
            "result": result
        })
        .to_string()
    }
}
