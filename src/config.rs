//! Credential discovery from the process environment.

use log::debug;
use thiserror::Error;

use crate::runtime::Runtime;

/// Bearer token for the control-plane API (required).
pub const API_TOKEN_VAR: &str = "CLOUDFLARE_API_TOKEN";

/// Account identifier used by account-scoped endpoints (optional).
pub const ACCOUNT_ID_VAR: &str = "CLOUDFLARE_ACCOUNT_ID";

/// Account email (optional).
pub const EMAIL_VAR: &str = "CLOUDFLARE_EMAIL";

/// A required setting is missing or unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "{var} is not set. Export it in your shell or add `{var}=...` to a .env file in the current directory."
    )]
    MissingVar { var: &'static str },

    #[error(
        "Invalid API URL '{url}': {reason}. Pass a full http(s) URL with --api-url or CFKIT_API_URL."
    )]
    InvalidApiUrl { url: String, reason: String },
}

/// Resolved credentials. Immutable once loaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_token: String,
    pub account_id: Option<String>,
    pub account_email: Option<String>,
}

impl Config {
    /// Read the credentials from the current environment.
    ///
    /// Nothing is cached: every call sees the environment as it is now, so a
    /// rotated token is picked up by the next load.
    pub fn load<R: Runtime + ?Sized>(runtime: &R) -> Result<Self, ConfigError> {
        let api_token = read_var(runtime, API_TOKEN_VAR)
            .ok_or(ConfigError::MissingVar { var: API_TOKEN_VAR })?;
        let account_id = read_var(runtime, ACCOUNT_ID_VAR);
        let account_email = read_var(runtime, EMAIL_VAR);

        debug!(
            "Loaded API credentials (account id {}, email {})",
            if account_id.is_some() { "set" } else { "unset" },
            if account_email.is_some() { "set" } else { "unset" },
        );

        Ok(Self {
            api_token,
            account_id,
            account_email,
        })
    }

    /// The account identifier, or an error telling the user where to set it.
    pub fn require_account_id(&self) -> Result<&str, ConfigError> {
        self.account_id
            .as_deref()
            .ok_or(ConfigError::MissingVar {
                var: ACCOUNT_ID_VAR,
            })
    }
}

// Keeps the token out of logs and panic messages.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("account_email", &self.account_email)
            .finish()
    }
}

/// Unset and empty values are both treated as absent.
fn read_var<R: Runtime + ?Sized>(runtime: &R, key: &str) -> Option<String> {
    runtime.env_var(key).ok().filter(|v| !v.is_empty())
}
