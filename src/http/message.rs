//! Human-readable remediation hints for failed calls.

use super::error::ApiError;
use crate::config::API_TOKEN_VAR;

/// Render `error` for display, with a hint on what to do next.
pub fn to_user_message(error: &ApiError) -> String {
    match error {
        ApiError::Api { status, .. } => match *status {
            401 | 403 => format!(
                "Authentication failed (HTTP {}). Check that {} is valid and has the permissions this command needs.",
                status, API_TOKEN_VAR
            ),
            429 => "Rate limit exceeded (HTTP 429). The request was retried automatically; wait a minute before trying again.".to_string(),
            404 => "Not found (HTTP 404). The resource does not exist or has already been deleted.".to_string(),
            s if s >= 500 => format!(
                "The API returned a server error (HTTP {}). This is usually temporary; try again shortly.",
                s
            ),
            _ => with_error_list(error),
        },
        ApiError::Network(_) => format!(
            "{}. Check your network connection and try again.",
            error
        ),
        _ => error.to_string(),
    }
}

fn with_error_list(error: &ApiError) -> String {
    let (message, errors) = match error {
        ApiError::Api {
            message, errors, ..
        } => (message.as_str(), errors.as_slice()),
        _ => return error.to_string(),
    };

    let mut out = message.to_string();
    for e in errors {
        out.push_str(&format!("\n  - {} (code {})", e.message, e.code));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::http::ApiMessage;

    fn api(status: u16) -> ApiError {
        ApiError::from_status(status, vec![])
    }

    #[test]
    fn test_auth_failures_mention_credential() {
        for status in [401, 403] {
            let msg = to_user_message(&api(status));
            assert!(msg.contains("Authentication failed"));
            assert!(msg.contains("CLOUDFLARE_API_TOKEN"));
        }
    }

    #[test]
    fn test_rate_limit_message() {
        let msg = to_user_message(&api(429));
        assert!(msg.contains("Rate limit"));
        assert!(msg.contains("retried"));
    }

    #[test]
    fn test_not_found_message() {
        let msg = to_user_message(&api(404));
        assert!(msg.contains("Not found"));
        assert!(msg.contains("does not exist"));
    }

    #[test]
    fn test_server_error_message() {
        for status in [500, 503] {
            let msg = to_user_message(&api(status));
            assert!(msg.contains("server error"));
            assert!(msg.contains("temporary"));
        }
    }

    #[test]
    fn test_other_status_lists_raw_errors() {
        let err = ApiError::Api {
            status: 400,
            message: "API request failed with HTTP 400".into(),
            errors: vec![
                ApiMessage {
                    code: 9207,
                    message: "Request body is invalid".into(),
                },
                ApiMessage {
                    code: 9005,
                    message: "Content for A record is invalid".into(),
                },
            ],
        };
        let msg = to_user_message(&err);
        assert!(msg.starts_with("API request failed with HTTP 400"));
        assert!(msg.contains("Request body is invalid"));
        assert!(msg.contains("Content for A record is invalid"));
    }

    #[test]
    fn test_unsuccessful_envelope_includes_error_text() {
        let err = ApiError::unsuccessful(
            200,
            vec![ApiMessage {
                code: 1003,
                message: "Invalid zone".into(),
            }],
        );
        assert!(to_user_message(&err).contains("Invalid zone"));
    }

    #[test]
    fn test_configuration_error_keeps_guidance() {
        let err = ApiError::from(ConfigError::MissingVar {
            var: "CLOUDFLARE_API_TOKEN",
        });
        let msg = to_user_message(&err);
        assert!(msg.contains("CLOUDFLARE_API_TOKEN"));
        assert!(msg.contains(".env"));
    }
}
