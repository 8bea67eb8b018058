//! Retry policy: which failures are transient and how long to back off.

use std::time::Duration;

use super::error::ApiError;

/// Default number of attempts, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delay before the second attempt.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Upper bound for any single backoff delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(10_000);

/// Exponential backoff parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Wait this long, then try again.
    Retry(Duration),
    /// Propagate the failure.
    GiveUp,
}

impl RetryConfig {
    /// Run exactly once.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Attempts actually made; zero is treated as one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Backoff after the 1-indexed `attempt`: `min(base * 2^(attempt-1), max)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Transition of the retry loop after `attempt` failed with `error`.
    pub fn decide(&self, attempt: u32, error: &ApiError) -> Decision {
        if !is_transient(error) || attempt >= self.attempts() {
            Decision::GiveUp
        } else {
            Decision::Retry(self.delay_for(attempt))
        }
    }
}

/// Whether retrying the unchanged request could succeed.
///
/// Client errors in `[400, 500)` other than 429 are final, as are missing
/// credentials, malformed requests and payloads the caller cannot decode. Everything else
/// (429, 5xx, a 2xx with `success: false`, network failures, garbled
/// bodies) is retried.
pub fn is_transient(error: &ApiError) -> bool {
    match error {
        ApiError::Api { status, .. } => !((400..500).contains(status) && *status != 429),
        ApiError::Network(_) | ApiError::InvalidResponse { .. } => true,
        ApiError::Configuration(_) | ApiError::InvalidRequest(_) | ApiError::Decode(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    fn api(status: u16) -> ApiError {
        ApiError::from_status(status, vec![])
    }

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.base_delay, Duration::from_millis(1000));
        assert_eq!(config.max_delay, Duration::from_millis(10_000));
    }

    #[test]
    fn test_delay_doubles_and_caps() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for(1), Duration::from_millis(1000));
        assert_eq!(config.delay_for(2), Duration::from_millis(2000));
        assert_eq!(config.delay_for(3), Duration::from_millis(4000));
        assert_eq!(config.delay_for(4), Duration::from_millis(8000));
        assert_eq!(config.delay_for(5), Duration::from_millis(10_000));
        assert_eq!(config.delay_for(64), Duration::from_millis(10_000));
    }

    #[test]
    fn test_delay_capped_below_base() {
        let config = RetryConfig {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(300),
        };
        assert_eq!(config.delay_for(1), Duration::from_millis(300));
        assert_eq!(config.delay_for(2), Duration::from_millis(300));
    }

    #[test]
    fn test_client_errors_are_final() {
        for status in [400, 401, 403, 404, 409, 422, 499] {
            assert!(!is_transient(&api(status)), "status {}", status);
        }
    }

    #[test]
    fn test_rate_limit_and_server_errors_are_transient() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_transient(&api(status)), "status {}", status);
        }
    }

    #[test]
    fn test_unsuccessful_2xx_is_transient() {
        assert!(is_transient(&ApiError::unsuccessful(200, vec![])));
    }

    #[test]
    fn test_unclassified_errors() {
        let config_err = ApiError::from(ConfigError::MissingVar { var: "X" });
        assert!(!is_transient(&config_err));

        let decode_err = ApiError::Decode(serde_json::from_str::<u8>("x").unwrap_err());
        assert!(!is_transient(&decode_err));

        let garbled = ApiError::InvalidResponse {
            status: 200,
            source: serde_json::from_str::<u8>("x").unwrap_err(),
        };
        assert!(is_transient(&garbled));
    }

    #[test]
    fn test_decide_sequence() {
        let config = RetryConfig::default();
        let err = api(503);
        assert_eq!(
            config.decide(1, &err),
            Decision::Retry(Duration::from_millis(1000))
        );
        assert_eq!(
            config.decide(2, &err),
            Decision::Retry(Duration::from_millis(2000))
        );
        assert_eq!(config.decide(3, &err), Decision::GiveUp);
    }

    #[test]
    fn test_decide_gives_up_on_final_error() {
        let config = RetryConfig::default();
        assert_eq!(config.decide(1, &api(404)), Decision::GiveUp);
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let config = RetryConfig {
            max_attempts: 0,
            ..RetryConfig::default()
        };
        assert_eq!(config.attempts(), 1);
        assert_eq!(config.decide(1, &api(500)), Decision::GiveUp);
        assert_eq!(RetryConfig::no_retry().decide(1, &api(500)), Decision::GiveUp);
    }
}
