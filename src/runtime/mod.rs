//! Runtime abstraction for process-level side effects.
//!
//! The API client never touches the environment or the clock directly;
//! it goes through [`Runtime`] so tests can inject credentials and observe
//! backoff waits without sleeping.
//!
//! # Structure
//!
//! - `env` - Environment variables
//! - `time` - Non-blocking waits

mod env;
mod time;

use async_trait::async_trait;
use std::env as std_env;
use std::time::Duration;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // Time
    /// Suspend the current task for `duration` without blocking the thread.
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RealRuntime;

#[async_trait]
impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    async fn sleep(&self, duration: Duration) {
        self.sleep_impl(duration).await
    }
}
