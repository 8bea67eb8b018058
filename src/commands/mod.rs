//! Command handlers: map CLI arguments to resource calls and print results.

use anyhow::Result;

use crate::config::ConfigError;
use crate::http::{ApiClient, ApiError, to_user_message};
use crate::runtime::Runtime;

pub mod cron;
pub mod d1;
pub mod dns;
pub mod kv;
pub mod output;
pub mod pages;
pub mod r2;
pub mod secrets;
pub mod workers;
pub mod zones;

pub use output::Output;

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Zones, zone settings and cache purges
    Zones {
        #[command(subcommand)]
        command: zones::ZonesCommand,
    },

    /// DNS records of a zone
    Dns {
        #[command(subcommand)]
        command: dns::DnsCommand,
    },

    /// Workers KV namespaces and keys
    Kv {
        #[command(subcommand)]
        command: kv::KvCommand,
    },

    /// Worker scripts
    Workers {
        #[command(subcommand)]
        command: workers::WorkersCommand,
    },

    /// Worker secrets
    Secrets {
        #[command(subcommand)]
        command: secrets::SecretsCommand,
    },

    /// Worker cron triggers
    Cron {
        #[command(subcommand)]
        command: cron::CronCommand,
    },

    /// R2 buckets
    R2 {
        #[command(subcommand)]
        command: r2::R2Command,
    },

    /// Pages projects and deployments
    Pages {
        #[command(subcommand)]
        command: pages::PagesCommand,
    },

    /// D1 databases
    D1 {
        #[command(subcommand)]
        command: d1::D1Command,
    },
}

/// Dispatch a parsed command.
pub async fn run<R: Runtime>(client: &ApiClient<R>, command: Command, output: Output) -> Result<()> {
    match command {
        Command::Zones { command } => zones::run(client, command, output).await,
        Command::Dns { command } => dns::run(client, command, output).await,
        Command::Kv { command } => kv::run(client, command, output).await,
        Command::Workers { command } => workers::run(client, command, output).await,
        Command::Secrets { command } => secrets::run(client, command, output).await,
        Command::Cron { command } => cron::run(client, command, output).await,
        Command::R2 { command } => r2::run(client, command, output).await,
        Command::Pages { command } => pages::run(client, command, output).await,
        Command::D1 { command } => d1::run(client, command, output).await,
    }
}

/// Text shown to the user for a failed command.
///
/// API failures get the remediation hint; anything else shows its chain.
pub fn error_message(err: &anyhow::Error) -> String {
    if let Some(api) = err.downcast_ref::<ApiError>() {
        return to_user_message(api);
    }
    if let Some(config) = err.downcast_ref::<ConfigError>() {
        return config.to_string();
    }
    format!("{:#}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_message_uses_hint_for_api_errors() {
        let err = anyhow::Error::from(ApiError::from_status(401, vec![]));
        assert!(error_message(&err).contains("CLOUDFLARE_API_TOKEN"));
    }

    #[test]
    fn test_error_message_sees_through_context() {
        let err = Err::<(), _>(ApiError::from_status(404, vec![]))
            .context("Failed to delete record")
            .unwrap_err();
        assert!(error_message(&err).contains("Not found"));
    }

    #[test]
    fn test_error_message_for_config_error() {
        let err = anyhow::Error::from(ConfigError::MissingVar {
            var: "CLOUDFLARE_ACCOUNT_ID",
        });
        assert!(error_message(&err).contains("CLOUDFLARE_ACCOUNT_ID"));
    }

    #[test]
    fn test_error_message_for_other_errors() {
        let err = anyhow::anyhow!("Invalid bucket name 'A'");
        assert_eq!(error_message(&err), "Invalid bucket name 'A'");
    }
}
