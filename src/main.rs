use anyhow::{Context, Result};
use clap::Parser;
use cfkit::commands::{self, Command, Output};
use cfkit::config::Config;
use cfkit::env_file::load_env_file;
use cfkit::http::{ApiClient, DEFAULT_API_URL, DEFAULT_MAX_ATTEMPTS, RetryConfig};
use cfkit::runtime::RealRuntime;
use std::path::PathBuf;
use std::process::ExitCode;

/// cfkit - command-line access to the Cloudflare control plane
///
/// Credentials are read from CLOUDFLARE_API_TOKEN (required),
/// CLOUDFLARE_ACCOUNT_ID and CLOUDFLARE_EMAIL. Values from a .env file in the
/// current directory are merged in first; variables already set win.
///
/// Examples:
///   cfkit zones list
///   cfkit dns create <ZONE_ID> --type A --name www --content 192.0.2.1
///   cfkit kv bulk-delete <NAMESPACE_ID> key1 key2 key3
#[derive(Parser, Debug)]
#[command(author, version = env!("CFKIT_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API base URL (defaults to https://api.cloudflare.com/client/v4)
    #[arg(long = "api-url", env = "CFKIT_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Env file to merge instead of ./.env
    #[arg(long = "env-file", value_name = "PATH", global = true)]
    pub env_file: Option<PathBuf>,

    /// Attempts per request for rate-limited or failing calls
    #[arg(
        long = "max-attempts",
        value_name = "N",
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        global = true
    )]
    pub max_attempts: u32,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", commands::error_message(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    load_env_file(cli.env_file.as_deref())?;

    let runtime = RealRuntime;
    let config = Config::load(&runtime)?;
    let retry = RetryConfig {
        max_attempts: cli.max_attempts,
        ..RetryConfig::default()
    };

    let client = ApiClient::new(runtime, config)
        .context("Failed to build HTTP client")?
        .with_base_url(cli.api_url.as_deref().unwrap_or(DEFAULT_API_URL))?
        .with_retry(retry);

    commands::run(&client, cli.command, Output::new(cli.json)).await
}
