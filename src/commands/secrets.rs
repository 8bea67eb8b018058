use anyhow::Result;

use super::output::Output;
use crate::http::ApiClient;
use crate::resources::Secrets;
use crate::runtime::Runtime;
use crate::validate::WorkerName;

#[derive(clap::Subcommand, Debug)]
pub enum SecretsCommand {
    /// List secret names of a worker
    List { script: WorkerName },

    /// Create or replace a secret
    Put {
        script: WorkerName,
        name: String,

        /// Secret value
        #[arg(long, env = "CFKIT_SECRET_VALUE", hide_env_values = true)]
        value: String,
    },

    /// Delete a secret
    Delete { script: WorkerName, name: String },
}

#[tracing::instrument(skip(client, command, output))]
pub async fn run<R: Runtime>(
    client: &ApiClient<R>,
    command: SecretsCommand,
    output: Output,
) -> Result<()> {
    let secrets = Secrets::new(client);

    match command {
        SecretsCommand::List { script } => {
            let list = secrets.list(&script).await?;
            output.emit(&list, |list| {
                if list.is_empty() {
                    println!("No secrets set for {}.", script);
                }
                for s in list {
                    println!("{:<40} {}", s.name, s.secret_type);
                }
            })
        }
        SecretsCommand::Put {
            script,
            name,
            value,
        } => {
            secrets.put(&script, &name, &value).await?;
            output.done(&format!("Secret {} set on {}.", name, script))
        }
        SecretsCommand::Delete { script, name } => {
            secrets.delete(&script, &name).await?;
            output.done(&format!("Secret {} deleted from {}.", name, script))
        }
    }
}
