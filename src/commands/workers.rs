use anyhow::Result;

use super::output::{Output, or_dash};
use crate::http::ApiClient;
use crate::resources::Workers;
use crate::runtime::Runtime;
use crate::validate::WorkerName;

#[derive(clap::Subcommand, Debug)]
pub enum WorkersCommand {
    /// List worker scripts
    List,

    /// Delete a worker script
    Delete {
        name: WorkerName,

        /// Also remove bindings that reference the script
        #[arg(long)]
        force: bool,
    },

    /// Show the account's workers.dev subdomain
    Subdomain,
}

#[tracing::instrument(skip(client, output))]
pub async fn run<R: Runtime>(
    client: &ApiClient<R>,
    command: WorkersCommand,
    output: Output,
) -> Result<()> {
    let workers = Workers::new(client);

    match command {
        WorkersCommand::List => {
            let scripts = workers.list().await?;
            output.emit(&scripts, |scripts| {
                if scripts.is_empty() {
                    println!("No workers found.");
                }
                for s in scripts {
                    println!("{:<40} {}", s.id, or_dash(s.modified_on.as_deref()));
                }
            })
        }
        WorkersCommand::Delete { name, force } => {
            workers.delete(&name, force).await?;
            output.done(&format!("Deleted worker {}.", name))
        }
        WorkersCommand::Subdomain => {
            let subdomain = workers.subdomain().await?;
            output.emit(&subdomain, |s| println!("{}.workers.dev", s))
        }
    }
}
