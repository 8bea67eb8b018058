use anyhow::Result;

use super::output::{Output, or_dash};
use crate::http::ApiClient;
use crate::resources::{Cron, Schedule};
use crate::runtime::Runtime;
use crate::validate::WorkerName;

#[derive(clap::Subcommand, Debug)]
pub enum CronCommand {
    /// Show the cron triggers of a worker
    Get { script: WorkerName },

    /// Replace the cron triggers of a worker
    Set {
        script: WorkerName,

        /// Cron expressions, e.g. "*/5 * * * *"
        #[arg(required = true, num_args = 1..)]
        crons: Vec<String>,
    },

    /// Remove every cron trigger of a worker
    Clear { script: WorkerName },
}

#[tracing::instrument(skip(client, output))]
pub async fn run<R: Runtime>(client: &ApiClient<R>, command: CronCommand, output: Output) -> Result<()> {
    let cron = Cron::new(client);

    let schedules = match command {
        CronCommand::Get { script } => cron.get(&script).await?,
        CronCommand::Set { script, crons } => cron.set(&script, &crons).await?,
        CronCommand::Clear { script } => cron.set(&script, &[]).await?,
    };

    output.emit(schedules.as_slice(), print_schedules)
}

fn print_schedules(schedules: &[Schedule]) {
    if schedules.is_empty() {
        println!("No cron triggers.");
    }
    for s in schedules {
        println!("{:<20} {}", s.cron, or_dash(s.modified_on.as_deref()));
    }
}
