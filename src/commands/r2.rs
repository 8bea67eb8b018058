use anyhow::Result;

use super::output::{Output, or_dash};
use crate::http::ApiClient;
use crate::resources::R2;
use crate::runtime::Runtime;
use crate::validate::BucketName;

#[derive(clap::Subcommand, Debug)]
pub enum R2Command {
    /// List buckets
    List,

    /// Create a bucket
    Create {
        name: BucketName,

        /// Location hint, e.g. wnam, enam, weur, eeur, apac
        #[arg(long)]
        location: Option<String>,
    },

    /// Delete an empty bucket
    Delete { name: BucketName },
}

#[tracing::instrument(skip(client, output))]
pub async fn run<R: Runtime>(client: &ApiClient<R>, command: R2Command, output: Output) -> Result<()> {
    let r2 = R2::new(client);

    match command {
        R2Command::List => {
            let buckets = r2.list().await?;
            output.emit(&buckets, |buckets| {
                if buckets.is_empty() {
                    println!("No buckets found.");
                }
                for b in buckets {
                    println!(
                        "{:<64} {:<6} {}",
                        b.name,
                        or_dash(b.location.as_deref()),
                        or_dash(b.creation_date.as_deref())
                    );
                }
            })
        }
        R2Command::Create { name, location } => {
            let bucket = r2.create(&name, location.as_deref()).await?;
            output.emit(&bucket, |b| println!("Created bucket {}.", b.name))
        }
        R2Command::Delete { name } => {
            r2.delete(&name).await?;
            output.done(&format!("Deleted bucket {}.", name))
        }
    }
}
