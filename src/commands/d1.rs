use anyhow::Result;

use super::output::{Output, or_dash};
use crate::http::ApiClient;
use crate::resources::{D1, QueryResult};
use crate::runtime::Runtime;
use crate::validate::DatabaseName;

#[derive(clap::Subcommand, Debug)]
pub enum D1Command {
    /// List databases
    List,

    /// Create a database
    Create { name: DatabaseName },

    /// Delete a database
    Delete { database_id: String },

    /// Run a SQL statement
    Query {
        database_id: String,
        sql: String,

        /// Value bound to the next `?` placeholder (repeatable)
        #[arg(long = "param")]
        params: Vec<String>,
    },
}

#[tracing::instrument(skip(client, output))]
pub async fn run<R: Runtime>(client: &ApiClient<R>, command: D1Command, output: Output) -> Result<()> {
    let d1 = D1::new(client);

    match command {
        D1Command::List => {
            let databases = d1.list().await?;
            output.emit(&databases, |databases| {
                if databases.is_empty() {
                    println!("No databases found.");
                }
                for db in databases {
                    println!(
                        "{:<38} {:<32} {}",
                        db.uuid,
                        db.name,
                        or_dash(db.created_at.as_deref())
                    );
                }
            })
        }
        D1Command::Create { name } => {
            let db = d1.create(&name).await?;
            output.emit(&db, |db| println!("Created database {} ({})", db.name, db.uuid))
        }
        D1Command::Delete { database_id } => {
            d1.delete(&database_id).await?;
            output.done(&format!("Deleted database {}.", database_id))
        }
        D1Command::Query {
            database_id,
            sql,
            params,
        } => {
            let results = d1.query(&database_id, &sql, &params).await?;
            output.emit(results.as_slice(), print_results)
        }
    }
}

/// One JSON object per row, statements separated by a blank line.
fn print_results(results: &[QueryResult]) {
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for row in &result.results {
            println!("{}", row);
        }
        if result.results.is_empty() {
            println!("(no rows)");
        }
    }
}
