use anyhow::Result;

use super::output::Output;
use crate::http::ApiClient;
use crate::resources::{Dns, NewDnsRecord};
use crate::runtime::Runtime;

#[derive(clap::Subcommand, Debug)]
pub enum DnsCommand {
    /// List records of a zone
    List {
        zone_id: String,

        /// Record type, e.g. A, AAAA, CNAME, TXT
        #[arg(long = "type")]
        record_type: Option<String>,

        /// Full record name
        #[arg(long)]
        name: Option<String>,
    },

    /// Create a record
    Create {
        zone_id: String,

        #[arg(long = "type")]
        record_type: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        content: String,

        /// TTL in seconds; 1 means automatic
        #[arg(long, default_value_t = 1)]
        ttl: u32,

        /// Route traffic through the proxy
        #[arg(long)]
        proxied: bool,

        #[arg(long)]
        comment: Option<String>,
    },

    /// Change the content of a record
    Update {
        zone_id: String,
        record_id: String,

        #[arg(long)]
        content: String,
    },

    /// Delete a record
    Delete { zone_id: String, record_id: String },
}

#[tracing::instrument(skip(client, output))]
pub async fn run<R: Runtime>(client: &ApiClient<R>, command: DnsCommand, output: Output) -> Result<()> {
    let dns = Dns::new(client);

    match command {
        DnsCommand::List {
            zone_id,
            record_type,
            name,
        } => {
            let records = dns
                .list(&zone_id, record_type.as_deref(), name.as_deref())
                .await?;
            output.emit(&records, |records| {
                if records.is_empty() {
                    println!("No DNS records found.");
                }
                for r in records {
                    println!(
                        "{:<34} {:<6} {:<40} {}{}",
                        r.id,
                        r.record_type,
                        r.name,
                        r.content,
                        if r.proxied { " (proxied)" } else { "" }
                    );
                }
            })
        }
        DnsCommand::Create {
            zone_id,
            record_type,
            name,
            content,
            ttl,
            proxied,
            comment,
        } => {
            let record = NewDnsRecord {
                record_type: record_type.to_uppercase(),
                name,
                content,
                ttl,
                proxied,
                comment,
            };
            let created = dns.create(&zone_id, &record).await?;
            output.emit(&created, |r| {
                println!("Created {} record {} -> {} ({})", r.record_type, r.name, r.content, r.id)
            })
        }
        DnsCommand::Update {
            zone_id,
            record_id,
            content,
        } => {
            let updated = dns.update_content(&zone_id, &record_id, &content).await?;
            output.emit(&updated, |r| println!("Updated {} -> {}", r.name, r.content))
        }
        DnsCommand::Delete { zone_id, record_id } => {
            dns.delete(&zone_id, &record_id).await?;
            output.done(&format!("Deleted DNS record {}.", record_id))
        }
    }
}
