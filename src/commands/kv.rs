use anyhow::{Result, bail};
use log::info;

use super::output::Output;
use crate::http::{ApiClient, to_user_message};
use crate::resources::Kv;
use crate::runtime::Runtime;
use crate::validate::KvKey;

#[derive(clap::Subcommand, Debug)]
pub enum KvCommand {
    /// List namespaces
    Namespaces,

    /// Create a namespace
    CreateNamespace { title: String },

    /// Delete a namespace and all of its keys
    DeleteNamespace { namespace_id: String },

    /// List keys of a namespace (one page)
    Keys {
        namespace_id: String,

        #[arg(long)]
        prefix: Option<String>,

        /// Continue a previous listing
        #[arg(long)]
        cursor: Option<String>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Store a value
    Put {
        namespace_id: String,
        key: KvKey,
        value: String,

        /// Expire the key after this many seconds
        #[arg(long)]
        ttl: Option<u64>,
    },

    /// Delete one key
    Delete { namespace_id: String, key: KvKey },

    /// Delete several keys, continuing past failures
    BulkDelete {
        namespace_id: String,

        #[arg(required = true, num_args = 1..)]
        keys: Vec<KvKey>,
    },
}

#[tracing::instrument(skip(client, output))]
pub async fn run<R: Runtime>(client: &ApiClient<R>, command: KvCommand, output: Output) -> Result<()> {
    let kv = Kv::new(client);

    match command {
        KvCommand::Namespaces => {
            let namespaces = kv.list_namespaces().await?;
            output.emit(&namespaces, |namespaces| {
                if namespaces.is_empty() {
                    println!("No namespaces found.");
                }
                for ns in namespaces {
                    println!("{:<34} {}", ns.id, ns.title);
                }
            })
        }
        KvCommand::CreateNamespace { title } => {
            let ns = kv.create_namespace(&title).await?;
            output.emit(&ns, |ns| println!("Created namespace {} ({})", ns.title, ns.id))
        }
        KvCommand::DeleteNamespace { namespace_id } => {
            kv.delete_namespace(&namespace_id).await?;
            output.done(&format!("Deleted namespace {}.", namespace_id))
        }
        KvCommand::Keys {
            namespace_id,
            prefix,
            cursor,
            limit,
        } => {
            let page = kv
                .list_keys(&namespace_id, prefix.as_deref(), cursor.as_deref(), limit)
                .await?;
            output.emit(&page, |page| {
                for key in &page.keys {
                    match key.expiration {
                        Some(exp) => println!("{} (expires {})", key.name, exp),
                        None => println!("{}", key.name),
                    }
                }
                if let Some(cursor) = &page.cursor {
                    println!("More keys available: --cursor {}", cursor);
                }
            })
        }
        KvCommand::Put {
            namespace_id,
            key,
            value,
            ttl,
        } => {
            kv.put(&namespace_id, &key, &value, ttl).await?;
            output.done(&format!("Stored {}.", key))
        }
        KvCommand::Delete { namespace_id, key } => {
            kv.delete(&namespace_id, &key).await?;
            output.done(&format!("Deleted {}.", key))
        }
        KvCommand::BulkDelete { namespace_id, keys } => {
            let outcome = kv.delete_many(&namespace_id, &keys).await;
            info!(
                "Bulk delete finished: {} succeeded, {} failed",
                outcome.succeeded,
                outcome.failed.len()
            );

            for (key, err) in &outcome.failed {
                eprintln!("Failed to delete {}: {}", key, to_user_message(err));
            }
            output.done(&format!(
                "Deleted {} of {} keys.",
                outcome.succeeded,
                outcome.total()
            ))?;

            if !outcome.is_complete_success() {
                bail!("{} of {} keys could not be deleted.", outcome.failed.len(), outcome.total());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ok_body, test_client};
    use serde_json::json;

    #[tokio::test]
    async fn test_run_bulk_delete_reports_failures() {
        let mut server = mockito::Server::new_async().await;
        let _ok = server
            .mock("DELETE", "/accounts/acc123/storage/kv/namespaces/ns1/values/a")
            .with_status(200)
            .with_body(ok_body(json!(null)))
            .create_async()
            .await;
        let _denied = server
            .mock("DELETE", "/accounts/acc123/storage/kv/namespaces/ns1/values/b")
            .with_status(403)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = run(
            &client,
            KvCommand::BulkDelete {
                namespace_id: "ns1".into(),
                keys: vec!["a".parse().unwrap(), "b".parse().unwrap()],
            },
            Output::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "1 of 2 keys could not be deleted.");
    }

    #[tokio::test]
    async fn test_run_bulk_delete_all_succeed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "DELETE",
                mockito::Matcher::Regex(r"^/accounts/acc123/storage/kv/namespaces/ns1/values/".into()),
            )
            .with_status(200)
            .with_body(ok_body(json!(null)))
            .expect(2)
            .create_async()
            .await;

        let client = test_client(&server.url());
        run(
            &client,
            KvCommand::BulkDelete {
                namespace_id: "ns1".into(),
                keys: vec!["a".parse().unwrap(), "b".parse().unwrap()],
            },
            Output::default(),
        )
        .await
        .unwrap();

        mock.assert_async().await;
    }
}
