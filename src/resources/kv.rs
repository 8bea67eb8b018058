//! Workers KV namespaces and keys.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{BulkOutcome, account_path, fetch_all};
use crate::http::{ApiClient, ApiError, ApiRequest, encode_path_segment};
use crate::runtime::Runtime;
use crate::validate::KvKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub id: String,
    pub title: String,
    pub supports_url_encoding: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvKeyInfo {
    pub name: String,
    /// Unix timestamp.
    pub expiration: Option<u64>,
}

/// One page of a key listing. `cursor` is set when more keys follow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyPage {
    pub keys: Vec<KvKeyInfo>,
    pub cursor: Option<String>,
}

pub struct Kv<'a, R: Runtime> {
    client: &'a ApiClient<R>,
}

impl<'a, R: Runtime> Kv<'a, R> {
    pub fn new(client: &'a ApiClient<R>) -> Self {
        Self { client }
    }

    pub async fn list_namespaces(&self) -> Result<Vec<Namespace>, ApiError> {
        let path = account_path(self.client, "storage/kv/namespaces")?;
        fetch_all(self.client, ApiRequest::get(path)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_namespace(&self, title: &str) -> Result<Namespace, ApiError> {
        let path = account_path(self.client, "storage/kv/namespaces")?;
        self.client
            .fetch(ApiRequest::post(path).json(&json!({ "title": title }))?)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_namespace(&self, namespace_id: &str) -> Result<(), ApiError> {
        let path = self.namespace_path(namespace_id, "")?;
        self.client.call(ApiRequest::delete(path)).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_keys(
        &self,
        namespace_id: &str,
        prefix: Option<&str>,
        cursor: Option<&str>,
        limit: Option<u32>,
    ) -> Result<KeyPage, ApiError> {
        let request = ApiRequest::get(self.namespace_path(namespace_id, "/keys")?)
            .query_opt("prefix", prefix)
            .query_opt("cursor", cursor)
            .query_opt("limit", limit.map(|l| l.to_string()));

        let envelope = self.client.call(request).await?;
        // An empty cursor means the listing is complete
        let cursor = envelope
            .result_info
            .as_ref()
            .and_then(|info| info.cursor.clone())
            .filter(|c| !c.is_empty());
        let keys = envelope.decode()?;

        Ok(KeyPage { keys, cursor })
    }

    /// Store `value` under `key`. The body is sent as plain text.
    #[tracing::instrument(skip(self, value))]
    pub async fn put(
        &self,
        namespace_id: &str,
        key: &KvKey,
        value: &str,
        expiration_ttl: Option<u64>,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::put(self.value_path(namespace_id, key)?)
            .raw(value)
            .header("Content-Type", "text/plain")
            .query_opt("expiration_ttl", expiration_ttl.map(|t| t.to_string()));
        self.client.call(request).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, namespace_id: &str, key: &KvKey) -> Result<(), ApiError> {
        self.client
            .call(ApiRequest::delete(self.value_path(namespace_id, key)?))
            .await?;
        Ok(())
    }

    /// Delete keys one after another, each with full retry. A key that still
    /// fails is recorded and the batch moves on.
    #[tracing::instrument(skip(self, keys), fields(count = keys.len()))]
    pub async fn delete_many(&self, namespace_id: &str, keys: &[KvKey]) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();

        for key in keys {
            match self.delete(namespace_id, key).await {
                Ok(()) => {
                    debug!("Deleted key {}", key);
                    outcome.succeeded += 1;
                }
                Err(e) => {
                    warn!("Failed to delete key {}: {}", key, e);
                    outcome.failed.push((key.to_string(), e));
                }
            }
        }

        outcome
    }

    fn namespace_path(&self, namespace_id: &str, suffix: &str) -> Result<String, ApiError> {
        account_path(
            self.client,
            &format!(
                "storage/kv/namespaces/{}{}",
                encode_path_segment(namespace_id),
                suffix
            ),
        )
    }

    fn value_path(&self, namespace_id: &str, key: &KvKey) -> Result<String, ApiError> {
        self.namespace_path(
            namespace_id,
            &format!("/values/{}", encode_path_segment(key.as_str())),
        )
    }
}
