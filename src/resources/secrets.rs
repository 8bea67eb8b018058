//! Secrets bound to a worker script.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::account_path;
use crate::http::{ApiClient, ApiError, ApiRequest, encode_path_segment};
use crate::runtime::Runtime;
use crate::validate::WorkerName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
    #[serde(rename = "type")]
    pub secret_type: String,
}

pub struct Secrets<'a, R: Runtime> {
    client: &'a ApiClient<R>,
}

impl<'a, R: Runtime> Secrets<'a, R> {
    pub fn new(client: &'a ApiClient<R>) -> Self {
        Self { client }
    }

    /// Secret names and types. Values are never returned by the API.
    pub async fn list(&self, script: &WorkerName) -> Result<Vec<Secret>, ApiError> {
        self.client
            .fetch(ApiRequest::get(self.secrets_path(script)?))
            .await
    }

    /// Create or replace a secret.
    #[tracing::instrument(skip(self, text))]
    pub async fn put(&self, script: &WorkerName, name: &str, text: &str) -> Result<Secret, ApiError> {
        let body = json!({
            "name": name,
            "text": text,
            "type": "secret_text",
        });
        self.client
            .fetch(ApiRequest::put(self.secrets_path(script)?).json(&body)?)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, script: &WorkerName, name: &str) -> Result<(), ApiError> {
        let path = format!("{}/{}", self.secrets_path(script)?, encode_path_segment(name));
        self.client.call(ApiRequest::delete(path)).await?;
        Ok(())
    }

    fn secrets_path(&self, script: &WorkerName) -> Result<String, ApiError> {
        account_path(self.client, &format!("workers/scripts/{}/secrets", script))
    }
}
