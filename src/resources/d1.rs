//! D1 databases and queries.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{account_path, fetch_all};
use crate::http::{ApiClient, ApiError, ApiRequest, encode_path_segment};
use crate::runtime::Runtime;
use crate::validate::DatabaseName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub uuid: String,
    pub name: String,
    pub created_at: Option<String>,
    pub version: Option<String>,
    pub num_tables: Option<u64>,
    pub file_size: Option<u64>,
}

/// Result of one statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub success: bool,
    pub meta: Option<Value>,
}

pub struct D1<'a, R: Runtime> {
    client: &'a ApiClient<R>,
}

impl<'a, R: Runtime> D1<'a, R> {
    pub fn new(client: &'a ApiClient<R>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Database>, ApiError> {
        let path = account_path(self.client, "d1/database")?;
        fetch_all(self.client, ApiRequest::get(path)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &DatabaseName) -> Result<Database, ApiError> {
        let path = account_path(self.client, "d1/database")?;
        self.client
            .fetch(ApiRequest::post(path).json(&json!({ "name": name.as_str() }))?)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, database_id: &str) -> Result<(), ApiError> {
        let path = self.database_path(database_id, "")?;
        self.client.call(ApiRequest::delete(path)).await?;
        Ok(())
    }

    /// Run `sql` with positional `params` bound to `?` placeholders.
    #[tracing::instrument(skip(self, params))]
    pub async fn query(
        &self,
        database_id: &str,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<QueryResult>, ApiError> {
        let path = self.database_path(database_id, "/query")?;
        self.client
            .fetch(ApiRequest::post(path).json(&json!({ "sql": sql, "params": params }))?)
            .await
    }

    fn database_path(&self, database_id: &str, suffix: &str) -> Result<String, ApiError> {
        account_path(
            self.client,
            &format!("d1/database/{}{}", encode_path_segment(database_id), suffix),
        )
    }
}
