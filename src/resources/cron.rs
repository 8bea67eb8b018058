//! Cron triggers of a worker script.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::account_path;
use crate::http::{ApiClient, ApiError, ApiRequest};
use crate::runtime::Runtime;
use crate::validate::WorkerName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub cron: String,
    pub created_on: Option<String>,
    pub modified_on: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Schedules {
    #[serde(default)]
    schedules: Vec<Schedule>,
}

pub struct Cron<'a, R: Runtime> {
    client: &'a ApiClient<R>,
}

impl<'a, R: Runtime> Cron<'a, R> {
    pub fn new(client: &'a ApiClient<R>) -> Self {
        Self { client }
    }

    pub async fn get(&self, script: &WorkerName) -> Result<Vec<Schedule>, ApiError> {
        let result: Schedules = self
            .client
            .fetch(ApiRequest::get(self.schedules_path(script)?))
            .await?;
        Ok(result.schedules)
    }

    /// Replace all schedules. An empty list removes every trigger.
    /// Expressions are passed through unchecked; the API validates them.
    #[tracing::instrument(skip(self))]
    pub async fn set(&self, script: &WorkerName, crons: &[String]) -> Result<Vec<Schedule>, ApiError> {
        let body: Vec<Value> = crons.iter().map(|c| json!({ "cron": c })).collect();
        let result: Schedules = self
            .client
            .fetch(ApiRequest::put(self.schedules_path(script)?).json(&body)?)
            .await?;
        Ok(result.schedules)
    }

    fn schedules_path(&self, script: &WorkerName) -> Result<String, ApiError> {
        account_path(self.client, &format!("workers/scripts/{}/schedules", script))
    }
}
