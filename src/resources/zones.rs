//! Zones, zone settings and cache purges.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::fetch_all;
use crate::http::{ApiClient, ApiError, ApiRequest, encode_path_segment};
use crate::runtime::Runtime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub name_servers: Vec<String>,
    pub plan: Option<Plan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSetting {
    pub id: String,
    pub value: Value,
    #[serde(default)]
    pub editable: bool,
    pub modified_on: Option<String>,
}

/// What a cache purge removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeTarget {
    Everything,
    Files(Vec<String>),
}

impl PurgeTarget {
    fn body(&self) -> Value {
        match self {
            PurgeTarget::Everything => json!({ "purge_everything": true }),
            PurgeTarget::Files(files) => json!({ "files": files }),
        }
    }
}

pub struct Zones<'a, R: Runtime> {
    client: &'a ApiClient<R>,
}

impl<'a, R: Runtime> Zones<'a, R> {
    pub fn new(client: &'a ApiClient<R>) -> Self {
        Self { client }
    }

    /// All zones visible to the token, optionally filtered by domain name.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, name: Option<&str>) -> Result<Vec<Zone>, ApiError> {
        fetch_all(self.client, ApiRequest::get("/zones").query_opt("name", name)).await
    }

    pub async fn get(&self, zone_id: &str) -> Result<Zone, ApiError> {
        self.client
            .fetch(ApiRequest::get(zone_path(zone_id, "")))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn purge_cache(&self, zone_id: &str, target: &PurgeTarget) -> Result<(), ApiError> {
        self.client
            .call(ApiRequest::post(zone_path(zone_id, "/purge_cache")).json(&target.body())?)
            .await?;
        Ok(())
    }

    pub async fn settings(&self, zone_id: &str) -> Result<Vec<ZoneSetting>, ApiError> {
        self.client
            .fetch(ApiRequest::get(zone_path(zone_id, "/settings")))
            .await
    }

    pub async fn setting(&self, zone_id: &str, setting: &str) -> Result<ZoneSetting, ApiError> {
        self.client
            .fetch(ApiRequest::get(setting_path(zone_id, setting)))
            .await
    }

    #[tracing::instrument(skip(self, value))]
    pub async fn set_setting(
        &self,
        zone_id: &str,
        setting: &str,
        value: Value,
    ) -> Result<ZoneSetting, ApiError> {
        self.client
            .fetch(ApiRequest::patch(setting_path(zone_id, setting)).json(&json!({ "value": value }))?)
            .await
    }
}

/// `/zones/{id}{suffix}` with the zone id encoded as one segment.
fn zone_path(zone_id: &str, suffix: &str) -> String {
    format!("/zones/{}{}", encode_path_segment(zone_id), suffix)
}

fn setting_path(zone_id: &str, setting: &str) -> String {
    zone_path(
        zone_id,
        &format!("/settings/{}", encode_path_segment(setting)),
    )
}
