//! DNS records of a zone.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::fetch_all;
use crate::http::{ApiClient, ApiError, ApiRequest, encode_path_segment};
use crate::runtime::Runtime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    /// 1 means automatic.
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDnsRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

pub struct Dns<'a, R: Runtime> {
    client: &'a ApiClient<R>,
}

impl<'a, R: Runtime> Dns<'a, R> {
    pub fn new(client: &'a ApiClient<R>) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        zone_id: &str,
        record_type: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<DnsRecord>, ApiError> {
        let request = ApiRequest::get(records_path(zone_id))
            .query_opt("type", record_type)
            .query_opt("name", name);
        fetch_all(self.client, request).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, zone_id: &str, record: &NewDnsRecord) -> Result<DnsRecord, ApiError> {
        self.client
            .fetch(ApiRequest::post(records_path(zone_id)).json(record)?)
            .await
    }

    /// Change only the content of an existing record.
    #[tracing::instrument(skip(self))]
    pub async fn update_content(
        &self,
        zone_id: &str,
        record_id: &str,
        content: &str,
    ) -> Result<DnsRecord, ApiError> {
        self.client
            .fetch(
                ApiRequest::patch(record_path(zone_id, record_id))
                    .json(&json!({ "content": content }))?,
            )
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, zone_id: &str, record_id: &str) -> Result<(), ApiError> {
        self.client
            .call(ApiRequest::delete(record_path(zone_id, record_id)))
            .await?;
        Ok(())
    }
}

fn records_path(zone_id: &str) -> String {
    format!("/zones/{}/dns_records", encode_path_segment(zone_id))
}

fn record_path(zone_id: &str, record_id: &str) -> String {
    format!("{}/{}", records_path(zone_id), encode_path_segment(record_id))
}
