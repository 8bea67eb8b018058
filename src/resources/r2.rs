//! R2 buckets.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::account_path;
use crate::http::{ApiClient, ApiError, ApiRequest};
use crate::runtime::Runtime;
use crate::validate::BucketName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
    pub creation_date: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BucketList {
    #[serde(default)]
    buckets: Vec<Bucket>,
}

pub struct R2<'a, R: Runtime> {
    client: &'a ApiClient<R>,
}

impl<'a, R: Runtime> R2<'a, R> {
    pub fn new(client: &'a ApiClient<R>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Bucket>, ApiError> {
        let path = account_path(self.client, "r2/buckets")?;
        let result: BucketList = self.client.fetch(ApiRequest::get(path)).await?;
        Ok(result.buckets)
    }

    /// Create a bucket, optionally hinting at a location such as `weur`.
    #[tracing::instrument(skip(self))]
    pub async fn create(
        &self,
        name: &BucketName,
        location_hint: Option<&str>,
    ) -> Result<Bucket, ApiError> {
        let path = account_path(self.client, "r2/buckets")?;
        let mut body = json!({ "name": name.as_str() });
        if let Some(hint) = location_hint {
            body["locationHint"] = json!(hint);
        }
        self.client.fetch(ApiRequest::post(path).json(&body)?).await
    }

    /// Delete an empty bucket.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, name: &BucketName) -> Result<(), ApiError> {
        let path = account_path(self.client, &format!("r2/buckets/{}", name))?;
        self.client.call(ApiRequest::delete(path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ok_body, test_client};
    use mockito::Matcher;

    fn bucket(s: &str) -> BucketName {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_list_buckets_unwraps_result() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/accounts/acc123/r2/buckets")
            .with_status(200)
            .with_body(ok_body(json!({"buckets": [
                {"name": "assets", "creation_date": "2024-01-01T00:00:00Z", "location": "WEUR"}
            ]})))
            .create_async()
            .await;

        let client = test_client(&server.url());
        let buckets = R2::new(&client).list().await.unwrap();

        assert_eq!(buckets[0].name, "assets");
        assert_eq!(buckets[0].location.as_deref(), Some("WEUR"));
    }

    #[tokio::test]
    async fn test_create_bucket_with_hint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/accounts/acc123/r2/buckets")
            .match_body(Matcher::Json(json!({"name": "assets", "locationHint": "weur"})))
            .with_status(200)
            .with_body(ok_body(json!({"name": "assets"})))
            .create_async()
            .await;

        let client = test_client(&server.url());
        R2::new(&client)
            .create(&bucket("assets"), Some("weur"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_bucket_without_hint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/accounts/acc123/r2/buckets")
            .match_body(Matcher::Json(json!({"name": "assets"})))
            .with_status(200)
            .with_body(ok_body(json!({"name": "assets"})))
            .create_async()
            .await;

        let client = test_client(&server.url());
        R2::new(&client).create(&bucket("assets"), None).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_bucket_conflict() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/accounts/acc123/r2/buckets/assets")
            .with_status(409)
            .with_body(r#"{"success": false, "errors": [{"code": 10008, "message": "The bucket you tried to delete is not empty"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = R2::new(&client).delete(&bucket("assets")).await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.status(), Some(409));
        assert!(crate::http::to_user_message(&err).contains("not empty"));
    }
}
