//! Worker scripts.

use serde::{Deserialize, Serialize};

use super::account_path;
use crate::http::{ApiClient, ApiError, ApiRequest};
use crate::runtime::Runtime;
use crate::validate::WorkerName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerScript {
    /// The script name.
    pub id: String,
    pub created_on: Option<String>,
    pub modified_on: Option<String>,
    pub usage_model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Subdomain {
    subdomain: String,
}

pub struct Workers<'a, R: Runtime> {
    client: &'a ApiClient<R>,
}

impl<'a, R: Runtime> Workers<'a, R> {
    pub fn new(client: &'a ApiClient<R>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<WorkerScript>, ApiError> {
        let path = account_path(self.client, "workers/scripts")?;
        self.client.fetch(ApiRequest::get(path)).await
    }

    /// Delete a script. `force` also removes bindings that reference it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, name: &WorkerName, force: bool) -> Result<(), ApiError> {
        let path = account_path(self.client, &format!("workers/scripts/{}", name))?;
        let mut request = ApiRequest::delete(path);
        if force {
            request = request.query("force", "true");
        }
        self.client.call(request).await?;
        Ok(())
    }

    /// The account's `<subdomain>.workers.dev` prefix.
    pub async fn subdomain(&self) -> Result<String, ApiError> {
        let path = account_path(self.client, "workers/subdomain")?;
        let result: Subdomain = self.client.fetch(ApiRequest::get(path)).await?;
        Ok(result.subdomain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ok_body, test_client};
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_scripts() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/accounts/acc123/workers/scripts")
            .with_status(200)
            .with_body(ok_body(json!([
                {"id": "api", "created_on": "2024-01-01T00:00:00Z", "modified_on": "2024-02-01T00:00:00Z"},
                {"id": "cron-job"}
            ])))
            .create_async()
            .await;

        let client = test_client(&server.url());
        let scripts = Workers::new(&client).list().await.unwrap();

        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[0].id, "api");
        assert_eq!(scripts[1].modified_on, None);
    }

    #[tokio::test]
    async fn test_delete_with_force() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/accounts/acc123/workers/scripts/api")
            .match_query(Matcher::UrlEncoded("force".into(), "true".into()))
            .with_status(200)
            .with_body(ok_body(json!(null)))
            .create_async()
            .await;

        let client = test_client(&server.url());
        Workers::new(&client)
            .delete(&"api".parse().unwrap(), true)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_subdomain() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/accounts/acc123/workers/subdomain")
            .with_status(200)
            .with_body(ok_body(json!({"subdomain": "my-team"})))
            .create_async()
            .await;

        let client = test_client(&server.url());
        assert_eq!(Workers::new(&client).subdomain().await.unwrap(), "my-team");
    }
}
