//! Pages projects and deployments.

use serde::{Deserialize, Serialize};

use super::account_path;
use crate::http::{ApiClient, ApiError, ApiRequest};
use crate::runtime::Runtime;
use crate::validate::ProjectName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub id: Option<String>,
    /// `<name>.pages.dev` host.
    pub subdomain: Option<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    pub production_branch: Option<String>,
    pub created_on: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub url: Option<String>,
    pub environment: Option<String>,
    pub created_on: Option<String>,
    pub latest_stage: Option<Stage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub status: String,
}

pub struct Pages<'a, R: Runtime> {
    client: &'a ApiClient<R>,
}

impl<'a, R: Runtime> Pages<'a, R> {
    pub fn new(client: &'a ApiClient<R>) -> Self {
        Self { client }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let path = account_path(self.client, "pages/projects")?;
        self.client.fetch(ApiRequest::get(path)).await
    }

    pub async fn project(&self, name: &ProjectName) -> Result<Project, ApiError> {
        self.client
            .fetch(ApiRequest::get(self.project_path(name, "")?))
            .await
    }

    pub async fn deployments(&self, name: &ProjectName) -> Result<Vec<Deployment>, ApiError> {
        self.client
            .fetch(ApiRequest::get(self.project_path(name, "/deployments")?))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_project(&self, name: &ProjectName) -> Result<(), ApiError> {
        self.client
            .call(ApiRequest::delete(self.project_path(name, "")?))
            .await?;
        Ok(())
    }

    fn project_path(&self, name: &ProjectName, suffix: &str) -> Result<String, ApiError> {
        account_path(self.client, &format!("pages/projects/{}{}", name, suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ok_body, test_client};
    use serde_json::json;

    fn project() -> ProjectName {
        "docs".parse().unwrap()
    }

    #[tokio::test]
    async fn test_list_projects() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/accounts/acc123/pages/projects")
            .with_status(200)
            .with_body(ok_body(json!([{
                "name": "docs",
                "subdomain": "docs.pages.dev",
                "domains": ["docs.pages.dev", "docs.example.com"],
                "production_branch": "main"
            }])))
            .create_async()
            .await;

        let client = test_client(&server.url());
        let projects = Pages::new(&client).list_projects().await.unwrap();

        assert_eq!(projects[0].domains.len(), 2);
        assert_eq!(projects[0].production_branch.as_deref(), Some("main"));
    }

    #[tokio::test]
    async fn test_deployments() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/accounts/acc123/pages/projects/docs/deployments")
            .with_status(200)
            .with_body(ok_body(json!([{
                "id": "d1",
                "url": "https://abc.docs.pages.dev",
                "environment": "production",
                "latest_stage": {"name": "deploy", "status": "success"}
            }])))
            .create_async()
            .await;

        let client = test_client(&server.url());
        let deployments = Pages::new(&client).deployments(&project()).await.unwrap();

        assert_eq!(deployments[0].latest_stage.as_ref().unwrap().status, "success");
    }

    #[tokio::test]
    async fn test_delete_project() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/accounts/acc123/pages/projects/docs")
            .with_status(200)
            .with_body(ok_body(json!(null)))
            .create_async()
            .await;

        let client = test_client(&server.url());
        Pages::new(&client).delete_project(&project()).await.unwrap();

        mock.assert_async().await;
    }
}
