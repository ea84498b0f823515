//! Project CRUD operations

use super::{page_query, parse_json};
use crate::{
    endpoints::Endpoints,
    errors::Result,
    http::{RequestOptions, Transport},
    models::{DeleteResult, PaginatedResponse, ProjectResponse},
    retry::{retry_with_backoff, RetryPolicy},
};
use std::sync::Arc;

/// Projects API
#[derive(Debug, Clone)]
pub struct Projects {
    transport: Arc<Transport>,
    retry_policy: RetryPolicy,
}

impl Projects {
    pub(crate) fn new(transport: Arc<Transport>, retry_policy: RetryPolicy) -> Self {
        Self {
            transport,
            retry_policy,
        }
    }

    /// Create a project
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<ProjectResponse> {
        let body = serde_json::json!({
            "name": name,
            "description": description,
        });

        retry_with_backoff(
            || async {
                let opts = RequestOptions {
                    json: Some(body.clone()),
                    ..Default::default()
                };
                let response = self.transport.post(&Endpoints::projects(), opts).await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// List projects, paginated
    pub async fn list(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedResponse<ProjectResponse>> {
        retry_with_backoff(
            || async {
                let opts = RequestOptions {
                    query: page_query(page, page_size),
                    ..Default::default()
                };
                let response = self.transport.get(&Endpoints::projects(), opts).await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// Get a project by ID
    pub async fn get(&self, project_id: &str) -> Result<ProjectResponse> {
        retry_with_backoff(
            || async {
                let response = self
                    .transport
                    .get(&Endpoints::project(project_id), RequestOptions::default())
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// Update a project's name and/or description
    pub async fn update(
        &self,
        project_id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<ProjectResponse> {
        let mut body = serde_json::Map::new();
        if let Some(name) = name {
            let _ = body.insert("name".to_string(), serde_json::json!(name));
        }
        if let Some(description) = description {
            let _ = body.insert("description".to_string(), serde_json::json!(description));
        }
        let body = serde_json::Value::Object(body);

        retry_with_backoff(
            || async {
                let opts = RequestOptions {
                    json: Some(body.clone()),
                    ..Default::default()
                };
                let response = self
                    .transport
                    .patch(&Endpoints::project(project_id), opts)
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// Delete a project and all its secrets
    pub async fn delete(&self, project_id: &str) -> Result<DeleteResult> {
        retry_with_backoff(
            || async {
                let response = self
                    .transport
                    .delete(&Endpoints::project(project_id), RequestOptions::default())
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }
}
