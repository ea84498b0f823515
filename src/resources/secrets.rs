//! Secret CRUD operations

use super::{page_query, parse_json};
use crate::{
    endpoints::Endpoints,
    errors::Result,
    http::{RequestOptions, Transport},
    models::{DeleteResult, PaginatedResponse, SecretResponse, SecretValueResponse},
    retry::{retry_with_backoff, RetryPolicy},
};
use std::sync::Arc;

/// Secrets API
#[derive(Debug, Clone)]
pub struct Secrets {
    transport: Arc<Transport>,
    retry_policy: RetryPolicy,
}

impl Secrets {
    pub(crate) fn new(transport: Arc<Transport>, retry_policy: RetryPolicy) -> Self {
        Self {
            transport,
            retry_policy,
        }
    }

    /// Create a secret in a project
    ///
    /// The value is transmitted once over TLS and stored encrypted; it is
    /// never echoed back in the creation response.
    pub async fn create(
        &self,
        project_id: &str,
        key: &str,
        value: &str,
    ) -> Result<SecretResponse> {
        let body = serde_json::json!({
            "key": key,
            "value": value,
        });

        retry_with_backoff(
            || async {
                let opts = RequestOptions {
                    json: Some(body.clone()),
                    ..Default::default()
                };
                let response = self
                    .transport
                    .post(&Endpoints::secrets(project_id), opts)
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// List secret metadata in a project, paginated
    pub async fn list(
        &self,
        project_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedResponse<SecretResponse>> {
        retry_with_backoff(
            || async {
                let opts = RequestOptions {
                    query: page_query(page, page_size),
                    ..Default::default()
                };
                let response = self
                    .transport
                    .get(&Endpoints::secrets(project_id), opts)
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// Get secret metadata (no value)
    pub async fn get(&self, project_id: &str, key: &str) -> Result<SecretResponse> {
        retry_with_backoff(
            || async {
                let response = self
                    .transport
                    .get(&Endpoints::secret(project_id, key), RequestOptions::default())
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// Get a secret including its decrypted value
    pub async fn get_value(&self, project_id: &str, key: &str) -> Result<SecretValueResponse> {
        retry_with_backoff(
            || async {
                let response = self
                    .transport
                    .get(
                        &Endpoints::secret_value(project_id, key),
                        RequestOptions::default(),
                    )
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// Replace a secret's value
    pub async fn update(&self, project_id: &str, key: &str, value: &str) -> Result<SecretResponse> {
        let body = serde_json::json!({ "value": value });

        retry_with_backoff(
            || async {
                let opts = RequestOptions {
                    json: Some(body.clone()),
                    ..Default::default()
                };
                let response = self
                    .transport
                    .patch(&Endpoints::secret(project_id, key), opts)
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// Delete a secret
    pub async fn delete(&self, project_id: &str, key: &str) -> Result<DeleteResult> {
        retry_with_backoff(
            || async {
                let response = self
                    .transport
                    .delete(&Endpoints::secret(project_id, key), RequestOptions::default())
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }
}
