//! API token management

use super::parse_json;
use crate::{
    endpoints::Endpoints,
    errors::Result,
    http::{RequestOptions, Transport},
    models::{DeleteResult, TokenResponse},
    retry::{retry_with_backoff, RetryPolicy},
};
use std::sync::Arc;

/// Tokens API
#[derive(Debug, Clone)]
pub struct Tokens {
    transport: Arc<Transport>,
    retry_policy: RetryPolicy,
}

impl Tokens {
    pub(crate) fn new(transport: Arc<Transport>, retry_policy: RetryPolicy) -> Self {
        Self {
            transport,
            retry_policy,
        }
    }

    /// Create an API token
    ///
    /// The token value is returned only in this response and cannot be
    /// retrieved again.
    pub async fn create(&self, name: &str, scopes: &[&str]) -> Result<TokenResponse> {
        let body = serde_json::json!({
            "name": name,
            "scopes": scopes,
        });

        retry_with_backoff(
            || async {
                let opts = RequestOptions {
                    json: Some(body.clone()),
                    ..Default::default()
                };
                let response = self.transport.post(&Endpoints::tokens(), opts).await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// List API tokens (values are never included)
    pub async fn list(&self) -> Result<Vec<TokenResponse>> {
        retry_with_backoff(
            || async {
                let response = self
                    .transport
                    .get(&Endpoints::tokens(), RequestOptions::default())
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// Revoke an API token, immediately invalidating it
    pub async fn revoke(&self, token_id: &str) -> Result<DeleteResult> {
        retry_with_backoff(
            || async {
                let response = self
                    .transport
                    .delete(&Endpoints::token(token_id), RequestOptions::default())
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }
}
