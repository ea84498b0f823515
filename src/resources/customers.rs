//! Customer account operations

use super::parse_json;
use crate::{
    endpoints::Endpoints,
    errors::Result,
    http::{RequestOptions, Transport},
    models::CustomerResponse,
    retry::{retry_with_backoff, RetryPolicy},
};
use std::sync::Arc;

/// Customers API
#[derive(Debug, Clone)]
pub struct Customers {
    transport: Arc<Transport>,
    retry_policy: RetryPolicy,
}

impl Customers {
    pub(crate) fn new(transport: Arc<Transport>, retry_policy: RetryPolicy) -> Self {
        Self {
            transport,
            retry_policy,
        }
    }

    /// Register a new customer account
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<CustomerResponse> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "name": name,
        });

        retry_with_backoff(
            || async {
                let opts = RequestOptions {
                    json: Some(body.clone()),
                    ..Default::default()
                };
                let response = self.transport.post(&Endpoints::register(), opts).await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// Get the authenticated customer's account
    pub async fn me(&self) -> Result<CustomerResponse> {
        retry_with_backoff(
            || async {
                let response = self
                    .transport
                    .get(&Endpoints::me(), RequestOptions::default())
                    .await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }

    /// Update the authenticated customer's display name
    pub async fn update_me(&self, name: &str) -> Result<CustomerResponse> {
        let body = serde_json::json!({ "name": name });

        retry_with_backoff(
            || async {
                let opts = RequestOptions {
                    json: Some(body.clone()),
                    ..Default::default()
                };
                let response = self.transport.patch(&Endpoints::me(), opts).await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }
}
