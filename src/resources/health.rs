//! Service health checks

use super::parse_json;
use crate::{
    endpoints::Endpoints,
    errors::Result,
    http::{RequestOptions, Transport},
    models::HealthStatus,
};
use std::sync::Arc;

/// Health API
///
/// Health probes bypass the retry engine: a probe that needs retries is
/// already the answer.
#[derive(Debug, Clone)]
pub struct Health {
    transport: Arc<Transport>,
}

impl Health {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Check service health
    pub async fn check(&self) -> Result<HealthStatus> {
        let response = self
            .transport
            .get(&Endpoints::health(), RequestOptions::default())
            .await?;
        parse_json(response).await
    }
}
