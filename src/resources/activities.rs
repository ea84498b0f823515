//! Audit activity listing

use super::{page_query, parse_json};
use crate::{
    endpoints::Endpoints,
    errors::Result,
    http::{RequestOptions, Transport},
    models::{ActivityResponse, PaginatedResponse},
    retry::{retry_with_backoff, RetryPolicy},
};
use std::sync::Arc;

/// Activities API
#[derive(Debug, Clone)]
pub struct Activities {
    transport: Arc<Transport>,
    retry_policy: RetryPolicy,
}

impl Activities {
    pub(crate) fn new(transport: Arc<Transport>, retry_policy: RetryPolicy) -> Self {
        Self {
            transport,
            retry_policy,
        }
    }

    /// List audit activities for the authenticated customer, paginated
    pub async fn list(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedResponse<ActivityResponse>> {
        retry_with_backoff(
            || async {
                let opts = RequestOptions {
                    query: page_query(page, page_size),
                    ..Default::default()
                };
                let response = self.transport.get(&Endpoints::activities(), opts).await?;
                parse_json(response).await
            },
            &self.retry_policy,
        )
        .await
    }
}
