//! Vaulty client implementation
//!
//! [`VaultyClient`] ties the pieces together: one shared [`Transport`] (HTTP
//! execution, auth header, response classification), one [`RetryPolicy`]
//! handed to every resource facade, and the [`AuthHandler`] collaborator that
//! installs session tokens onto the transport.
//!
//! # Example
//!
//! ```no_run
//! use vaulty_sdk::VaultyClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VaultyClient::builder("https://api.vaulty.dev")
//!         .api_token("your-api-token")
//!         .build()?;
//!
//!     let projects = client.projects.list(1, 50).await?;
//!     println!("{} projects", projects.total);
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```

use crate::{
    auth::AuthHandler,
    config::{ClientBuilder, ClientConfig},
    errors::Result,
    http::Transport,
    resources::{Activities, Customers, Health, Projects, Secrets, Tokens},
    retry::RetryPolicy,
};
use std::sync::Arc;

/// Client for the Vaulty secrets management API
///
/// Cheap to clone; clones share the same transport and connection. Each
/// instance owns its own credentials and connection state, so there is no
/// process-wide shared state between separately built clients.
#[derive(Clone)]
pub struct VaultyClient {
    transport: Arc<Transport>,
    retry_policy: RetryPolicy,
    /// Login/logout handling
    pub auth: AuthHandler,
    /// Project CRUD
    pub projects: Projects,
    /// Secret CRUD
    pub secrets: Secrets,
    /// API token management
    pub tokens: Tokens,
    /// Customer account operations
    pub customers: Customers,
    /// Audit activity listing
    pub activities: Activities,
    /// Service health checks
    pub health: Health,
}

impl std::fmt::Debug for VaultyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultyClient")
            .field("base_url", &self.transport.base_url())
            .field("timeout", &self.transport.timeout())
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}

impl VaultyClient {
    /// Start building a client for the given base URL
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Build a client from the process environment
    ///
    /// See [`ClientBuilder::from_env`] for the variables read and their
    /// precedence.
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build()
    }

    pub(crate) fn from_config(config: ClientConfig) -> Self {
        let transport = Arc::new(Transport::new(
            config.base_url,
            config.timeout,
            config.api_token,
            config.session_token,
            config.user_agent_suffix,
        ));
        let retry_policy = config.retry_policy;

        Self {
            auth: AuthHandler::new(Arc::clone(&transport)),
            projects: Projects::new(Arc::clone(&transport), retry_policy.clone()),
            secrets: Secrets::new(Arc::clone(&transport), retry_policy.clone()),
            tokens: Tokens::new(Arc::clone(&transport), retry_policy.clone()),
            customers: Customers::new(Arc::clone(&transport), retry_policy.clone()),
            activities: Activities::new(Arc::clone(&transport), retry_policy.clone()),
            health: Health::new(Arc::clone(&transport)),
            transport,
            retry_policy,
        }
    }

    /// The retry policy applied to resource calls
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// The shared transport (for advanced callers issuing raw requests)
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// Release the underlying connection
    ///
    /// Idempotent; a later request on this client re-initializes the
    /// connection. Callers should ensure no requests are in flight, see the
    /// transport documentation for the close/in-flight caveat.
    pub async fn close(&self) {
        self.transport.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config() {
        let client = VaultyClient::builder("https://api.test.com")
            .api_token("test-token")
            .retries(5)
            .backoff_factor(3.0)
            .build()
            .unwrap();

        assert_eq!(client.transport().base_url(), "https://api.test.com");
        assert_eq!(client.retry_policy().max_retries, 5);
        assert_eq!(client.retry_policy().backoff_factor, 3.0);
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = VaultyClient::builder("https://api.test.com/")
            .api_token("test-token")
            .build()
            .unwrap();
        assert_eq!(client.transport().base_url(), "https://api.test.com");
    }

    #[test]
    fn test_client_debug_redacts_credentials() {
        let client = VaultyClient::builder("https://api.test.com")
            .api_token("super-secret-token")
            .build()
            .unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("super-secret-token"));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let client = VaultyClient::builder("https://api.test.com")
            .api_token("test-token")
            .build()
            .unwrap();
        client.close().await;
        client.close().await;
    }
}
