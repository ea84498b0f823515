//! Client configuration and builder
//!
//! Configuration is explicit and loaded once at the boundary: the builder
//! takes explicit parameters, [`ClientBuilder::from_env`] seeds those
//! parameters from the process environment, and defaults fill the rest.
//! Precedence is explicit parameter > environment > default; nothing in the
//! core reads the environment lazily.

use crate::{
    errors::{Error, Result},
    retry::RetryPolicy,
};
use secrecy::SecretString;
use std::time::Duration;

/// Environment variable holding the API base URL
pub const ENV_BASE_URL: &str = "VAULTY_BASE_URL";
/// Environment variable holding the long-lived API token
pub const ENV_API_TOKEN: &str = "VAULTY_API_TOKEN";
/// Environment variable holding a pre-obtained session (JWT) token
pub const ENV_JWT_TOKEN: &str = "VAULTY_JWT_TOKEN";
/// Environment variable overriding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "VAULTY_TIMEOUT_SECS";
/// Environment variable overriding the retry budget
pub const ENV_MAX_RETRIES: &str = "VAULTY_MAX_RETRIES";

/// Client configuration
///
/// Immutable once built; credentials live on the transport afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Vaulty service
    pub base_url: String,
    /// Long-lived API token
    pub api_token: Option<SecretString>,
    /// Session (JWT) token, supersedes the API token when set
    pub session_token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retry and backoff policy
    pub retry_policy: RetryPolicy,
    /// User agent suffix
    pub user_agent_suffix: Option<String>,
}

/// Builder for creating a configured [`VaultyClient`](crate::VaultyClient)
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    api_token: Option<SecretString>,
    session_token: Option<SecretString>,
    timeout_ms: u64,
    retry_policy: RetryPolicy,
    user_agent_suffix: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with the given base URL
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the Vaulty service (e.g. `"https://api.vaulty.dev"`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            session_token: None,
            timeout_ms: crate::DEFAULT_TIMEOUT_MS,
            retry_policy: RetryPolicy::default(),
            user_agent_suffix: None,
        }
    }

    /// Seed a builder from the process environment
    ///
    /// Reads `VAULTY_BASE_URL`, `VAULTY_API_TOKEN`, `VAULTY_JWT_TOKEN`,
    /// `VAULTY_TIMEOUT_SECS`, and `VAULTY_MAX_RETRIES` once, at this
    /// boundary. Explicit setter calls afterwards take precedence. Fails if
    /// neither token variable is set.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(ENV_BASE_URL).unwrap_or_else(|_| crate::DEFAULT_BASE_URL.to_string());

        let api_token = std::env::var(ENV_API_TOKEN).ok().map(SecretString::new);
        let session_token = std::env::var(ENV_JWT_TOKEN).ok().map(SecretString::new);

        if api_token.is_none() && session_token.is_none() {
            return Err(Error::Config(format!(
                "{} or {} must be set",
                ENV_API_TOKEN, ENV_JWT_TOKEN
            )));
        }

        let mut builder = Self::new(base_url);
        builder.api_token = api_token;
        builder.session_token = session_token;

        if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.parse().map_err(|_| {
                Error::Config(format!("{} must be an integer", ENV_TIMEOUT_SECS))
            })?;
            builder.timeout_ms = secs * 1000;
        }
        if let Ok(retries) = std::env::var(ENV_MAX_RETRIES) {
            builder.retry_policy.max_retries = retries.parse().map_err(|_| {
                Error::Config(format!("{} must be an integer", ENV_MAX_RETRIES))
            })?;
        }

        Ok(builder)
    }

    /// Set the long-lived API token
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set a pre-obtained session (JWT) token
    pub fn session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set the request timeout in milliseconds
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the number of retries for failed requests
    pub fn retries(mut self, retries: u32) -> Self {
        self.retry_policy.max_retries = retries;
        self
    }

    /// Set the delay before the first retry, in milliseconds
    pub fn initial_delay_ms(mut self, delay_ms: u64) -> Self {
        self.retry_policy.initial_delay = Duration::from_millis(delay_ms);
        self
    }

    /// Set the backoff delay ceiling, in milliseconds
    pub fn max_delay_ms(mut self, delay_ms: u64) -> Self {
        self.retry_policy.max_delay = Duration::from_millis(delay_ms);
        self
    }

    /// Set the multiplicative backoff factor
    pub fn backoff_factor(mut self, factor: f64) -> Self {
        self.retry_policy.backoff_factor = factor;
        self
    }

    /// Enable or disable retry jitter (enabled by default)
    pub fn jitter(mut self, enabled: bool) -> Self {
        self.retry_policy.jitter = enabled;
        self
    }

    /// Replace the whole retry policy
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Add a custom user agent suffix
    pub fn user_agent_extra(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Build the client with the configured options
    pub fn build(self) -> Result<crate::VaultyClient> {
        let url = self.base_url.trim_end_matches('/');

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }

        let config = ClientConfig {
            base_url: url.to_string(),
            api_token: self.api_token,
            session_token: self.session_token,
            timeout: Duration::from_millis(self.timeout_ms),
            retry_policy: self.retry_policy,
            user_agent_suffix: self.user_agent_suffix,
        };

        Ok(crate::client::VaultyClient::from_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            ENV_BASE_URL,
            ENV_API_TOKEN,
            ENV_JWT_TOKEN,
            ENV_TIMEOUT_SECS,
            ENV_MAX_RETRIES,
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_builder_validates_url() {
        let result = ClientBuilder::new("not-a-url").api_token("token").build();
        assert!(matches!(result.unwrap_err(), Error::Config(_)));
    }

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::new("https://api.test.com");
        assert_eq!(builder.timeout_ms, crate::DEFAULT_TIMEOUT_MS);
        assert_eq!(builder.retry_policy, RetryPolicy::default());
    }

    #[test]
    fn test_builder_retry_overrides() {
        let builder = ClientBuilder::new("https://api.test.com")
            .retries(5)
            .initial_delay_ms(200)
            .backoff_factor(3.0)
            .jitter(false);
        assert_eq!(builder.retry_policy.max_retries, 5);
        assert_eq!(builder.retry_policy.initial_delay, Duration::from_millis(200));
        assert_eq!(builder.retry_policy.backoff_factor, 3.0);
        assert!(!builder.retry_policy.jitter);
    }

    #[test]
    #[serial]
    fn test_from_env_requires_token() {
        clear_env();
        let result = ClientBuilder::from_env();
        assert!(matches!(result.unwrap_err(), Error::Config(_)));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_settings() {
        clear_env();
        std::env::set_var(ENV_API_TOKEN, "env-token");
        std::env::set_var(ENV_BASE_URL, "https://env.test.com");
        std::env::set_var(ENV_TIMEOUT_SECS, "60");
        std::env::set_var(ENV_MAX_RETRIES, "5");

        let builder = ClientBuilder::from_env().unwrap();
        assert_eq!(builder.base_url, "https://env.test.com");
        assert!(builder.api_token.is_some());
        assert_eq!(builder.timeout_ms, 60_000);
        assert_eq!(builder.retry_policy.max_retries, 5);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_explicit_overrides_env() {
        clear_env();
        std::env::set_var(ENV_API_TOKEN, "env-token");
        std::env::set_var(ENV_MAX_RETRIES, "5");

        let builder = ClientBuilder::from_env().unwrap().retries(1);
        assert_eq!(builder.retry_policy.max_retries, 1);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_jwt_only() {
        clear_env();
        std::env::set_var(ENV_JWT_TOKEN, "jwt-token");

        let builder = ClientBuilder::from_env().unwrap();
        assert!(builder.api_token.is_none());
        assert!(builder.session_token.is_some());

        clear_env();
    }
}
