//! API endpoint path construction
//!
//! Paths are relative to the versioned API root; the transport prefixes the
//! base URL and `/api/{version}` segment.

use crate::util::encode_path;

/// Endpoint builder
#[derive(Debug, Clone, Default)]
pub struct Endpoints;

impl Endpoints {
    // Customers
    pub fn login() -> String {
        "/customers/login".to_string()
    }

    pub fn register() -> String {
        "/customers/register".to_string()
    }

    pub fn me() -> String {
        "/customers/me".to_string()
    }

    // Projects
    pub fn projects() -> String {
        "/projects".to_string()
    }

    pub fn project(project_id: &str) -> String {
        format!("/projects/{}", encode_path(project_id))
    }

    // Secrets
    pub fn secrets(project_id: &str) -> String {
        format!("/projects/{}/secrets", encode_path(project_id))
    }

    pub fn secret(project_id: &str, key: &str) -> String {
        format!(
            "/projects/{}/secrets/{}",
            encode_path(project_id),
            encode_path(key)
        )
    }

    pub fn secret_value(project_id: &str, key: &str) -> String {
        format!(
            "/projects/{}/secrets/{}/value",
            encode_path(project_id),
            encode_path(key)
        )
    }

    // Tokens
    pub fn tokens() -> String {
        "/tokens".to_string()
    }

    pub fn token(token_id: &str) -> String {
        format!("/tokens/{}", encode_path(token_id))
    }

    // Activities
    pub fn activities() -> String {
        "/activities".to_string()
    }

    // Health
    pub fn health() -> String {
        "/health".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(Endpoints::login(), "/customers/login");
        assert_eq!(Endpoints::project("p-123"), "/projects/p-123");
        assert_eq!(
            Endpoints::secret("p-123", "API_KEY"),
            "/projects/p-123/secrets/API_KEY"
        );
        assert_eq!(
            Endpoints::secret_value("p-123", "API_KEY"),
            "/projects/p-123/secrets/API_KEY/value"
        );
    }

    #[test]
    fn test_endpoints_encode_segments() {
        assert_eq!(
            Endpoints::secret("my project", "a/b"),
            "/projects/my%20project/secrets/a%2Fb"
        );
    }
}
