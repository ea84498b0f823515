//! Data models for the Vaulty API
//!
//! Response types are mechanical mappings of the API's JSON bodies. Secret
//! values are wrapped in [`SecretString`] so they never show up in logs or
//! debug output.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// A project owned by a customer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectResponse {
    /// Project ID
    pub id: String,
    /// Owning customer ID
    pub customer_id: String,
    /// Project name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Creation time (RFC 3339)
    pub created_at: String,
    /// Last update time (RFC 3339)
    pub updated_at: String,
}

/// Secret metadata (no value)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecretResponse {
    /// Secret ID
    pub id: String,
    /// Owning project ID
    pub project_id: String,
    /// Secret key name
    pub key: String,
    /// Creation time (RFC 3339)
    pub created_at: String,
    /// Last update time (RFC 3339)
    pub updated_at: String,
}

/// Secret metadata plus its decrypted value
#[derive(Debug, Clone, Deserialize)]
pub struct SecretValueResponse {
    /// Secret ID
    pub id: String,
    /// Owning project ID
    pub project_id: String,
    /// Secret key name
    pub key: String,
    /// Decrypted value (protected)
    pub value: SecretString,
    /// Creation time (RFC 3339)
    pub created_at: String,
    /// Last update time (RFC 3339)
    pub updated_at: String,
}

/// An API token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Token ID
    pub id: String,
    /// Human-readable token name
    pub name: String,
    /// Granted scopes
    #[serde(default)]
    pub scopes: Vec<String>,
    /// The token value, returned only on creation (protected)
    pub token: Option<SecretString>,
    /// Creation time (RFC 3339)
    pub created_at: String,
    /// Expiry time, if the token expires (RFC 3339)
    pub expires_at: Option<String>,
}

/// A customer account
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustomerResponse {
    /// Customer ID
    pub id: String,
    /// Account email
    pub email: String,
    /// Display name
    pub name: Option<String>,
    /// Creation time (RFC 3339)
    pub created_at: String,
    /// Last update time (RFC 3339)
    pub updated_at: String,
}

/// An audit-trail activity entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActivityResponse {
    /// Activity ID
    pub id: String,
    /// Acting customer ID
    pub customer_id: String,
    /// Action performed (e.g. `secret.created`)
    pub action: String,
    /// Affected resource type
    pub resource_type: String,
    /// Affected resource ID
    pub resource_id: Option<String>,
    /// When the action happened (RFC 3339)
    pub created_at: String,
}

/// A page of results
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: u64,
    /// Current page number (1-based)
    pub page: u32,
    /// Page size used for this query
    pub page_size: u32,
    /// Total number of pages
    pub total_pages: u32,
    /// Whether a next page exists
    pub has_next: bool,
    /// Whether a previous page exists
    pub has_previous: bool,
}

/// Response to a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Session token for subsequent requests (protected)
    pub access_token: SecretString,
    /// Token type, always `bearer`
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Result of a delete operation
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResult {
    /// Whether the resource was deleted
    #[serde(default = "default_true")]
    pub deleted: bool,
    /// Optional server message
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Service health report
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    /// Overall status string (`ok`, `degraded`, ...)
    pub status: String,
    /// Service version, if reported
    pub version: Option<String>,
}
