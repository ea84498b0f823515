//! Vaulty SDK for Rust
//!
//! A typed client for the Vaulty secrets management API: projects, secrets,
//! API tokens, customer accounts, and audit activities.
//!
//! All resource calls share one request pipeline: a lazily-connected HTTP
//! transport with derived bearer authentication, a closed error taxonomy
//! mapped from status codes, and exponential-backoff retries for transient
//! failures.
//!
//! # Features
//!
//! - Async/await on the tokio runtime
//! - Automatic retries with exponential backoff and jitter
//! - Session login superseding long-lived API tokens
//! - Typed errors distinguishing API responses from transport failures
//! - Secret values protected against accidental logging
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
//!     let secret = client.secrets.get_value("my-project", "DATABASE_URL").await?;
//!     println!("Fetched secret {}", secret.key);
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    unsafe_code,
    unused_results,
    warnings
)]

mod auth;
mod client;
mod config;
mod endpoints;
mod errors;
mod http;
mod models;
mod resources;
mod retry;
mod util;

pub use auth::AuthHandler;
pub use client::VaultyClient;
pub use config::{ClientBuilder, ClientConfig};
pub use errors::{ApiError, Error, Result};
pub use http::{Connection, RequestOptions, Transport};
pub use models::*;
pub use resources::{Activities, Customers, Health, Projects, Secrets, Tokens};
pub use retry::{retry_with_backoff, RetryPolicy};

// Re-export commonly used types
pub use secrecy::SecretString;

/// SDK version, matches Cargo.toml version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// API version path segment
pub const API_VERSION: &str = "v1";

/// Default base URL of the hosted Vaulty service
pub const DEFAULT_BASE_URL: &str = "https://api.vaulty.dev";

/// Default timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default number of retries
pub const DEFAULT_RETRIES: u32 = 3;
