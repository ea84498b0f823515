//! Resource facades for the Vaulty API
//!
//! Each facade is a thin CRUD wrapper: it builds a path, issues the call
//! through the shared [`Transport`](crate::http::Transport) inside the retry
//! engine, and maps the JSON payload into a typed response. All failure
//! classification and retry behavior lives in the pipeline underneath.

mod activities;
mod customers;
mod health;
mod projects;
mod secrets;
mod tokens;

pub use activities::Activities;
pub use customers::Customers;
pub use health::Health;
pub use projects::Projects;
pub use secrets::Secrets;
pub use tokens::Tokens;

use crate::errors::{Error, Result};

/// Deserialize a JSON response body into a typed model
pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T> {
    response.json().await.map_err(Error::from)
}

/// Query pairs for a paginated listing
pub(crate) fn page_query(page: u32, page_size: u32) -> Vec<(String, String)> {
    vec![
        ("page".to_string(), page.to_string()),
        ("page_size".to_string(), page_size.to_string()),
    ]
}
