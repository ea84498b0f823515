//! Session authentication against the Vaulty API
//!
//! [`AuthHandler`] is the collaborator that turns credentials into a session:
//! it logs in through the shared transport, then stores the returned token
//! back onto the transport so the derived `Authorization` header picks it up
//! atomically for every subsequent request.

use crate::{
    endpoints::Endpoints,
    errors::{Error, Result},
    http::{RequestOptions, Transport},
    models::LoginResponse,
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::debug;

/// Login/logout handling bound to a shared transport
#[derive(Clone)]
pub struct AuthHandler {
    transport: Arc<Transport>,
}

impl std::fmt::Debug for AuthHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHandler").finish_non_exhaustive()
    }
}

impl AuthHandler {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Log in with email and password
    ///
    /// On success the returned session token is stored on the transport,
    /// superseding any configured API token for the `Authorization` header.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let opts = RequestOptions {
            json: Some(serde_json::json!({
                "email": email,
                "password": password,
            })),
            ..Default::default()
        };

        let response = self.transport.post(&Endpoints::login(), opts).await?;
        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| Error::Deserialize(format!("Invalid login response: {}", e)))?;

        self.transport
            .set_session_token(Some(login.access_token.clone()));
        debug!("session token installed");

        Ok(login)
    }

    /// Discard the current session token
    ///
    /// The derived header reverts to the API token, or to no header at all.
    pub fn logout(&self) {
        self.transport.set_session_token(None);
        debug!("session token cleared");
    }

    /// The current session token, if logged in
    pub fn session_token(&self) -> Option<SecretString> {
        self.transport.session_token()
    }
}
