//! HTTP transport for the Vaulty SDK
//!
//! This module is the single point of outbound HTTP execution and response
//! classification. The [`Transport`] owns:
//!
//! - the immutable base address, API version segment, and request timeout,
//! - the credentials used to derive the `Authorization` header,
//! - a lazily-created, reusable [`Connection`] bound to those settings.
//!
//! The connection is created on first use, reused across calls, and released
//! by [`Transport::close`]; a closed transport re-initializes on the next
//! request rather than failing. Initialization happens synchronously under
//! the slot lock, so a cancelled request can never leave a half-constructed
//! connection cached for the next caller.
//!
//! # Known limitation
//!
//! The connection supports concurrent outstanding requests, but calling
//! `close()` while requests are in flight is undefined: in-flight calls keep
//! their handle and may fail with a transport error as the pool is torn down.
//! Callers should quiesce before closing.

use crate::{
    errors::{ApiError, Error, Result},
    util::{generate_request_id, parse_retry_after},
};

use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, Method, Request, Response};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, trace};

const USER_AGENT_PREFIX: &str = "vaulty-sdk-rust";

/// Capability for sending a prepared request and receiving a response
///
/// The production implementation wraps a `reqwest::Client`; tests can inject
/// a double through the transport's connection factory without touching the
/// network.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Execute a single HTTP exchange
    async fn send(&self, request: Request) -> Result<Response>;
}

/// Production connection backed by a reqwest client pool
struct ReqwestConnection {
    inner: HttpClient,
}

#[async_trait]
impl Connection for ReqwestConnection {
    async fn send(&self, request: Request) -> Result<Response> {
        self.inner.execute(request).await.map_err(Error::from)
    }
}

type ConnectionFactory = Box<dyn Fn() -> Result<Arc<dyn Connection>> + Send + Sync>;

/// Options forwarded with a single request
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    /// Query string pairs appended to the URL
    pub query: Vec<(String, String)>,
    /// JSON body; sets `Content-Type: application/json`
    pub json: Option<serde_json::Value>,
    /// Extra headers merged into the request
    pub headers: Option<http::HeaderMap>,
}

/// Credentials from which the `Authorization` header is derived
///
/// At most one token is active: a session token obtained via login always
/// supersedes the long-lived API token.
#[derive(Default)]
struct Credentials {
    api_token: Option<SecretString>,
    session_token: Option<SecretString>,
}

impl Credentials {
    fn bearer(&self) -> Option<String> {
        self.session_token
            .as_ref()
            .or(self.api_token.as_ref())
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }
}

/// Shared HTTP execution pipeline for all resource calls
pub struct Transport {
    base_url: String,
    api_version: String,
    timeout: Duration,
    credentials: RwLock<Credentials>,
    conn: Mutex<Option<Arc<dyn Connection>>>,
    factory: ConnectionFactory,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Create a transport bound to `base_url`
    ///
    /// Trailing slashes on the base URL are trimmed so path joining is
    /// unambiguous.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        api_token: Option<SecretString>,
        session_token: Option<SecretString>,
        user_agent_suffix: Option<String>,
    ) -> Self {
        let factory = default_factory(timeout, user_agent_suffix);
        Self::with_factory(base_url, timeout, api_token, session_token, factory)
    }

    fn with_factory(
        base_url: impl Into<String>,
        timeout: Duration,
        api_token: Option<SecretString>,
        session_token: Option<SecretString>,
        factory: ConnectionFactory,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_version: crate::API_VERSION.to_string(),
            timeout,
            credentials: RwLock::new(Credentials {
                api_token,
                session_token,
            }),
            conn: Mutex::new(None),
            factory,
        }
    }

    /// Create a transport with an injected connection (test seam)
    #[cfg(test)]
    pub(crate) fn with_connection(
        base_url: impl Into<String>,
        connection: Arc<dyn Connection>,
    ) -> Self {
        Self::with_factory(
            base_url,
            Duration::from_secs(30),
            None,
            None,
            Box::new(move || Ok(Arc::clone(&connection))),
        )
    }

    /// The configured base URL (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replace the long-lived API token
    pub fn set_api_token(&self, token: Option<SecretString>) {
        self.write_credentials().api_token = token;
    }

    /// Set or clear the session token obtained via login
    ///
    /// A set session token supersedes the API token for the derived
    /// `Authorization` header; clearing it reverts to the API token (or to no
    /// header at all).
    pub fn set_session_token(&self, token: Option<SecretString>) {
        self.write_credentials().session_token = token;
    }

    /// The current session token, if any
    pub fn session_token(&self) -> Option<SecretString> {
        self.read_credentials().session_token.clone()
    }

    /// The derived `Authorization` header value
    ///
    /// Recomputed from the credentials on every call, so it can never be
    /// stale relative to the last mutation.
    pub fn auth_header(&self) -> Option<String> {
        self.read_credentials().bearer()
    }

    /// Issue a GET request
    pub async fn get(&self, path: &str, opts: RequestOptions) -> Result<Response> {
        self.request(Method::GET, path, opts).await
    }

    /// Issue a POST request
    pub async fn post(&self, path: &str, opts: RequestOptions) -> Result<Response> {
        self.request(Method::POST, path, opts).await
    }

    /// Issue a PATCH request
    pub async fn patch(&self, path: &str, opts: RequestOptions) -> Result<Response> {
        self.request(Method::PATCH, path, opts).await
    }

    /// Issue a DELETE request
    pub async fn delete(&self, path: &str, opts: RequestOptions) -> Result<Response> {
        self.request(Method::DELETE, path, opts).await
    }

    /// Execute a request against the API and classify the response
    ///
    /// `path` is relative to the versioned API root; a missing leading slash
    /// is normalized away, so `"projects"` and `"/projects"` hit the same
    /// URL. Returns the raw response on 2xx, a classified [`Error`]
    /// otherwise.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        opts: RequestOptions,
    ) -> Result<Response> {
        let conn = self.connection().await?;
        let request = self.build_request(method, path, opts)?;

        trace!(url = %request.url(), method = %request.method(), "sending request");
        let response = conn.send(request).await?;
        self.ensure_success(response).await
    }

    /// Release the underlying connection
    ///
    /// Idempotent: closing an already-closed transport is a no-op. The next
    /// request re-initializes a fresh connection.
    pub async fn close(&self) {
        let mut slot = self.conn.lock().await;
        if slot.take().is_some() {
            debug!("transport connection released");
        }
    }

    /// Get the live connection, lazily creating it on first use
    async fn connection(&self) -> Result<Arc<dyn Connection>> {
        let mut slot = self.conn.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(Arc::clone(conn));
        }

        // Factory runs synchronously under the lock: no await between build
        // and store, so cancellation cannot cache a partial connection.
        let conn = (self.factory)()?;
        *slot = Some(Arc::clone(&conn));
        debug!(base_url = %self.base_url, "transport connection initialized");
        Ok(conn)
    }

    /// Build the absolute URL for a relative API path
    fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<reqwest::Url> {
        let normalized = format!("/{}", path.trim_start_matches('/'));
        let full = format!(
            "{}/api/{}{}",
            self.base_url, self.api_version, normalized
        );

        let mut url = reqwest::Url::parse(&full)
            .map_err(|e| Error::Config(format!("Invalid request URL {}: {}", full, e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            let _ = pairs.extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    fn build_request(&self, method: Method, path: &str, opts: RequestOptions) -> Result<Request> {
        let url = self.build_url(path, &opts.query)?;
        let mut request = Request::new(method, url);

        let headers = request.headers_mut();
        let request_id = generate_request_id();
        let _ = headers.insert(
            "X-Request-ID",
            request_id
                .parse()
                .map_err(|_| Error::Other("Invalid request ID header".to_string()))?,
        );

        if let Some(bearer) = self.auth_header() {
            let value = bearer
                .parse()
                .map_err(|_| Error::Config("Auth token contains invalid header characters".to_string()))?;
            let _ = headers.insert(header::AUTHORIZATION, value);
        }

        if let Some(extra) = opts.headers {
            for (name, value) in extra.iter() {
                let _ = headers.insert(name, value.clone());
            }
        }

        if let Some(json) = opts.json {
            let body = serde_json::to_vec(&json)?;
            let _ = headers.insert(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("application/json"),
            );
            *request.body_mut() = Some(body.into());
        }

        Ok(request)
    }

    /// Classify a completed exchange
    ///
    /// 2xx responses pass through untouched. Anything else is turned into the
    /// [`ApiError`] variant keyed by status code, carrying the `detail`
    /// string from the JSON body when the body parses, falling back to the
    /// raw text. For 429, the `Retry-After` header is attached as integer
    /// seconds when present and parseable; a malformed header is treated as
    /// absent rather than failing classification.
    async fn ensure_success(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let retry_after = parse_retry_after(response.headers());
        let body = response.text().await.unwrap_or_default();

        let detail = match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => value
                .get("detail")
                .and_then(|d| d.as_str())
                .map(|d| d.to_string()),
            Err(_) if !body.is_empty() => Some(body),
            Err(_) => None,
        };

        let err = ApiError::from_status(status_code, detail, retry_after);
        debug!(status = status_code, error = %err, "request failed");
        Err(Error::Api(err))
    }

    fn read_credentials(&self) -> std::sync::RwLockReadGuard<'_, Credentials> {
        self.credentials.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_credentials(&self) -> std::sync::RwLockWriteGuard<'_, Credentials> {
        self.credentials.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Build the default reqwest-backed connection factory
fn default_factory(timeout: Duration, user_agent_suffix: Option<String>) -> ConnectionFactory {
    Box::new(move || {
        let user_agent = match &user_agent_suffix {
            Some(suffix) => format!("{}/{} {}", USER_AGENT_PREFIX, crate::VERSION, suffix),
            None => format!("{}/{}", USER_AGENT_PREFIX, crate::VERSION),
        };

        let client = HttpClient::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Arc::new(ReqwestConnection { inner: client }) as Arc<dyn Connection>)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex as StdMutex;

    /// Test double satisfying [`Connection`] without any network
    struct MockConnection {
        responses: StdMutex<VecDeque<http::Response<String>>>,
        seen: StdMutex<Vec<(Method, String, http::HeaderMap)>>,
    }

    impl MockConnection {
        fn new(responses: Vec<http::Response<String>>) -> Arc<Self> {
            Arc::new(Self {
                responses: StdMutex::new(responses.into_iter().collect()),
                seen: StdMutex::new(Vec::new()),
            })
        }

        fn ok_json(body: &str) -> http::Response<String> {
            http::Response::builder()
                .status(200)
                .body(body.to_string())
                .unwrap()
        }

        fn seen_urls(&self) -> Vec<String> {
            self.seen
                .lock()
                .unwrap()
                .iter()
                .map(|(_, url, _)| url.clone())
                .collect()
        }
    }

    #[async_trait]
    impl Connection for MockConnection {
        async fn send(&self, request: Request) -> Result<Response> {
            self.seen.lock().unwrap().push((
                request.method().clone(),
                request.url().to_string(),
                request.headers().clone(),
            ));
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| MockConnection::ok_json("{}"));
            Ok(Response::from(next))
        }
    }

    fn transport_with(conn: Arc<MockConnection>) -> Transport {
        Transport::with_connection("https://api.test.com", conn)
    }

    #[tokio::test]
    async fn test_path_normalization() {
        let conn = MockConnection::new(vec![
            MockConnection::ok_json("{}"),
            MockConnection::ok_json("{}"),
        ]);
        let transport = transport_with(Arc::clone(&conn));

        let _ = transport
            .get("test", RequestOptions::default())
            .await
            .unwrap();
        let _ = transport
            .get("/test", RequestOptions::default())
            .await
            .unwrap();

        let urls = conn.seen_urls();
        assert_eq!(urls[0], "https://api.test.com/api/v1/test");
        assert_eq!(urls[0], urls[1]);
    }

    #[tokio::test]
    async fn test_query_params_appended() {
        let conn = MockConnection::new(vec![MockConnection::ok_json("{}")]);
        let transport = transport_with(Arc::clone(&conn));

        let opts = RequestOptions {
            query: vec![
                ("page".to_string(), "1".to_string()),
                ("page_size".to_string(), "50".to_string()),
            ],
            ..Default::default()
        };
        let _ = transport.get("/projects", opts).await.unwrap();

        assert_eq!(
            conn.seen_urls()[0],
            "https://api.test.com/api/v1/projects?page=1&page_size=50"
        );
    }

    #[tokio::test]
    async fn test_auth_header_precedence() {
        let transport = Transport::with_connection(
            "https://api.test.com",
            MockConnection::new(vec![]),
        );
        assert_eq!(transport.auth_header(), None);

        transport.set_api_token(Some(SecretString::new("api-token".to_string())));
        assert_eq!(transport.auth_header(), Some("Bearer api-token".to_string()));

        // Session token supersedes the API token
        transport.set_session_token(Some(SecretString::new("jwt-token".to_string())));
        assert_eq!(transport.auth_header(), Some("Bearer jwt-token".to_string()));

        // Clearing reverts to the API token
        transport.set_session_token(None);
        assert_eq!(transport.auth_header(), Some("Bearer api-token".to_string()));

        transport.set_api_token(None);
        assert_eq!(transport.auth_header(), None);
    }

    #[tokio::test]
    async fn test_auth_header_sent_on_request() {
        let conn = MockConnection::new(vec![MockConnection::ok_json("{}")]);
        let transport = transport_with(Arc::clone(&conn));
        transport.set_api_token(Some(SecretString::new("test-token".to_string())));

        let _ = transport.get("/test", RequestOptions::default()).await.unwrap();

        let seen = conn.seen.lock().unwrap();
        let headers = &seen[0].2;
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer test-token"
        );
        assert!(headers.contains_key("X-Request-ID"));
    }

    #[tokio::test]
    async fn test_no_auth_header_without_credentials() {
        let conn = MockConnection::new(vec![MockConnection::ok_json("{}")]);
        let transport = transport_with(Arc::clone(&conn));

        let _ = transport.get("/test", RequestOptions::default()).await.unwrap();

        let seen = conn.seen.lock().unwrap();
        assert!(!seen[0].2.contains_key(header::AUTHORIZATION));
    }

    #[tokio::test]
    async fn test_classification_json_detail() {
        let response = http::Response::builder()
            .status(401)
            .body(r#"{"detail": "Invalid token"}"#.to_string())
            .unwrap();
        let conn = MockConnection::new(vec![response]);
        let transport = transport_with(conn);

        let err = transport
            .get("/test", RequestOptions::default())
            .await
            .unwrap_err();
        match err {
            Error::Api(ApiError::Authentication { status, detail, .. }) => {
                assert_eq!(status, 401);
                assert_eq!(detail.as_deref(), Some("Invalid token"));
            }
            other => panic!("expected authentication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_classification_plain_text_body() {
        let response = http::Response::builder()
            .status(500)
            .body("upstream exploded".to_string())
            .unwrap();
        let transport = transport_with(MockConnection::new(vec![response]));

        let err = transport
            .get("/test", RequestOptions::default())
            .await
            .unwrap_err();
        match err {
            Error::Api(ApiError::Server { status, detail, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(detail.as_deref(), Some("upstream exploded"));
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_classification_retry_after() {
        let response = http::Response::builder()
            .status(429)
            .header("Retry-After", "60")
            .body(r#"{"detail": "Rate limit exceeded"}"#.to_string())
            .unwrap();
        let transport = transport_with(MockConnection::new(vec![response]));

        let err = transport
            .get("/test", RequestOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.retry_after(), Some(60));

        // Malformed header must not fail classification
        let response = http::Response::builder()
            .status(429)
            .header("Retry-After", "whenever")
            .body(String::new())
            .unwrap();
        let transport = transport_with(MockConnection::new(vec![response]));
        let err = transport
            .get("/test", RequestOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(429));
        assert_eq!(err.retry_after(), None);
    }

    #[tokio::test]
    async fn test_close_idempotent_and_reinitializing() {
        let connects = Arc::new(AtomicU32::new(0));
        let connects_clone = Arc::clone(&connects);
        let transport = Transport::with_factory(
            "https://api.test.com",
            Duration::from_secs(30),
            None,
            None,
            Box::new(move || {
                let _ = connects_clone.fetch_add(1, Ordering::SeqCst);
                Ok(MockConnection::new(vec![]) as Arc<dyn Connection>)
            }),
        );

        // close before any request is a no-op
        transport.close().await;
        assert_eq!(connects.load(Ordering::SeqCst), 0);

        let _ = transport.get("/a", RequestOptions::default()).await.unwrap();
        let _ = transport.get("/b", RequestOptions::default()).await.unwrap();
        assert_eq!(connects.load(Ordering::SeqCst), 1);

        transport.close().await;
        transport.close().await;

        // next use re-initializes instead of failing
        let _ = transport.get("/c", RequestOptions::default()).await.unwrap();
        assert_eq!(connects.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_json_body_and_content_type() {
        let conn = MockConnection::new(vec![MockConnection::ok_json("{}")]);
        let transport = transport_with(Arc::clone(&conn));

        let opts = RequestOptions {
            json: Some(serde_json::json!({"name": "test"})),
            ..Default::default()
        };
        let _ = transport.post("/projects", opts).await.unwrap();

        let seen = conn.seen.lock().unwrap();
        assert_eq!(seen[0].0, Method::POST);
        assert_eq!(
            seen[0].2.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
