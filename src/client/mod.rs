//! Client layer: token lifecycle, request dispatch, and transport ↔ domain mapping.
//!
//! Every API call goes through [`SendPulseClient::send`], which attaches the bearer token
//! and, when the API answers `401` for an expired token, fetches a new token and replays
//! the request once.

mod address_books;
mod balance;
mod campaigns;
#[cfg(test)]
mod fake;
mod sms;
mod smtp;

use std::error::Error as StdError;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::domain::{AccessToken, Credentials, HttpMethod, ValidationError};
use crate::store::{FileTokenStore, TokenStore};
use crate::transport::{self, TransportError};

const DEFAULT_BASE_URL: &str = "https://api.sendpulse.com/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_TOKEN_DIR: &str = "tokens";
const TOKEN_PATH: &str = "oauth/access_token";
const UNAUTHORIZED: u16 = 401;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: Url,
    bearer: Option<String>,
    body: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(reqwest_method(request.method), request.url.clone())
                .header(reqwest::header::CONTENT_TYPE, "application/json");
            if let Some(token) = &request.bearer {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = &request.body {
                builder = builder.body(body.clone());
            }
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[derive(Debug, thiserror::Error)]
/// Failures while obtaining or persisting an access token.
pub enum AuthError {
    /// The token request did not complete (DNS, TLS, timeouts, etc).
    #[error("token request failed: {0}")]
    Request(#[source] BoxError),

    /// The token endpoint answered with something other than a token.
    #[error("token response could not be decoded: {0}")]
    Decode(#[source] BoxError),

    /// The token store could not be prepared or written.
    #[error("token storage failed: {0}")]
    Storage(#[source] std::io::Error),

    /// The API rejected a request again right after a token refresh.
    #[error("refreshed access token was rejected")]
    RefreshRejected,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SendPulseClient`].
///
/// Non-2xx statuses other than `401` are not errors at this layer: raw calls return the
/// body, typed calls surface [`SendPulseError::Decode`] when the body is not the
/// expected shape.
pub enum SendPulseError {
    /// A required argument was missing or zero; nothing was sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The API rejected the client id / secret pair.
    #[error("invalid client credentials: {}", .message.as_deref().unwrap_or("rejected by the API"))]
    Credentials { message: Option<String> },

    /// Token could not be obtained, stored, or was rejected after a refresh.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Response body could not be parsed as the expected format.
    #[error("decode error: {0}")]
    Decode(#[source] BoxError),

    /// Request payload could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] BoxError),
}

fn encode_error(err: TransportError) -> SendPulseError {
    SendPulseError::Encode(Box::new(err))
}

fn decode_error(err: TransportError) -> SendPulseError {
    SendPulseError::Decode(Box::new(err))
}

fn credentials_error(body: &str) -> SendPulseError {
    SendPulseError::Credentials {
        message: transport::decode_error_body(body).and_then(|parsed| parsed.message),
    }
}

fn parse_base_url(input: &str) -> Result<Url, ValidationError> {
    let invalid = || ValidationError::InvalidUrl {
        input: input.to_owned(),
    };
    let mut url = Url::parse(input).map_err(|_| invalid())?;
    if url.cannot_be_a_base() {
        return Err(invalid());
    }
    // `Url::join` replaces the last segment unless the base ends with `/`.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[derive(Clone)]
/// Builder for [`SendPulseClient`].
///
/// Use this when you need to customize the base URL, timeout, user-agent, or where
/// tokens are cached.
pub struct SendPulseClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    token_dir: PathBuf,
    token_store: Option<Arc<dyn TokenStore>>,
}

impl SendPulseClientBuilder {
    /// Create a builder with the default base URL, a 30 second timeout, and a
    /// [`FileTokenStore`] in `./tokens`.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            token_dir: PathBuf::from(DEFAULT_TOKEN_DIR),
            token_store: None,
        }
    }

    /// Override the API base URL (`https://api.sendpulse.com/`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout applied to each HTTP request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Cache tokens as files in `dir`. Ignored when [`Self::token_store`] is set.
    pub fn token_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.token_dir = dir.into();
        self
    }

    /// Use a custom token store instead of files.
    pub fn token_store(mut self, store: impl TokenStore + 'static) -> Self {
        self.token_store = Some(Arc::new(store));
        self
    }

    /// Build a [`SendPulseClient`]. No request is sent; call [`SendPulseClient::init`].
    pub fn build(self) -> Result<SendPulseClient, SendPulseError> {
        let base_url = parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| SendPulseError::Transport(Box::new(err)))?;

        let token_store = self
            .token_store
            .unwrap_or_else(|| Arc::new(FileTokenStore::new(self.token_dir)));

        Ok(SendPulseClient::from_parts(
            self.credentials,
            base_url,
            token_store,
            Arc::new(ReqwestTransport { client }),
        ))
    }
}

#[derive(Clone)]
/// High-level SendPulse client.
///
/// Clones share the current access token. The token file is not locked: two
/// processes (or two concurrent refreshes on one client) using the same credentials may
/// both request a token, and the last write to the store wins.
pub struct SendPulseClient {
    credentials: Credentials,
    fingerprint: String,
    base_url: Url,
    token_store: Arc<dyn TokenStore>,
    token: Arc<RwLock<Option<AccessToken>>>,
    http: Arc<dyn HttpTransport>,
}

impl SendPulseClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`SendPulseClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, SendPulseError> {
        SendPulseClientBuilder::new(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SendPulseClientBuilder {
        SendPulseClientBuilder::new(credentials)
    }

    /// Build a client caching tokens in `token_dir` and run [`SendPulseClient::init`].
    pub async fn connect(
        credentials: Credentials,
        token_dir: impl Into<PathBuf>,
    ) -> Result<Self, SendPulseError> {
        let client = Self::builder(credentials).token_dir(token_dir).build()?;
        client.init().await?;
        Ok(client)
    }

    fn from_parts(
        credentials: Credentials,
        base_url: Url,
        token_store: Arc<dyn TokenStore>,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        let fingerprint = token_store.fingerprint(&credentials);
        Self {
            credentials,
            fingerprint,
            base_url,
            token_store,
            token: Arc::new(RwLock::new(None)),
            http,
        }
    }

    /// Key identifying this client's credentials in the token store.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// The token currently attached to requests, if any.
    pub fn access_token(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_access_token(&self, token: AccessToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Prepare the token store and load the cached token.
    ///
    /// A non-empty cached token is adopted without any network call. Otherwise a new
    /// token is requested and persisted.
    pub async fn init(&self) -> Result<(), SendPulseError> {
        self.token_store.prepare().map_err(AuthError::Storage)?;

        match self.token_store.load(&self.fingerprint) {
            Ok(Some(token)) => {
                tracing::debug!(fingerprint = %self.fingerprint, "using cached access token");
                self.set_access_token(token);
                return Ok(());
            }
            Ok(None) => {
                tracing::debug!(fingerprint = %self.fingerprint, "no cached access token");
            }
            Err(err) => {
                tracing::warn!(
                    fingerprint = %self.fingerprint,
                    error = %err,
                    "cached access token is unreadable, requesting a new one"
                );
            }
        }

        self.refresh_token().await?;
        Ok(())
    }

    /// Request a new token with the client-credentials grant and persist it.
    ///
    /// Errors:
    /// - [`SendPulseError::Credentials`] when the API rejects the client id / secret,
    /// - [`SendPulseError::Auth`] for transport, decode, or storage failures.
    pub async fn refresh_token(&self) -> Result<AccessToken, SendPulseError> {
        let payload = transport::encode_token_request(&self.credentials).map_err(encode_error)?;
        let request = self.build_request(HttpMethod::Post, TOKEN_PATH, Some(&payload))?;

        tracing::debug!(url = %request.url, "requesting access token");
        let response = self
            .http
            .execute(&request)
            .await
            .map_err(AuthError::Request)?;

        if response.status == UNAUTHORIZED && transport::is_invalid_client(&response.body) {
            return Err(credentials_error(&response.body));
        }

        let token = transport::decode_token_response(&response.body)
            .map_err(|err| AuthError::Decode(Box::new(err)))?;

        self.set_access_token(token.clone());
        self.token_store
            .save(&self.fingerprint, &token)
            .map_err(AuthError::Storage)?;

        tracing::info!(fingerprint = %self.fingerprint, "obtained new access token");
        Ok(token)
    }

    /// Send one API call and return the raw response body.
    ///
    /// `payload` is sent as a JSON body, except for `GET` where the fields of a JSON
    /// object become query parameters. With `requires_auth` the current token is
    /// attached as `Authorization: Bearer ...`; without it no token is ever sent.
    ///
    /// On `401` the body is checked for `invalid_client` ([`SendPulseError::Credentials`],
    /// no retry). Otherwise an authenticated call refreshes the token and is replayed
    /// once; a second `401` fails with [`AuthError::RefreshRejected`]. Any other status
    /// is returned as-is.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&Value>,
        requires_auth: bool,
    ) -> Result<String, SendPulseError> {
        let mut request = self.build_request(method, path, payload)?;
        if requires_auth {
            request.bearer = self.access_token().map(|token| token.as_str().to_owned());
        }

        let response = self.execute(&request).await?;
        if response.status != UNAUTHORIZED {
            return Ok(response.body);
        }
        if transport::is_invalid_client(&response.body) {
            return Err(credentials_error(&response.body));
        }
        if !requires_auth {
            return Ok(response.body);
        }

        tracing::info!(path, "access token rejected, requesting a new one");
        let token = self.refresh_token().await?;
        request.bearer = Some(token.as_str().to_owned());

        let retried = self.execute(&request).await?;
        if retried.status != UNAUTHORIZED {
            return Ok(retried.body);
        }
        if transport::is_invalid_client(&retried.body) {
            return Err(credentials_error(&retried.body));
        }
        Err(AuthError::RefreshRejected.into())
    }

    /// Send an authenticated request to an arbitrary path.
    ///
    /// `method` must be one of `POST`, `GET`, `DELETE`, `PUT`, `PATCH`; anything else is
    /// rejected with [`ValidationError::MethodNotAllowed`] before sending.
    pub async fn send_raw_request(
        &self,
        path: &str,
        method: &str,
        payload: Option<&Value>,
    ) -> Result<String, SendPulseError> {
        let method = method.parse::<HttpMethod>()?;
        self.send(method, path, payload, true).await
    }

    /// Relative path built from segments; each segment is percent-encoded on its own.
    fn segment_path(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.path()
            .strip_prefix(self.base_url.path())
            .unwrap_or(url.path())
            .to_owned()
    }

    fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<HttpRequest, SendPulseError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| ValidationError::InvalidUrl {
                input: path.to_owned(),
            })?;

        let mut body = None;
        match (method, payload) {
            (HttpMethod::Get, Some(Value::Object(fields))) => {
                if !fields.is_empty() {
                    let mut pairs = url.query_pairs_mut();
                    for (key, value) in fields {
                        match value {
                            Value::Null => {}
                            Value::String(text) => {
                                pairs.append_pair(key, text);
                            }
                            other => {
                                pairs.append_pair(key, &other.to_string());
                            }
                        }
                    }
                }
            }
            (_, Some(payload)) => {
                body = Some(
                    serde_json::to_vec(payload)
                        .map_err(|err| SendPulseError::Encode(Box::new(err)))?,
                );
            }
            (_, None) => {}
        }

        Ok(HttpRequest {
            method,
            url,
            bearer: None,
            body,
        })
    }

    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, SendPulseError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self
            .http
            .execute(request)
            .await
            .map_err(SendPulseError::Transport)?;
        tracing::debug!(status = response.status, "received response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::fake::{FakeTransport, MemoryTokenStore, make_client, test_credentials};
    use super::*;

    fn body_json(request: &HttpRequest) -> Value {
        serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn init_adopts_cached_token_without_requests() {
        let transport = FakeTransport::new();
        let store = MemoryTokenStore::default();
        let fingerprint = crate::store::credentials_fingerprint(&test_credentials());
        store.insert(&fingerprint, "cached-token");
        let client = make_client(transport.clone(), store);

        client.init().await.unwrap();

        assert!(transport.requests().is_empty());
        assert_eq!(client.access_token().unwrap().as_str(), "cached-token");
    }

    #[tokio::test]
    async fn init_fetches_and_persists_token_when_cache_is_empty() {
        let transport = FakeTransport::new().respond(200, r#"{"access_token": "fresh"}"#);
        let store = MemoryTokenStore::default();
        let client = make_client(transport.clone(), store.clone());

        client.init().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.url.as_str(),
            "https://example.invalid/api/oauth/access_token"
        );
        assert_eq!(request.bearer, None);
        assert_eq!(
            body_json(request),
            json!({
                "grant_type": "client_credentials",
                "client_id": "client-id",
                "client_secret": "client-secret",
            })
        );
        assert_eq!(store.get(client.fingerprint()).as_deref(), Some("fresh"));
        assert_eq!(client.access_token().unwrap().as_str(), "fresh");
    }

    #[tokio::test]
    async fn init_writes_token_file_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let token_dir = dir.path().join("tokens");
        let transport = FakeTransport::new().respond(200, r#"{"access_token": "tok/+=="}"#);
        let store = FileTokenStore::new(&token_dir);
        let client = make_client(transport.clone(), store.clone());

        client.init().await.unwrap();

        let written = std::fs::read_to_string(store.path_for(client.fingerprint())).unwrap();
        assert_eq!(written, "tok/+==");

        let second_transport = FakeTransport::new();
        let second = make_client(second_transport.clone(), FileTokenStore::new(&token_dir));
        second.init().await.unwrap();
        assert!(second_transport.requests().is_empty());
        assert_eq!(second.access_token().unwrap().as_str(), "tok/+==");
    }

    #[tokio::test]
    async fn init_maps_bad_token_response_to_auth_error() {
        let transport = FakeTransport::new().respond(200, "<html>oops</html>");
        let store = MemoryTokenStore::default();
        let client = make_client(transport, store.clone());

        let err = client.init().await.unwrap_err();
        assert!(matches!(err, SendPulseError::Auth(AuthError::Decode(_))));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn init_maps_transport_failure_to_auth_error() {
        let transport = FakeTransport::new();
        let client = make_client(transport, MemoryTokenStore::default());

        let err = client.init().await.unwrap_err();
        assert!(matches!(err, SendPulseError::Auth(AuthError::Request(_))));
    }

    #[tokio::test]
    async fn init_maps_storage_failure_to_auth_error() {
        let transport = FakeTransport::new().respond(200, r#"{"access_token": "fresh"}"#);
        let client = make_client(transport, MemoryTokenStore::failing());

        let err = client.init().await.unwrap_err();
        assert!(matches!(err, SendPulseError::Auth(AuthError::Storage(_))));
    }

    #[tokio::test]
    async fn init_reports_rejected_credentials() {
        let transport = FakeTransport::new().respond(
            401,
            r#"{"error": "invalid_client", "message": "Client authentication failed."}"#,
        );
        let client = make_client(transport.clone(), MemoryTokenStore::default());

        let err = client.init().await.unwrap_err();
        match err {
            SendPulseError::Credentials { message } => {
                assert_eq!(message.as_deref(), Some("Client authentication failed."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn send_without_auth_never_attaches_token() {
        let transport = FakeTransport::new().respond(200, "{}");
        let client = make_client(transport.clone(), MemoryTokenStore::default());
        client.set_access_token(AccessToken::new("present").unwrap());

        let body = client
            .send(HttpMethod::Post, "ping", Some(&json!({"a": 1})), false)
            .await
            .unwrap();

        assert_eq!(body, "{}");
        let requests = transport.requests();
        assert_eq!(requests[0].bearer, None);
        assert_eq!(body_json(&requests[0]), json!({"a": 1}));
    }

    #[tokio::test]
    async fn send_attaches_current_token() {
        let transport = FakeTransport::new().respond(200, "[]");
        let client = make_client(transport.clone(), MemoryTokenStore::default());
        client.set_access_token(AccessToken::new("present").unwrap());

        client
            .send(HttpMethod::Delete, "/addressbooks/1", None, true)
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].bearer.as_deref(), Some("present"));
        assert_eq!(
            requests[0].url.as_str(),
            "https://example.invalid/api/addressbooks/1"
        );
        assert_eq!(requests[0].body, None);
    }

    #[tokio::test]
    async fn send_fails_on_invalid_client_without_refresh() {
        let transport = FakeTransport::new()
            .respond(401, r#"{"error": "invalid_client"}"#)
            .respond(200, r#"{"access_token": "unused"}"#);
        let store = MemoryTokenStore::default();
        let client = make_client(transport.clone(), store.clone());
        client.set_access_token(AccessToken::new("old").unwrap());

        let err = client
            .send(HttpMethod::Get, "balance", None, true)
            .await
            .unwrap_err();

        assert!(matches!(err, SendPulseError::Credentials { message: None }));
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn send_refreshes_once_and_replays_request() {
        let transport = FakeTransport::new()
            .respond(401, r#"{"error": "invalid_token"}"#)
            .respond(200, r#"{"access_token": "new"}"#)
            .respond(200, r#"{"result": true}"#);
        let store = MemoryTokenStore::default();
        let client = make_client(transport.clone(), store.clone());
        client.set_access_token(AccessToken::new("old").unwrap());

        let body = client
            .send(HttpMethod::Post, "addressbooks", Some(&json!({"bookName": "b"})), true)
            .await
            .unwrap();

        assert_eq!(body, r#"{"result": true}"#);
        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].bearer.as_deref(), Some("old"));
        assert!(requests[1].url.as_str().ends_with("/oauth/access_token"));
        assert_eq!(requests[2].bearer.as_deref(), Some("new"));
        assert_eq!(requests[2].url, requests[0].url);
        assert_eq!(requests[2].body, requests[0].body);
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.get(client.fingerprint()).as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn send_stops_after_refreshed_token_is_rejected() {
        let transport = FakeTransport::new()
            .respond(401, "expired")
            .respond(200, r#"{"access_token": "new"}"#)
            .respond(401, "expired again")
            .respond(200, r#"{"access_token": "never"}"#);
        let client = make_client(transport.clone(), MemoryTokenStore::default());

        let err = client
            .send(HttpMethod::Get, "balance", None, true)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SendPulseError::Auth(AuthError::RefreshRejected)
        ));
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn send_returns_other_statuses_uninterpreted() {
        let transport = FakeTransport::new().respond(500, "server down");
        let client = make_client(transport.clone(), MemoryTokenStore::default());

        let body = client
            .send(HttpMethod::Get, "balance", None, true)
            .await
            .unwrap();

        assert_eq!(body, "server down");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn send_does_not_retry_transport_failures() {
        let transport = FakeTransport::new();
        let client = make_client(transport.clone(), MemoryTokenStore::default());

        let err = client
            .send(HttpMethod::Get, "balance", None, true)
            .await
            .unwrap_err();

        assert!(matches!(err, SendPulseError::Transport(_)));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn unauthenticated_401_is_returned_without_refresh() {
        let transport = FakeTransport::new().respond(401, "nope");
        let client = make_client(transport.clone(), MemoryTokenStore::default());

        let body = client
            .send(HttpMethod::Get, "status", None, false)
            .await
            .unwrap();

        assert_eq!(body, "nope");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn get_payload_is_sent_as_query() {
        let transport = FakeTransport::new().respond(200, "[]");
        let client = make_client(transport.clone(), MemoryTokenStore::default());

        client
            .send(
                HttpMethod::Get,
                "smtp/emails",
                Some(&json!({"limit": 10, "sender": "a@b.c", "skip": null})),
                true,
            )
            .await
            .unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.body, None);
        assert_eq!(request.url.query(), Some("limit=10&sender=a%40b.c"));
    }

    #[tokio::test]
    async fn raw_request_rejects_methods_outside_allow_list() {
        let transport = FakeTransport::new().respond(200, "{}");
        let client = make_client(transport.clone(), MemoryTokenStore::default());

        let err = client
            .send_raw_request("addressbooks", "TRACE", None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SendPulseError::Validation(ValidationError::MethodNotAllowed { .. })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn raw_request_accepts_patch() {
        let transport = FakeTransport::new().respond(200, r#"{"ok": 1}"#);
        let client = make_client(transport.clone(), MemoryTokenStore::default());
        client.set_access_token(AccessToken::new("tok").unwrap());

        let body = client
            .send_raw_request("custom/path", "PATCH", Some(&json!({"x": true})))
            .await
            .unwrap();

        assert_eq!(body, r#"{"ok": 1}"#);
        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(request.bearer.as_deref(), Some("tok"));
        assert_eq!(body_json(request), json!({"x": true}));
    }

    #[tokio::test]
    async fn clones_share_the_refreshed_token() {
        let transport = FakeTransport::new().respond(200, r#"{"access_token": "shared"}"#);
        let client = make_client(transport, MemoryTokenStore::default());
        let clone = client.clone();

        client.refresh_token().await.unwrap();

        assert_eq!(clone.access_token().unwrap().as_str(), "shared");
    }

    #[test]
    fn segment_path_escapes_reserved_characters() {
        let client = make_client(FakeTransport::new(), MemoryTokenStore::default());
        assert_eq!(
            client.segment_path(&["addressbooks", "3", "emails", "a#b?c/d@example.com"]),
            "addressbooks/3/emails/a%23b%3Fc%2Fd@example.com"
        );
        assert_eq!(client.segment_path(&["balance"]), "balance");
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = parse_base_url("http://127.0.0.1:8080/v1").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v1/");
        assert_eq!(
            url.join("balance").unwrap().as_str(),
            "http://127.0.0.1:8080/v1/balance"
        );
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        assert!(parse_base_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn builder_uses_injected_store_fingerprint() {
        let client = SendPulseClient::builder(test_credentials())
            .base_url("https://example.invalid")
            .timeout(Duration::from_secs(5))
            .user_agent("tests")
            .token_store(MemoryTokenStore::default())
            .build()
            .unwrap();
        assert_eq!(client.base_url.as_str(), "https://example.invalid/");
        assert_eq!(
            client.fingerprint(),
            crate::store::credentials_fingerprint(&test_credentials())
        );
        assert!(client.access_token().is_none());
    }
}
