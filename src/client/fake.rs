use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use url::Url;

use super::{BoxError, BoxFuture, HttpRequest, HttpResponse, HttpTransport, SendPulseClient};
use crate::domain::{AccessToken, Credentials};
use crate::store::TokenStore;

/// Records every request and answers with scripted responses in order.
///
/// When the script runs out, requests fail like a dropped connection.
#[derive(Debug, Clone, Default)]
pub(super) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug, Default)]
struct FakeTransportState {
    requests: Vec<HttpRequest>,
    responses: VecDeque<HttpResponse>,
}

impl FakeTransport {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(HttpResponse {
                status,
                body: body.into(),
            });
        self
    }

    pub(super) fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl HttpTransport for FakeTransport {
    fn execute<'a>(
        &'a self,
        request: &'a HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request.clone());
            state
                .responses
                .pop_front()
                .ok_or_else(|| BoxError::from("connection reset by fake transport"))
        })
    }
}

/// In-memory token store that can also be told to fail on save.
#[derive(Debug, Clone, Default)]
pub(super) struct MemoryTokenStore {
    tokens: Arc<Mutex<HashMap<String, AccessToken>>>,
    saves: Arc<AtomicUsize>,
    fail_saves: bool,
}

impl MemoryTokenStore {
    pub(super) fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub(super) fn insert(&self, fingerprint: &str, token: &str) {
        self.tokens
            .lock()
            .unwrap()
            .insert(fingerprint.to_owned(), AccessToken::new(token).unwrap());
    }

    pub(super) fn get(&self, fingerprint: &str) -> Option<String> {
        self.tokens
            .lock()
            .unwrap()
            .get(fingerprint)
            .map(|token| token.as_str().to_owned())
    }

    pub(super) fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self, fingerprint: &str) -> io::Result<Option<AccessToken>> {
        Ok(self.tokens.lock().unwrap().get(fingerprint).cloned())
    }

    fn save(&self, fingerprint: &str, token: &AccessToken) -> io::Result<()> {
        if self.fail_saves {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .lock()
            .unwrap()
            .insert(fingerprint.to_owned(), token.clone());
        Ok(())
    }
}

pub(super) fn test_credentials() -> Credentials {
    Credentials::new("client-id", "client-secret").unwrap()
}

pub(super) fn make_client(
    transport: FakeTransport,
    store: impl TokenStore + 'static,
) -> SendPulseClient {
    SendPulseClient::from_parts(
        test_credentials(),
        Url::parse("https://example.invalid/api/").unwrap(),
        Arc::new(store),
        Arc::new(transport),
    )
}

/// Client that already holds a token, for resource method tests.
pub(super) fn authorized_client(transport: FakeTransport) -> SendPulseClient {
    let client = make_client(transport, MemoryTokenStore::default());
    client.set_access_token(AccessToken::new("tok").unwrap());
    client
}
