use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header::ACCEPT};
use axum::routing::get;
use kg_core::{ClientConfig, KnowledgeGraphClient};
use reqwest::Url;

/// Request observed by the fake upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub query: Option<String>,
    pub accept: Option<String>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        let url = Url::parse(&format!("http://fake/?{query}")).expect("valid recorded query");
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

#[derive(Clone)]
struct UpstreamState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<RecordedRequest>>>,
}

/// Local stand-in for the Knowledge Graph Search API serving one canned reply.
pub struct FakeUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<RecordedRequest>>>,
}

impl FakeUpstream {
    pub async fn spawn(status: StatusCode, body: &'static str) -> Self {
        Self::spawn_delayed(status, body, Duration::ZERO).await
    }

    /// Like [`Self::spawn`], but waits `delay` before answering each request.
    pub async fn spawn_delayed(status: StatusCode, body: &'static str, delay: Duration) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None));
        let state = UpstreamState {
            status,
            body,
            delay,
            hits: hits.clone(),
            last: last.clone(),
        };
        let app = Router::new()
            .route("/v1/entities", get(handle))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind fake upstream");
        let addr = listener.local_addr().expect("fake upstream address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("fake upstream stopped");
        });

        Self { addr, hits, last }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/v1/entities", self.addr)).expect("valid fake upstream URL")
    }

    pub fn client(&self) -> KnowledgeGraphClient {
        self.client_with_timeout(None)
    }

    pub fn client_with_timeout(&self, timeout: Option<Duration>) -> KnowledgeGraphClient {
        let config = ClientConfig::new("test-key")
            .with_base_url(self.base_url())
            .with_request_timeout(timeout);
        KnowledgeGraphClient::new(config).expect("client should build")
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.last
            .lock()
            .expect("recorded request lock")
            .clone()
            .expect("fake upstream saw no request")
    }
}

async fn handle(
    State(state): State<UpstreamState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, &'static str) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    let accept = headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    *state.last.lock().expect("recorded request lock") = Some(RecordedRequest { query, accept });
    (state.status, state.body)
}
