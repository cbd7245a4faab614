//! Fake collector webhook for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1 and records every `POST /hook` it receives. The response status
//! can be changed at runtime to simulate an unhealthy collector.
//!
//! # Example
//!
//! ```rust,no_run
//! let collector = FakeCollector::start().await.unwrap();
//! let config = Config::with_webhook_url(collector.url()).unwrap();
//! // ... deliver events ...
//! let payloads = collector.wait_for(1, Duration::from_secs(5)).await;
//! ```

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as the collector saw it.
#[derive(Debug, Clone)]
pub struct Received {
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

struct CollectorState {
    received: Mutex<Vec<Received>>,
    status: AtomicU16,
}

/// Handle to the running fake collector.
pub struct FakeCollector {
    addr: SocketAddr,
    state: Arc<CollectorState>,
}

impl FakeCollector {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(CollectorState {
            received: Mutex::new(Vec::new()),
            status: AtomicU16::new(200),
        });

        let app = Router::new()
            .route("/hook", post(ingest))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Webhook URL to configure the sink with.
    pub fn url(&self) -> String {
        format!("http://{}/hook", self.addr)
    }

    /// Status code returned for subsequent requests.
    pub fn respond_with(&self, status: u16) {
        self.state.status.store(status, Ordering::SeqCst);
    }

    pub async fn received(&self) -> Vec<Received> {
        self.state.received.lock().await.clone()
    }

    /// Bodies of all requests received so far.
    pub async fn payloads(&self) -> Vec<serde_json::Value> {
        self.received().await.into_iter().map(|r| r.body).collect()
    }

    /// Poll until at least `n` requests arrived or `timeout` elapsed.
    pub async fn wait_for(&self, n: usize, timeout: Duration) -> Vec<serde_json::Value> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let payloads = self.payloads().await;
            if payloads.len() >= n || tokio::time::Instant::now() >= deadline {
                return payloads;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

async fn ingest(
    State(state): State<Arc<CollectorState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

    state.received.lock().await.push(Received { content_type, body });
    StatusCode::from_u16(state.status.load(Ordering::SeqCst)).unwrap_or(StatusCode::OK)
}
