//! Axum-based mock refresh authority
//!
//! Each test gets its own server on an ephemeral port, so tests can run in
//! parallel without sharing recorded requests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const REFRESH_PATH: &str = "/api/auth/refresh";

/// What the mock answers and what it has seen.
#[derive(Clone)]
pub struct MockRefreshState {
    status: StatusCode,
    set_cookies: Vec<&'static str>,
    delay: Option<Duration>,
    /// `Cookie` header of every received request, `None` when absent
    received: Arc<Mutex<Vec<Option<String>>>>,
}

pub struct MockRefreshServer {
    pub url: String,
    state: MockRefreshState,
    handle: JoinHandle<()>,
}

impl MockRefreshServer {
    pub async fn start(status: StatusCode, set_cookies: &[&'static str]) -> Self {
        Self::start_with_delay(status, set_cookies, None).await
    }

    pub async fn start_with_delay(
        status: StatusCode,
        set_cookies: &[&'static str],
        delay: Option<Duration>,
    ) -> Self {
        let state = MockRefreshState {
            status,
            set_cookies: set_cookies.to_vec(),
            delay,
            received: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route(REFRESH_PATH, post(refresh))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock refresh server");
        let addr = listener.local_addr().expect("Mock server has no address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock refresh server failed");
        });

        Self {
            url: format!("http://{addr}{REFRESH_PATH}"),
            state,
            handle,
        }
    }

    /// `Cookie` headers received so far, in arrival order.
    pub fn received(&self) -> Vec<Option<String>> {
        self.state.received.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.state.received.lock().unwrap().len()
    }
}

impl Drop for MockRefreshServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn refresh(State(state): State<MockRefreshState>, headers: HeaderMap) -> Response {
    let cookie = headers
        .get(header::COOKIE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    state.received.lock().unwrap().push(cookie);

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    let mut response = state.status.into_response();
    for cookie in state.set_cookies.iter().copied() {
        response
            .headers_mut()
            .append(header::SET_COOKIE, HeaderValue::from_static(cookie));
    }
    response
}
