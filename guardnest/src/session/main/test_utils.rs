//! Test collaborators for session module tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use http::HeaderValue;
use tokio::sync::Mutex;

use crate::refresh::{RefreshAuthority, RefreshError};
use crate::session::Session;
use crate::storage::{InMemorySessionStore, SessionStore, StorageError};

/// Session for `token` expiring `offset` from now.
pub(crate) fn session_expiring_in(token: &str, user_id: &str, offset: Duration) -> Session {
    Session {
        id: token.to_string(),
        user_id: user_id.to_string(),
        expires_at: Utc::now() + offset,
        refresh: None,
    }
}

pub(crate) fn store_with(sessions: Vec<Session>) -> Arc<InMemorySessionStore> {
    Arc::new(InMemorySessionStore::with_sessions(sessions))
}

/// Refresh authority stub that counts calls and records forwarded cookies.
pub(crate) struct StubRefreshAuthority {
    calls: AtomicUsize,
    forwarded: Mutex<Vec<Option<String>>>,
    response: Result<Vec<HeaderValue>, RefreshError>,
    delay: Option<StdDuration>,
}

impl StubRefreshAuthority {
    pub(crate) fn succeeding(cookies: &[&'static str]) -> Arc<Self> {
        let cookies = cookies.iter().copied().map(HeaderValue::from_static).collect();
        Arc::new(Self::new(Ok(cookies)))
    }

    pub(crate) fn failing(error: RefreshError) -> Arc<Self> {
        Arc::new(Self::new(Err(error)))
    }

    pub(crate) fn slow(delay: StdDuration) -> Arc<Self> {
        let mut stub = Self::new(Ok(vec![HeaderValue::from_static("sid=late")]));
        stub.delay = Some(delay);
        Arc::new(stub)
    }

    fn new(response: Result<Vec<HeaderValue>, RefreshError>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            forwarded: Mutex::new(Vec::new()),
            response,
            delay: None,
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) async fn forwarded(&self) -> Vec<Option<String>> {
        self.forwarded.lock().await.clone()
    }
}

#[async_trait]
impl RefreshAuthority for StubRefreshAuthority {
    async fn refresh(&self, cookie_header: Option<&str>) -> Result<Vec<HeaderValue>, RefreshError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.forwarded
            .lock()
            .await
            .push(cookie_header.map(str::to_string));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}

/// Store whose every read fails, standing in for a database outage.
pub(crate) struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn get_by_token(&self, _token: &str) -> Result<Option<Session>, StorageError> {
        Err(StorageError::Database("connection refused".to_string()))
    }
}
