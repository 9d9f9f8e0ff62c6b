use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::session::Session;
use crate::storage::errors::StorageError;
use crate::storage::types::SessionStore;

/// Session store kept in process memory, keyed by token.
///
/// Used for tests and local development where no database is available.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: impl IntoIterator<Item = Session>) -> Self {
        let sessions = sessions
            .into_iter()
            .map(|session| (session.id.clone(), session))
            .collect();
        Self {
            sessions: RwLock::new(sessions),
        }
    }

    /// Insert or replace a session, returning the previous record for that token.
    pub async fn insert(&self, session: Session) -> Option<Session> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session)
    }

    pub async fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.write().await.remove(token)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_by_token(&self, token: &str) -> Result<Option<Session>, StorageError> {
        Ok(self.sessions.read().await.get(token).cloned())
    }
}
