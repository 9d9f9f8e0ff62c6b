use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::config::DEFAULT_REFRESH_WINDOW_SECS;
use crate::refresh::RefreshAuthority;
use crate::session::errors::SessionError;
use crate::session::types::{Session, Validation};
use crate::storage::SessionStore;

use super::cookie::redact_token;

/// Session validation on top of a session store and a refresh authority.
///
/// Holds no state of its own across calls: concurrent requests for the same
/// session each make their own decision and, when renewal is due, each call
/// the refresh authority.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    refresher: Arc<dyn RefreshAuthority>,
    refresh_window: Duration,
}

impl SessionService {
    /// Creates the service with the default 15 minute refresh window.
    pub fn new(store: Arc<dyn SessionStore>, refresher: Arc<dyn RefreshAuthority>) -> Self {
        Self {
            store,
            refresher,
            refresh_window: Duration::seconds(DEFAULT_REFRESH_WINDOW_SECS),
        }
    }

    pub fn with_refresh_window(mut self, refresh_window: Duration) -> Self {
        self.refresh_window = refresh_window;
        self
    }

    pub fn refresh_window(&self) -> Duration {
        self.refresh_window
    }

    /// Validates a session and renews it through the refresh authority when
    /// it is expired or within the refresh window.
    ///
    /// # Arguments
    /// * `session_id` - The session token taken from the session cookie
    /// * `cookie_header` - The caller's full `Cookie` header, forwarded verbatim on renewal
    ///
    /// # Returns
    /// * `Validation::NotFound` - no session matches the token
    /// * `Validation::Valid` - session outside the refresh window; nothing was called
    /// * `Validation::Renewed` - renewal succeeded; carries the pre-refresh record
    /// * `SessionError::Storage` - the store could not be read
    /// * `SessionError::RefreshFailed` - renewal was required and failed (single attempt)
    pub async fn validate_or_refresh(
        &self,
        session_id: &str,
        cookie_header: Option<&str>,
    ) -> Result<Validation, SessionError> {
        let Some(session) = self.store.get_by_token(session_id).await? else {
            tracing::debug!("No session found for token {}", redact_token(session_id));
            return Ok(Validation::NotFound);
        };

        self.renew_if_needed(session, cookie_header, Utc::now()).await
    }

    pub(crate) async fn renew_if_needed(
        &self,
        session: Session,
        cookie_header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Validation, SessionError> {
        let state = session.expiry_state(now, self.refresh_window);
        if !state.needs_refresh() {
            return Ok(Validation::Valid(session));
        }

        let was_expired = state.is_expired();
        tracing::debug!(
            "Session {} for user {} is {:?} (expires at {}), requesting renewal",
            redact_token(&session.id),
            session.user_id,
            state,
            session.expires_at
        );

        match self.refresher.refresh(cookie_header).await {
            Ok(set_cookies) => Ok(Validation::Renewed {
                session,
                set_cookies,
                was_expired,
            }),
            Err(source) => Err(SessionError::RefreshFailed {
                session: Box::new(session),
                was_expired,
                source,
            }),
        }
    }

    /// Returns the session only if it has not expired. Never renews.
    ///
    /// Kept apart from [`validate_or_refresh`](Self::validate_or_refresh) so
    /// that side-effect free probes cannot trigger a proactive renewal.
    pub async fn check_validity(&self, session_id: &str) -> Result<Option<Session>, SessionError> {
        let Some(session) = self.store.get_by_token(session_id).await? else {
            return Ok(None);
        };

        if Utc::now() >= session.expires_at {
            tracing::debug!("Session expired at {}", session.expires_at);
            return Ok(None);
        }

        Ok(Some(session))
    }
}
