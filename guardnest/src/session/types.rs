use chrono::{DateTime, Duration, Utc};
use http::HeaderValue;
use serde::{Deserialize, Serialize};

/// Session record as read from the session store.
///
/// The gate never creates or mutates these; they are point-in-time reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque session token, the store lookup key
    pub id: String,
    /// Identifier of the authenticated principal
    pub user_id: String,
    /// The session is invalid at or after this instant
    pub expires_at: DateTime<Utc>,
    /// Present only when the session supports renewal
    pub refresh: Option<RefreshGrant>,
}

/// Renewal credentials of a session. Token and expiry are always stored together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshGrant {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn supports_renewal(&self) -> bool {
        self.refresh.is_some()
    }

    /// Classifies this session at `now` against the given refresh window.
    pub fn expiry_state(&self, now: DateTime<Utc>, refresh_window: Duration) -> ExpiryState {
        ExpiryState::classify(self.expires_at, now, refresh_window)
    }
}

/// Where a session sits relative to its expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryState {
    /// More than the refresh window left
    Valid,
    /// Still valid, but within the refresh window
    NearExpiry,
    /// `now >= expires_at`
    Expired,
}

impl ExpiryState {
    pub fn classify(
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
        refresh_window: Duration,
    ) -> Self {
        if now >= expires_at {
            ExpiryState::Expired
        } else if expires_at - now <= refresh_window {
            ExpiryState::NearExpiry
        } else {
            ExpiryState::Valid
        }
    }

    pub fn needs_refresh(self) -> bool {
        !matches!(self, ExpiryState::Valid)
    }

    pub fn is_expired(self) -> bool {
        matches!(self, ExpiryState::Expired)
    }
}

/// Identity bound to a request after the gate lets it through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// Outcome of [`SessionService::validate_or_refresh`](crate::SessionService::validate_or_refresh).
#[derive(Debug, Clone)]
pub enum Validation {
    /// No session matches the token
    NotFound,
    /// Session outside the refresh window, no renewal attempted
    Valid(Session),
    /// Renewal was attempted and succeeded.
    ///
    /// `session` is the pre-refresh record; `set_cookies` are the authority's
    /// `Set-Cookie` values, meant for the client's next request.
    Renewed {
        session: Session,
        set_cookies: Vec<HeaderValue>,
        was_expired: bool,
    },
}

impl Validation {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Validation::NotFound => None,
            Validation::Valid(session) | Validation::Renewed { session, .. } => Some(session),
        }
    }

    pub fn set_cookies(&self) -> &[HeaderValue] {
        match self {
            Validation::Renewed { set_cookies, .. } => set_cookies,
            _ => &[],
        }
    }

    pub fn was_expired(&self) -> bool {
        matches!(
            self,
            Validation::Renewed {
                was_expired: true,
                ..
            }
        )
    }
}
