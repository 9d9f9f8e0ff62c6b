use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Row, postgres::PgRow, sqlite::SqliteRow};

use crate::session::{RefreshGrant, Session};
use crate::storage::errors::StorageError;

/// Read access to persisted sessions.
///
/// Implementations must be safe for concurrent use; the gate calls them from
/// many in-flight requests without coordination.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Fetch the session whose token is `token`.
    ///
    /// Returns `Ok(None)` when no row matches. `Err` is reserved for genuine
    /// infrastructure failures.
    async fn get_by_token(&self, token: &str) -> Result<Option<Session>, StorageError>;
}

/// Flat row shape shared by the SQL stores.
#[derive(Debug, Clone)]
pub(super) struct SessionRow {
    pub(super) token: String,
    pub(super) user_id: String,
    pub(super) expires_at: DateTime<Utc>,
    pub(super) refresh_token: Option<String>,
    pub(super) refresh_expires_at: Option<DateTime<Utc>>,
}

impl TryFrom<SessionRow> for Session {
    type Error = StorageError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let refresh = match (row.refresh_token, row.refresh_expires_at) {
            (Some(token), Some(expires_at)) => Some(RefreshGrant { token, expires_at }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(StorageError::InvalidRecord(
                    "refresh token present without refresh expiry".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(StorageError::InvalidRecord(
                    "refresh expiry present without refresh token".to_string(),
                ));
            }
        };

        Ok(Session {
            id: row.token,
            user_id: row.user_id,
            expires_at: row.expires_at,
            refresh,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for SessionRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(SessionRow {
            token: row.try_get("token")?,
            user_id: row.try_get("userId")?,
            expires_at: row.try_get("expiresAt")?,
            refresh_token: row.try_get("refreshToken")?,
            refresh_expires_at: row.try_get("refreshExpiresAt")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SessionRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(SessionRow {
            token: row.try_get("token")?,
            user_id: row.try_get("userId")?,
            expires_at: row.try_get("expiresAt")?,
            refresh_token: row.try_get("refreshToken")?,
            refresh_expires_at: row.try_get("refreshExpiresAt")?,
        })
    }
}
