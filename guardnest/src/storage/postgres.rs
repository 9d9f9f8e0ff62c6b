use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::session::Session;
use crate::storage::config::{DB_TABLE_SESSIONS, validate_table_name};
use crate::storage::errors::StorageError;
use crate::storage::types::{SessionRow, SessionStore};

/// Session store backed by a PostgreSQL session table.
#[derive(Clone, Debug)]
pub struct PostgresSessionStore {
    pool: Pool<Postgres>,
    table: String,
}

impl PostgresSessionStore {
    /// Uses the table named by `DB_TABLE_SESSIONS`.
    pub fn new(pool: Pool<Postgres>) -> Result<Self, StorageError> {
        Self::with_table(pool, DB_TABLE_SESSIONS.as_str())
    }

    pub fn with_table(pool: Pool<Postgres>, table: &str) -> Result<Self, StorageError> {
        validate_table_name(table)?;
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn get_by_token(&self, token: &str) -> Result<Option<Session>, StorageError> {
        let table_name = self.table.as_str();

        let row = sqlx::query_as::<_, SessionRow>(&format!(
            r#"
            SELECT token, "userId", "expiresAt", "refreshToken", "refreshExpiresAt"
            FROM "{table_name}" WHERE token = $1
            "#
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Session::try_from).transpose()
    }
}
