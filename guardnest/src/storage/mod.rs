mod config;
mod errors;
mod memory;
mod postgres;
mod sqlite;
mod types;

use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use config::{DATABASE_MAX_CONNECTIONS, DB_TABLE_SESSIONS, StoreKind};
pub use errors::StorageError;
pub use memory::InMemorySessionStore;
pub use postgres::PostgresSessionStore;
pub use sqlite::SqliteSessionStore;
pub use types::SessionStore;

use config::CONNECT_TIMEOUT;

/// Build a session store for `kind` backed by a lazily connecting pool.
///
/// No connection is opened here; the first lookup does that, bounded by a
/// five second acquire timeout.
pub fn connect_session_store(
    kind: StoreKind,
    url: &str,
    max_connections: u32,
) -> Result<Arc<dyn SessionStore>, StorageError> {
    tracing::info!(
        "Initializing session store with type: {:?}, max connections: {}",
        kind,
        max_connections
    );

    let store: Arc<dyn SessionStore> = match kind {
        StoreKind::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(CONNECT_TIMEOUT)
                .connect_lazy(url)
                .map_err(|e| StorageError::Config(format!("Invalid Postgres URL: {e}")))?;
            Arc::new(PostgresSessionStore::new(pool)?)
        }
        StoreKind::Sqlite => {
            let opts = SqliteConnectOptions::from_str(url)
                .map_err(|e| StorageError::Config(format!("Invalid SQLite URL: {e}")))?;
            let pool = SqlitePoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(CONNECT_TIMEOUT)
                .connect_lazy_with(opts);
            Arc::new(SqliteSessionStore::new(pool)?)
        }
    };

    Ok(store)
}
