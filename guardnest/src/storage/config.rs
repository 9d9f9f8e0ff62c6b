//! Session table and connection settings

use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use crate::config::{env_or, parse_or};
use crate::storage::errors::StorageError;

/// Table holding session rows.
/// Default: "session"
pub static DB_TABLE_SESSIONS: LazyLock<String> =
    LazyLock::new(|| env_or("DB_TABLE_SESSIONS", "session"));

/// Upper bound on pooled database connections.
/// Default: 10 (also used when the value is not a positive number)
pub static DATABASE_MAX_CONNECTIONS: LazyLock<u32> = LazyLock::new(|| {
    parse_max_connections(std::env::var("DATABASE_MAX_CONNECTIONS").ok().as_deref())
});

pub(crate) const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Bound on connecting to / acquiring from the pool.
pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn parse_max_connections(value: Option<&str>) -> u32 {
    match parse_or(value, DEFAULT_MAX_CONNECTIONS) {
        0 => DEFAULT_MAX_CONNECTIONS,
        n => n,
    }
}

/// Backend holding the session table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Sqlite,
}

impl FromStr for StoreKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "sqlite" => Ok(StoreKind::Sqlite),
            other => Err(StorageError::Config(format!(
                "Unsupported store type: {other}. Supported types are 'postgres' and 'sqlite'"
            ))),
        }
    }
}

/// Table names are interpolated into SQL, so only plain identifiers are accepted.
pub(crate) fn validate_table_name(name: &str) -> Result<(), StorageError> {
    let valid = !name.is_empty()
        && name.len() <= 63
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err(StorageError::Config(format!("Invalid table name: {name:?}")))
    }
}
