use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid session record: {0}")]
    InvalidRecord(String),

    #[error("Store configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let error = StorageError::Database("Connection refused".to_string());
        assert_eq!(error.to_string(), "Database error: Connection refused");

        let error = StorageError::InvalidRecord("refresh token without expiry".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid session record: refresh token without expiry"
        );
    }

    #[test]
    fn test_from_sqlx_error() {
        let error: StorageError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(error, StorageError::Database(_)));
    }
}
