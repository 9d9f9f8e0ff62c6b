use thiserror::Error;

use crate::refresh::RefreshError;
use crate::session::types::Session;
use crate::storage::StorageError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// The session store could not be read. Distinct from "not found".
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Renewal was required but the refresh authority call failed.
    ///
    /// Carries the pre-refresh record and whether it had already expired, so
    /// the gate can apply the same policy it would on success.
    #[error("Session refresh failed (expired: {was_expired}): {source}")]
    RefreshFailed {
        session: Box<Session>,
        was_expired: bool,
        #[source]
        source: RefreshError,
    },
}

impl SessionError {
    /// Whether the failure came from infrastructure rather than the refresh authority.
    pub fn is_storage(&self) -> bool {
        matches!(self, SessionError::Storage(_))
    }
}
