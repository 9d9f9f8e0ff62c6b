use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefreshError {
    #[error("Refresh request failed: {0}")]
    Transport(String),

    #[error("Refresh request timed out")]
    Timeout,

    #[error("Refresh failed: {0}")]
    Status(u16),

    #[error("Refresh client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for RefreshError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() {
            Self::Client(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
