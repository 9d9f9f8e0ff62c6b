use std::time::Duration;

use async_trait::async_trait;
use http::HeaderValue;
use http::header::{COOKIE, SET_COOKIE};
use url::Url;

use crate::refresh::config::{NEXT_REFRESH_URL, REFRESH_TIMEOUT};
use crate::refresh::errors::RefreshError;

/// External service that renews a session given the client's cookies.
#[async_trait]
pub trait RefreshAuthority: Send + Sync + 'static {
    /// Perform one renewal attempt.
    ///
    /// `cookie_header` is the caller's entire `Cookie` header, forwarded
    /// verbatim. On success, returns every `Set-Cookie` value of the response
    /// in order.
    async fn refresh(&self, cookie_header: Option<&str>) -> Result<Vec<HeaderValue>, RefreshError>;
}

/// Refresh authority reached over HTTP with a single long-lived client.
#[derive(Clone, Debug)]
pub struct HttpRefreshAuthority {
    client: reqwest::Client,
    refresh_url: Url,
}

impl HttpRefreshAuthority {
    /// Creates the authority with its own client.
    ///
    /// - `timeout`: caps every refresh call so an unresponsive authority cannot
    ///   hold a request open indefinitely.
    /// - `pool_idle_timeout`: 90 seconds, the reqwest default.
    /// - `pool_max_idle_per_host`: 32, enough for bursts of concurrent renewals.
    pub fn new(refresh_url: &str, timeout: Duration) -> Result<Self, RefreshError> {
        let refresh_url = Url::parse(refresh_url)
            .map_err(|e| RefreshError::Client(format!("Invalid refresh URL {refresh_url:?}: {e}")))?;
        if !matches!(refresh_url.scheme(), "http" | "https") {
            return Err(RefreshError::Client(format!(
                "Unsupported refresh URL scheme: {}",
                refresh_url.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(32)
            .build()?;

        Ok(Self {
            client,
            refresh_url,
        })
    }

    /// Builds the authority from `NEXT_REFRESH_URL` and `REFRESH_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, RefreshError> {
        let url = NEXT_REFRESH_URL
            .as_deref()
            .ok_or_else(|| RefreshError::Client("NEXT_REFRESH_URL is not set".to_string()))?;
        Self::new(url, *REFRESH_TIMEOUT)
    }

    pub fn refresh_url(&self) -> &Url {
        &self.refresh_url
    }
}

#[async_trait]
impl RefreshAuthority for HttpRefreshAuthority {
    #[tracing::instrument(skip_all, fields(url = %self.refresh_url))]
    async fn refresh(&self, cookie_header: Option<&str>) -> Result<Vec<HeaderValue>, RefreshError> {
        let mut request = self.client.post(self.refresh_url.clone());
        if let Some(cookies) = cookie_header.filter(|c| !c.is_empty()) {
            request = request.header(COOKIE, cookies);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Refresh authority answered {}", status);
            return Err(RefreshError::Status(status.as_u16()));
        }

        let set_cookies: Vec<HeaderValue> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .cloned()
            .collect();

        tracing::debug!(
            "Refresh authority answered {} with {} cookie(s)",
            status,
            set_cookies.len()
        );
        Ok(set_cookies)
    }
}
