use std::sync::LazyLock;
use std::time::Duration;

use crate::config::parse_or;

/// Endpoint of the refresh authority, e.g. `https://app.example.com/api/auth/refresh`.
/// Required; there is no sensible default.
pub static NEXT_REFRESH_URL: LazyLock<Option<String>> = LazyLock::new(|| {
    std::env::var("NEXT_REFRESH_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
});

/// Bound on a single refresh call, independent of the caller's deadline.
/// Default: 5 seconds
pub static REFRESH_TIMEOUT: LazyLock<Duration> = LazyLock::new(|| {
    Duration::from_secs(parse_or(
        std::env::var("REFRESH_TIMEOUT_SECS").ok().as_deref(),
        DEFAULT_REFRESH_TIMEOUT_SECS,
    ))
});

pub(crate) const DEFAULT_REFRESH_TIMEOUT_SECS: u64 = 5;
