//! Central configuration for the guardnest crate
//!
//! Values are read once from the process environment. Call [`load_env_files`]
//! before touching any of these statics so that `.env.local` / `.env` entries
//! are visible to them.

use std::path::PathBuf;
use std::sync::LazyLock;

use chrono::Duration;

/// Name of the cookie carrying the opaque session token.
/// Default: "session_token"
pub static SESSION_COOKIE_NAME: LazyLock<String> =
    LazyLock::new(|| env_or("SESSION_COOKIE_NAME", "session_token"));

/// Name of the credential cookie the refresh authority needs to renew a session.
/// Only used for diagnostics; the whole `Cookie` header is always forwarded.
/// Default: "refresh_token"
pub static REFRESH_COOKIE_NAME: LazyLock<String> =
    LazyLock::new(|| env_or("REFRESH_COOKIE_NAME", "refresh_token"));

/// Lookahead before `expires_at` during which a still-valid session is renewed.
/// Default: 15 minutes
pub static SESSION_REFRESH_WINDOW: LazyLock<Duration> = LazyLock::new(|| {
    parse_refresh_window(std::env::var("SESSION_REFRESH_WINDOW_SECS").ok().as_deref())
});

pub(crate) const DEFAULT_REFRESH_WINDOW_SECS: i64 = 15 * 60;

/// Non-positive or out-of-range values fall back to the default window.
pub(crate) fn parse_refresh_window(value: Option<&str>) -> Duration {
    let default = Duration::seconds(DEFAULT_REFRESH_WINDOW_SECS);
    match parse_or(value, DEFAULT_REFRESH_WINDOW_SECS) {
        secs if secs <= 0 => {
            tracing::warn!(
                "SESSION_REFRESH_WINDOW_SECS must be positive, using {}s",
                DEFAULT_REFRESH_WINDOW_SECS
            );
            default
        }
        secs => Duration::try_seconds(secs).unwrap_or_else(|| {
            tracing::warn!(
                "SESSION_REFRESH_WINDOW_SECS {} is out of range, using {}s",
                secs,
                DEFAULT_REFRESH_WINDOW_SECS
            );
            default
        }),
    }
}

/// Loads `.env.local`, falling back to `.env`. Missing files are not an error.
///
/// Returns the file that was loaded. Nothing is logged here so that it can run
/// before a tracing subscriber exists; the caller reports the result.
pub fn load_env_files() -> Option<PathBuf> {
    dotenvy::from_filename(".env.local")
        .or_else(|_| dotenvy::dotenv())
        .ok()
}

pub(crate) fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses `value`, falling back to `default` when absent or malformed.
pub(crate) fn parse_or<T: std::str::FromStr>(value: Option<&str>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
