//! Startup configuration for the server binary

use std::net::{IpAddr, SocketAddr};

use guardnest::StoreKind;

/// Values the server cannot start without, validated once at startup.
///
/// Tunables with safe defaults (cookie names, refresh window, pool size) are
/// read by the library's own statics instead.
#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub(crate) refresh_url: String,
    pub(crate) database_url: String,
    pub(crate) store_kind: StoreKind,
    pub(crate) addr: SocketAddr,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for environment variable {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl ServerConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`, treating blank values as unset.
    ///
    /// Every missing required variable is reported, not just the first.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let refresh_url = get("NEXT_REFRESH_URL");
        let database_url = get("DATABASE_URL");

        let mut missing = Vec::new();
        if refresh_url.is_none() {
            missing.push("NEXT_REFRESH_URL");
        }
        if database_url.is_none() {
            missing.push("DATABASE_URL");
        }
        let (Some(refresh_url), Some(database_url)) = (refresh_url, database_url) else {
            return Err(ConfigError::Missing(missing));
        };

        let store_kind: StoreKind = match get("SESSION_STORE_TYPE") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "SESSION_STORE_TYPE",
                value,
            })?,
            None => StoreKind::Postgres,
        };

        let ip: IpAddr = parse_var(&get, "API_ADDRESS", "0.0.0.0")?;
        let port: u16 = parse_var(&get, "API_PORT", "8080")?;

        Ok(Self {
            refresh_url,
            database_url,
            store_kind,
            addr: SocketAddr::new(ip, port),
        })
    }
}

fn parse_var<T, G>(get: &G, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    let value = get(key).unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("NEXT_REFRESH_URL", "http://localhost:3000/api/auth/refresh"),
        ("DATABASE_URL", "postgres://app@localhost/app"),
    ];

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.refresh_url, "http://localhost:3000/api/auth/refresh");
        assert_eq!(config.store_kind, StoreKind::Postgres);
        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn test_all_missing_variables_are_reported() {
        let err = ServerConfig::from_lookup(lookup_from(&[])).unwrap_err();

        match err {
            ConfigError::Missing(keys) => {
                assert_eq!(keys, vec!["NEXT_REFRESH_URL", "DATABASE_URL"]);
            }
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_error_message_lists_keys() {
        let err = ServerConfig::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")]))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Missing required environment variables: NEXT_REFRESH_URL"
        );
    }

    #[test]
    fn test_blank_required_value_counts_as_missing() {
        let err = ServerConfig::from_lookup(lookup_from(&[
            ("NEXT_REFRESH_URL", "   "),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing(keys) if keys == vec!["NEXT_REFRESH_URL"]));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("SESSION_STORE_TYPE", "sqlite"),
            ("API_ADDRESS", "127.0.0.1"),
            ("API_PORT", "9090"),
        ]);

        let config = ServerConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.store_kind, StoreKind::Sqlite);
        assert_eq!(config.addr, "127.0.0.1:9090".parse().unwrap());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("API_PORT", "eighty"));
        let err = ServerConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "API_PORT", .. }));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SESSION_STORE_TYPE", "redis"));
        let err = ServerConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: "SESSION_STORE_TYPE", ref value } if value == "redis"
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        unsafe {
            std::env::set_var("NEXT_REFRESH_URL", "http://auth.internal/api/auth/refresh");
            std::env::set_var("DATABASE_URL", "sqlite::memory:");
            std::env::set_var("SESSION_STORE_TYPE", "sqlite");
            std::env::remove_var("API_PORT");
        }

        let config = ServerConfig::from_env().unwrap();

        assert_eq!(config.refresh_url, "http://auth.internal/api/auth/refresh");
        assert_eq!(config.store_kind, StoreKind::Sqlite);
        assert_eq!(config.addr.port(), 8080);

        unsafe {
            std::env::remove_var("NEXT_REFRESH_URL");
            std::env::remove_var("DATABASE_URL");
            std::env::remove_var("SESSION_STORE_TYPE");
        }
    }
}
