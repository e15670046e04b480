use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use notes_core::db::RemoteConfig;
use notes_core::services::DatabaseTarget;
use notes_core::util::is_http_url;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Process configuration, read once at startup.
///
/// `Debug` is safe to log: the remote auth token is redacted by `RemoteConfig`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database: DatabaseTarget,
    pub connect_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = match optional_trimmed(&lookup, "NOTES_API_BIND_ADDR") {
            Some(addr) => addr,
            None => {
                let host = value_or_default(&lookup, "NOTES_API_HOST", "127.0.0.1");
                let port = value_or_default(&lookup, "PORT", "5001")
                    .parse::<u16>()
                    .map_err(|_| {
                        ConfigError::Invalid("PORT must be an integer in [0, 65535]".to_string())
                    })?;
                format!("{host}:{port}")
            }
        };

        let database_url = required_trimmed(&lookup, "DATABASE_URL")?;
        let database = parse_database_target(&database_url, &lookup)?;

        let connect_timeout_secs =
            value_or_default(&lookup, "DATABASE_CONNECT_TIMEOUT_SECS", "10")
                .parse::<u64>()
                .map_err(|_| {
                    ConfigError::Invalid(
                        "DATABASE_CONNECT_TIMEOUT_SECS must be an integer in [1, 120]".to_string(),
                    )
                })?;
        if !(1..=120).contains(&connect_timeout_secs) {
            return Err(ConfigError::Invalid(
                "DATABASE_CONNECT_TIMEOUT_SECS must be in [1, 120]".to_string(),
            ));
        }

        Ok(Self {
            bind_addr,
            database,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }
}

fn parse_database_target(
    url: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<DatabaseTarget, ConfigError> {
    if url == ":memory:" {
        return Ok(DatabaseTarget::InMemory);
    }

    if url.starts_with("libsql://") || is_http_url(url) {
        let auth_token = required_trimmed(lookup, "DATABASE_AUTH_TOKEN")?;
        return Ok(DatabaseTarget::Remote(RemoteConfig::new(url, auth_token)));
    }

    let path = url.strip_prefix("file:").unwrap_or(url);
    if path.is_empty() {
        return Err(ConfigError::Invalid(
            "DATABASE_URL must name a file, :memory:, or a libsql:// URL".to_string(),
        ));
    }
    Ok(DatabaseTarget::Local(PathBuf::from(path)))
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn required_trimmed(
    lookup: impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    optional_trimmed(lookup, name).ok_or(ConfigError::MissingVar(name))
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
