// Configuration read once from the process environment in `main` and then
// passed by reference; nothing below `main` looks at the environment.

use reqwest::header::HeaderValue;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

pub const URL_VAR: &str = "WORKER_URL";
pub const TOKEN_VAR: &str = "INGEST_TOKEN";
pub const TIMEOUT_VAR: &str = "INGEST_TIMEOUT_SECS";

/// Path appended verbatim to `WORKER_URL`.
pub const INGEST_PATH: &str = "/api/ingest";

#[derive(Clone)]
pub struct Config {
    /// Base URL of the ingestion service, e.g. `https://example.com`.
    pub worker_url: String,
    pub token: String,
    /// `None` means the request may block indefinitely.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Build the configuration from `WORKER_URL`, `INGEST_TOKEN` and the
    /// optional `INGEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let worker_url = non_empty(URL_VAR);
        let token = non_empty(TOKEN_VAR);
        let (worker_url, token) = match (worker_url, token) {
            (Some(url), Some(token)) => (url, token),
            (url, token) => {
                let mut missing = Vec::new();
                if url.is_none() {
                    missing.push(URL_VAR);
                }
                if token.is_none() {
                    missing.push(TOKEN_VAR);
                }
                return Err(ConfigError::Missing { missing });
            }
        };

        let timeout = match non_empty(TIMEOUT_VAR) {
            None => None,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        let config = Config { worker_url, token, timeout };
        config.bearer_header()?;
        Ok(config)
    }

    /// Full URL the payload is POSTed to.
    pub fn ingest_url(&self) -> String {
        format!("{}{}", self.worker_url, INGEST_PATH)
    }

    /// `Authorization` header value, marked sensitive so it never shows up
    /// in reqwest's debug output.
    pub fn bearer_header(&self) -> Result<HeaderValue, ConfigError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| ConfigError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("worker_url", &self.worker_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
