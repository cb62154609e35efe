//! Client configuration.

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

/// Default API base URL when `HAAT_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HAAT_TIMEOUT_SECS is not a number: {0:?}")]
    InvalidTimeout(String),

    #[error("no state directory; set HAAT_STATE_DIR or HOME")]
    NoStateDir,
}

/// Settings for the API client and session store.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without a trailing slash.
    pub api_url: String,

    /// Timeout applied to every request.
    pub timeout: Duration,

    /// Directory holding the persisted session keys.
    pub state_dir: PathBuf,
}

impl ClientConfig {
    /// Build configuration from the environment.
    ///
    /// Reads `HAAT_API_URL`, `HAAT_TIMEOUT_SECS` and `HAAT_STATE_DIR`,
    /// falling back to `$HOME/.haat` for the state directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the timeout is unparseable or no state
    /// directory can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env::var("HAAT_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout = match env::var("HAAT_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let state_dir = match env::var("HAAT_STATE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::var("HOME")
                .map(|home| PathBuf::from(home).join(".haat"))
                .map_err(|_| ConfigError::NoStateDir)?,
        };

        Ok(Self {
            api_url,
            timeout,
            state_dir,
        })
    }

    /// Configuration with explicit values, for tests and embedding.
    #[must_use]
    pub fn new(api_url: impl Into<String>, timeout: Duration, state_dir: PathBuf) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            timeout,
            state_dir,
        }
    }
}
