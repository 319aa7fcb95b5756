//! Client configuration.

use std::path::PathBuf;
use std::sync::Arc;

use crate::backend::{Backend, StubBackend};
use crate::errors::ConfigError;
use crate::retry::{AutoSleep, RetryPolicy};

// ─── ApiToken ─────────────────────────────────────────────────────────────────

/// Application credentials. Validated on construction.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken {
    api_id:   i32,
    api_hash: String,
}

impl ApiToken {
    pub fn new(api_id: i32, api_hash: impl Into<String>) -> Result<Self, ConfigError> {
        let api_hash = api_hash.into();
        if api_id <= 0 {
            return Err(ConfigError::InvalidApiId(api_id));
        }
        if api_hash.trim().is_empty() {
            return Err(ConfigError::EmptyApiHash);
        }
        Ok(Self { api_id, api_hash })
    }

    pub fn api_id(&self) -> i32 { self.api_id }

    pub fn api_hash(&self) -> &str { &self.api_hash }
}

// The hash is a secret.
impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiToken")
            .field("api_id", &self.api_id)
            .field("api_hash", &"<redacted>")
            .finish()
    }
}

// ─── Config ───────────────────────────────────────────────────────────────────

pub const ENV_API_ID: &str = "TDLAYER_API_ID";
pub const ENV_API_HASH: &str = "TDLAYER_API_HASH";
pub const ENV_DATABASE_DIR: &str = "TDLAYER_DATABASE_DIR";
pub const ENV_DOWNLOADS_DIR: &str = "TDLAYER_DOWNLOADS_DIR";

/// Configuration for [`crate::Client::new`].
#[derive(Clone)]
pub struct Config {
    pub api_token:                  ApiToken,
    /// Where the backend keeps its session database (default: `"tdlib"`).
    pub database_directory:         PathBuf,
    /// Where downloads land (default: `"tdlib/downloads"`).
    pub downloaded_files_directory: PathBuf,
    pub retry_policy:               Arc<dyn RetryPolicy>,
    /// Request executor (default: [`StubBackend`]).
    pub backend:                    Arc<dyn Backend>,
}

impl Config {
    pub fn new(api_token: ApiToken) -> Self {
        Self {
            api_token,
            database_directory:         PathBuf::from("tdlib"),
            downloaded_files_directory: PathBuf::from("tdlib/downloads"),
            retry_policy:               Arc::new(AutoSleep::default()),
            backend:                    Arc::new(StubBackend),
        }
    }

    /// Replace the backend.
    pub fn with_backend(mut self, backend: impl Backend) -> Self {
        self.backend = Arc::new(backend);
        self
    }

    /// Build from `TDLAYER_API_ID`, `TDLAYER_API_HASH` and the optional
    /// `TDLAYER_DATABASE_DIR` / `TDLAYER_DOWNLOADS_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_id = lookup(ENV_API_ID).ok_or(ConfigError::MissingVar(ENV_API_ID))?;
        let api_id = raw_id.trim().parse::<i32>().map_err(|_| ConfigError::InvalidVar {
            name:  ENV_API_ID,
            value: raw_id.clone(),
        })?;
        let api_hash = lookup(ENV_API_HASH).ok_or(ConfigError::MissingVar(ENV_API_HASH))?;

        let mut config = Self::new(ApiToken::new(api_id, api_hash)?);
        if let Some(dir) = lookup(ENV_DATABASE_DIR) {
            config.downloaded_files_directory = PathBuf::from(&dir).join("downloads");
            config.database_directory = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_DOWNLOADS_DIR) {
            config.downloaded_files_directory = PathBuf::from(dir);
        }
        Ok(config)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &self.api_token)
            .field("database_directory", &self.database_directory)
            .field("downloaded_files_directory", &self.downloaded_files_directory)
            .field("backend", &self.backend.name())
            .finish_non_exhaustive()
    }
}
