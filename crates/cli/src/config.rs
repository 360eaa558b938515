//! CLI configuration: TOML file defaults overridden by flags and environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use mailroom_client::{MailroomClient, MailroomClientBuilder};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading the CLI configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The merged configuration is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level layout of the configuration file.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    api: ApiConfig,
}

/// Connection settings for the messaging API.
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// User identifier for basic auth.
    pub user_id: Option<String>,
    /// Access token for basic auth.
    pub access_token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_endpoint() -> String {
    "http://localhost:31415/api".to_owned()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_id: None,
            access_token: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint", &self.endpoint)
            .field("user_id", &self.user_id)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub user_id: Option<String>,
    pub access_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl ApiConfig {
    /// Load the configuration file at `path`, or defaults if it does not
    /// exist, then apply `overrides`.
    pub fn load(path: &Path, overrides: Overrides) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&contents)?
        } else {
            Self::default()
        };

        let config = config.merge(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Parse the `[api]` table of a configuration file.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents)?;
        Ok(file.api)
    }

    /// Apply overrides; any value present in `overrides` wins.
    #[must_use]
    pub fn merge(mut self, overrides: Overrides) -> Self {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(user_id) = overrides.user_id {
            self.user_id = Some(user_id);
        }
        if let Some(access_token) = overrides.access_token {
            self.access_token = Some(access_token);
        }
        if let Some(timeout_seconds) = overrides.timeout_seconds {
            self.timeout_seconds = timeout_seconds;
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "timeout_seconds must be greater than zero".into(),
            ));
        }
        if self.user_id.is_some() != self.access_token.is_some() {
            return Err(ConfigError::Invalid(
                "user_id and access_token must be set together".into(),
            ));
        }
        Ok(())
    }

    /// Build an HTTP client from this configuration.
    pub fn build_client(&self) -> Result<MailroomClient, mailroom_client::Error> {
        let mut builder = MailroomClientBuilder::new(&self.endpoint)
            .timeout(Duration::from_secs(self.timeout_seconds));

        if let (Some(user_id), Some(access_token)) = (&self.user_id, &self.access_token) {
            builder = builder.credentials(user_id, access_token);
        }

        builder.build()
    }
}
