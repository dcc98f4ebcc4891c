//! Runtime configuration
//!
//! Layered as: built-in defaults, then an optional TOML file, then
//! environment variables. CLI flags are applied last by the binary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const DEFAULT_GEMINI_VERSION: &str = "v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown model provider '{0}' (expected 'gemini' or 'canned')")]
    UnknownProvider(String),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Which language model backend answers flow requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    /// Google Generative Language API
    #[default]
    Gemini,
    /// Fixed offline responses, for demos and tests
    Canned,
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelProvider::Gemini => write!(f, "gemini"),
            ModelProvider::Canned => write!(f, "canned"),
        }
    }
}

impl FromStr for ModelProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "googleai" => Ok(ModelProvider::Gemini),
            "canned" | "offline" => Ok(ModelProvider::Canned),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 9002,
        }
    }
}

/// Language model settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub provider: ModelProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub api_version: String,
    /// No timeout is applied when unset
    pub timeout_secs: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ModelProvider::default(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            api_version: DEFAULT_GEMINI_VERSION.to_string(),
            timeout_secs: None,
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Workflow tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Delay between extraction progress ticks
    pub extraction_tick_ms: u64,
    /// Number of characters of original content kept in the report
    pub report_snapshot_chars: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            extraction_tick_ms: 300,
            report_snapshot_chars: 1000,
        }
    }
}

/// Session cookie settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "hub_session".to_string(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub workflow: WorkflowConfig,
    pub session: SessionConfig,
}

impl HubConfig {
    /// Parses configuration from TOML text
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads configuration from an optional file, then applies the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&text, path)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides through the given lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.model.api_key.is_none() {
            self.model.api_key = lookup("GEMINI_API_KEY")
                .or_else(|| lookup("GOOGLE_API_KEY"))
                .filter(|key| !key.trim().is_empty());
        }
        if let Some(provider) = lookup("FORENSICS_HUB_MODEL_PROVIDER") {
            self.model.provider = provider.parse()?;
        }
        if let Some(model) = lookup("FORENSICS_HUB_MODEL") {
            self.model.model = model;
        }
        if let Some(port) = lookup("FORENSICS_HUB_PORT") {
            self.server.port = port.parse().map_err(|err| ConfigError::Invalid {
                key: "FORENSICS_HUB_PORT",
                reason: format!("{err}"),
            })?;
        }
        Ok(())
    }

    /// Checks cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cookie = &self.session.cookie_name;
        if cookie.is_empty() {
            return Err(ConfigError::Invalid {
                key: "session.cookie_name",
                reason: "must not be empty".to_string(),
            });
        }
        if !cookie
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Invalid {
                key: "session.cookie_name",
                reason: format!("'{cookie}' may only contain letters, digits, '_' and '-'"),
            });
        }
        if self.model.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "model.model",
                reason: "must not be empty".to_string(),
            });
        }
        if self.workflow.report_snapshot_chars == 0 {
            return Err(ConfigError::Invalid {
                key: "workflow.report_snapshot_chars",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.address, self.server.port)
    }
}
