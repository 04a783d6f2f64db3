//! Configuration loading, validation, and management for MaskRAG.
//!
//! Loads configuration from `~/.maskrag/config.toml` with environment
//! variable overrides. Validates all settings at startup; nothing here is
//! re-read or mutated once the service is running.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The root configuration structure.
///
/// Maps directly to `~/.maskrag/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bearer credential for the completion endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Full chat-completions URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Timeout for one completion call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Static identification headers sent to the provider
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Placeholder fidelity checking of model answers
    #[serde(default)]
    pub fidelity: FidelityConfig,
}

fn default_api_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".into()
}
fn default_model() -> String {
    "kwaipilot/kat-coder-pro:free".into()
}
fn default_request_timeout_secs() -> u64 {
    30
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("identity", &self.identity)
            .field("gateway", &self.gateway)
            .field("fidelity", &self.fidelity)
            .finish()
    }
}

/// Values for the `HTTP-Referer` and `X-Title` headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_referer")]
    pub referer: String,

    #[serde(default = "default_title")]
    pub title: String,
}

fn default_referer() -> String {
    "https://your-site.com".into()
}
fn default_title() -> String {
    "Your App Name".into()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            referer: default_referer(),
            title: default_title(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Maximum accepted request body size
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// What to do when an answer contains placeholders the input never had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FidelityPolicy {
    /// Skip the check
    Off,
    /// Log a warning and return the answer unchanged
    #[default]
    Warn,
    /// Fail the request
    Reject,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FidelityConfig {
    #[serde(default)]
    pub policy: FidelityPolicy,
}

impl AppConfig {
    /// Load configuration from the default path (~/.maskrag/config.toml).
    ///
    /// Environment variables override the file:
    /// - `MASKRAG_API_KEY`, then `OPENROUTER_API_KEY` (only if no key is set)
    /// - `MASKRAG_API_URL`
    /// - `MASKRAG_MODEL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_key.is_none() {
            self.api_key = lookup("MASKRAG_API_KEY").or_else(|| lookup("OPENROUTER_API_KEY"));
        }

        if let Some(url) = lookup("MASKRAG_API_URL") {
            self.api_url = url;
        }

        if let Some(model) = lookup("MASKRAG_MODEL") {
            self.model = model;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".maskrag")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError("model must not be empty".into()));
        }

        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }

        Ok(())
    }

    /// The credential, or an error if none was configured.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    /// Timeout for a single completion call.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Generate a default config TOML string (for `doctor` output).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            request_timeout_secs: default_request_timeout_secs(),
            identity: IdentityConfig::default(),
            gateway: GatewayConfig::default(),
            fidelity: FidelityConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("No API key configured: set api_key in config.toml or MASKRAG_API_KEY / OPENROUTER_API_KEY")]
    MissingApiKey,
}
