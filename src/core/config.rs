//! Configuration management

use config::{Config as ConfigBuilder, ConfigError as BuilderError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API configuration: {0}")]
    InvalidApi(String),

    #[error("Invalid session configuration: {0}")]
    InvalidSession(String),

    #[error("Invalid logging configuration: {0}")]
    InvalidLogging(String),

    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

impl From<BuilderError> for ConfigError {
    fn from(err: BuilderError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// Command-line overrides applied on top of file and environment sources.
///
/// The binary parses the full CLI (including the subcommand) and hands this
/// subset down; the library never calls `parse()` itself.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub base_url: Option<String>,
    pub session_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration with precedence: CLI args > Environment variables > Config file > Defaults
    pub fn load(overrides: &CliOverrides) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // 1. Defaults (lowest priority)
        builder = builder
            .set_default("api.base_url", "http://127.0.0.1:5000")?
            .set_default(
                "api.user_agent",
                format!("kyc-portal/{}", env!("CARGO_PKG_VERSION")),
            )?
            .set_default(
                "session.state_file",
                default_state_file().display().to_string(),
            )?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("logging.output", "stderr")?;

        // 2. Config file if specified (medium priority)
        if let Some(config_path) = &overrides.config {
            if !config_path.exists() {
                return Err(ConfigError::FileNotFound(
                    config_path.display().to_string(),
                ));
            }
            builder = builder.add_source(File::from(config_path.as_path()));
        }

        // 3. Environment variables (higher priority)
        // Prefixed with KYC_ and using __ for nesting, e.g. KYC_API__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("KYC")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI arguments (highest priority)
        if let Some(base_url) = &overrides.base_url {
            builder = builder.set_override("api.base_url", base_url.clone())?;
        }
        if let Some(session_file) = &overrides.session_file {
            builder = builder.set_override(
                "session.state_file",
                session_file.display().to_string(),
            )?;
        }
        if let Some(log_level) = &overrides.log_level {
            builder = builder.set_override("logging.level", log_level.clone())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let config: Config = ConfigBuilder::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.session.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Default location of the session state file, next to the rest of the
/// per-user application data.
pub fn default_state_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kyc-portal")
        .join("session.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidApi(format!("base_url: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidApi(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::InvalidApi(
                "user_agent cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The parsed base URL. Only valid after `validate()` has passed.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidApi(format!("base_url: {}", e)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub state_file: PathBuf,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidSession(
                "state_file cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
    pub log_file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "level must be one of: {:?}",
                valid_levels
            )));
        }

        let valid_formats = ["json", "text"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "format must be one of: {:?}",
                valid_formats
            )));
        }

        let valid_outputs = ["stderr", "file"];
        if !valid_outputs.contains(&self.output.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "output must be one of: {:?}",
                valid_outputs
            )));
        }

        if self.output == "file" && self.log_file.is_none() {
            return Err(ConfigError::InvalidLogging(
                "log_file must be specified when output is 'file'".to_string(),
            ));
        }

        Ok(())
    }
}
