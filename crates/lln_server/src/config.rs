//! Server configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use lln_core::config::Preset;
use lln_core::types::LARGE_SAMPLE_SIZE;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid maximum sample size: {0}. Must be at least {min}", min = LARGE_SAMPLE_SIZE)]
    InvalidMaxSampleSize(u64),

    #[error("Invalid preset: {0}. Must be one of: classic, log-scale")]
    InvalidPreset(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Largest sample size a request may ask for
    pub max_sample_size: u64,
    /// Preset used when a request names none
    pub default_preset: Preset,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            log_level: LogLevel::Info,
            max_sample_size: LARGE_SAMPLE_SIZE,
            default_preset: Preset::Classic,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Override fields from `LLN_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("LLN_SERVER_HOST") {
            self.host = host;
        }
        if let Ok(port_str) = std::env::var("LLN_SERVER_PORT") {
            self.port = port_str.parse().map_err(|_| ConfigError::InvalidPort(0))?;
        }
        if let Ok(log_level) = std::env::var("LLN_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&log_level)?;
        }
        if let Ok(max_str) = std::env::var("LLN_MAX_SAMPLE_SIZE") {
            self.max_sample_size = max_str
                .parse()
                .map_err(|_| ConfigError::InvalidMaxSampleSize(0))?;
        }
        if let Ok(preset) = std::env::var("LLN_DEFAULT_PRESET") {
            self.default_preset =
                Preset::from_str(&preset).map_err(|_| ConfigError::InvalidPreset(preset))?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        // The dashboard's large-n checkbox must always be servable
        if self.max_sample_size < LARGE_SAMPLE_SIZE {
            return Err(ConfigError::InvalidMaxSampleSize(self.max_sample_size));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(max) = cli.max_sample_size {
            self.max_sample_size = max;
        }
        if let Some(preset) = &cli.preset {
            self.default_preset =
                Preset::from_str(preset).map_err(|_| ConfigError::InvalidPreset(preset.clone()))?;
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Maximum sample size override
    pub max_sample_size: Option<u64>,
    /// Default preset override
    pub preset: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        ServerConfig::from_file(config_path)?
    } else {
        ServerConfig::default()
    };

    config.apply_env()?;
    config.merge_with_cli(cli)?;

    config.validate()?;
    Ok(config)
}
