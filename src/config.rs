//! Configuration loading and resolution.
//!
//! Settings come from three layers, highest precedence first:
//!
//! 1. Command-line flags and their environment variables ([`Cli`])
//! 2. An optional YAML file passed with `--config`
//! 3. Built-in defaults
//!
//! ```yaml
//! endpoint: http://localhost:8000
//! timeout_secs: 10
//! format: text
//! ```

use crate::cli::Cli;
use crate::outputs::OutputFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Reasons the configuration for a run cannot be assembled.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid search endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
}

/// Contents of a config.yaml file. Every key is optional.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub format: Option<OutputFormat>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: Url,
    pub timeout: Duration,
    pub format: OutputFormat,
    pub color: bool,
}

/// Read and parse a YAML config file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let config: FileConfig = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(?config, "Parsed config file");
    Ok(config)
}

impl Settings {
    /// Resolve settings for this run, reading the config file if one was given.
    pub async fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => load_file_config(path).await?,
            None => FileConfig::default(),
        };
        let settings = Self::merge(cli, file)?;
        info!(
            endpoint = %settings.endpoint,
            timeout_secs = settings.timeout.as_secs(),
            format = ?settings.format,
            "Resolved settings"
        );
        Ok(settings)
    }

    /// Merge CLI values over file values over defaults.
    pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let endpoint = cli
            .endpoint
            .clone()
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            source,
        })?;

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
            format: cli.format.or(file.format).unwrap_or_default(),
            color: !cli.no_color,
        })
    }
}
