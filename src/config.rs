//! Run configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file, then
//! `STUNCOUNT_*` environment variables. Command-line flags are applied last
//! by the binary.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::archive::ExtractMode;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "stuncount.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "STUNCOUNT_";

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Archive of logs recorded with the tested condition
    pub with: PathBuf,
    /// Archive of logs recorded without it
    pub without: PathBuf,
    /// Extract archives to disk before analyzing
    pub extract: bool,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            with: PathBuf::from("WITH.zip"),
            without: PathBuf::from("WITHOUT.zip"),
            extract: false,
            format: OutputFormat::Table,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),
}

impl Config {
    /// Load configuration
    ///
    /// An explicit `file` must exist; otherwise [`DEFAULT_CONFIG_FILE`] is
    /// used when present.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let toml = match file {
            Some(path) if !path.is_file() => return Err(ConfigError::Missing(path.to_path_buf())),
            Some(path) => Toml::file(path),
            None => Toml::file(DEFAULT_CONFIG_FILE),
        };

        Self::figment(toml).extract().map_err(ConfigError::from)
    }

    fn figment(toml: figment::providers::Data<Toml>) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(toml)
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn extract_mode(&self) -> ExtractMode {
        if self.extract {
            ExtractMode::ToDisk
        } else {
            ExtractMode::InMemory
        }
    }
}
