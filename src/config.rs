//! Configuration for the `godefinfo` driver.
//!
//! Loads `config.toml` with priority: `--config` path > the user config
//! directory (`<config dir>/godefinfo/config.toml`) > defaults.  Command
//! line flags are applied on top by the driver.

use std::path::{Path, PathBuf};

use etcetera::BaseStrategy;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Driver settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Print the structured JSON record instead of plain text.
    pub json: bool,
    /// Treat every front-end diagnostic except unused values as fatal.
    pub strict: bool,
    /// Go installation used to decide whether a package belongs to the
    /// standard distribution.  Falls back to `$GOROOT`.
    pub goroot: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `godefinfo=debug`.
    pub log_filter: Option<String>,
}

impl Config {
    /// Read and deserialize a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load with priority: explicit path > user config file > defaults.
    ///
    /// An explicit path must exist; a missing user config file is not an
    /// error.
    pub fn load_with_override(cli_override: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        match user_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// The configured GOROOT, or `$GOROOT`.
    pub fn goroot(&self) -> Option<PathBuf> {
        self.goroot
            .clone()
            .or_else(|| std::env::var_os("GOROOT").map(PathBuf::from))
    }
}

/// `<config dir>/godefinfo/config.toml`, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("godefinfo").join("config.toml"))
}
