//! Configuration for the knowledge base shell.
//!
//! Every section and field has a default, so an empty file is a valid config:
//!
//! ```toml
//! [loader]
//! policy = "skip"          # or "abort"
//! skip_blank_lines = true
//!
//! [output]
//! format = "text"          # or "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What the loader does with a line it cannot parse.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Report the line and keep loading.
    #[default]
    Skip,
    /// Stop at the first bad line. Facts already loaded stay in the tree.
    Abort,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Loader settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderConfig {
    pub policy: LoadPolicy,

    /// Ignore lines that are empty or whitespace only.
    pub skip_blank_lines: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            policy: LoadPolicy::Skip,
            skip_blank_lines: true,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct KbConfig {
    pub loader: LoaderConfig,
    pub output: OutputConfig,
}

/// Errors raised while reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl KbConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
