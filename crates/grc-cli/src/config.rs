//! CLI configuration.
//!
//! Resolution order for the library directory, last one wins:
//!
//! 1. built-in default (`policy-library`)
//! 2. `library_dir` in the config file (`--config`, else `./grc.yaml`)
//! 3. the `GRC_LIBRARY_DIR` environment variable
//! 4. the `--library` flag (applied by the caller)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "grc.yaml";

/// Library directory used when nothing else is configured.
pub const DEFAULT_LIBRARY_DIR: &str = "policy-library";

/// Environment variable overriding `library_dir`.
pub const LIBRARY_DIR_ENV: &str = "GRC_LIBRARY_DIR";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CliConfig {
    /// Directory holding `templates/` and `clients/`.
    pub library_dir: PathBuf,
    pub log_format: LogFormat,
    /// Pinned effective date (`YYYY-MM-DD`). Today when absent.
    pub effective_date: Option<NaiveDate>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            library_dir: PathBuf::from(DEFAULT_LIBRARY_DIR),
            log_format: LogFormat::Text,
            effective_date: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from the process environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Self::resolve(explicit, &cwd, std::env::var(LIBRARY_DIR_ENV).ok())
    }

    /// Load configuration with the working directory and environment
    /// override passed in.
    ///
    /// An explicit path must exist. The implicit `grc.yaml` is optional.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path, env_library: Option<String>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let implicit = cwd.join(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Self::from_file(&implicit)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(dir) = env_library.filter(|d| !d.trim().is_empty()) {
            tracing::debug!(library_dir = %dir, "library directory overridden by environment");
            config.library_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Parse a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }
}
