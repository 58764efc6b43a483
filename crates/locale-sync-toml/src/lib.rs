#![doc = include_str!("../README.md")]

use fs_err as fs;
use locale_sync_core::{Params, RemoteLocale, Target};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up by [`Config::discover`].
pub const CONFIG_FILE_NAME: &str = ".locale-sync.toml";

/// Environment variable overriding the configured access token.
pub const ACCESS_TOKEN_ENV: &str = "LOCALE_SYNC_ACCESS_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error(".locale-sync.toml configuration file not found")]
    NotFound,
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Whether an entry describes a download target or an upload source.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TargetKind {
    Pull,
    Push,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Pull => f.write_str("pull"),
            TargetKind::Push => f.write_str("push"),
        }
    }
}

/// A single `[[pull.targets]]` or `[[push.sources]]` entry.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TargetConfig {
    /// The file pattern, e.g. `./locales/<locale_code>.yml`.
    pub file: String,
    /// Overrides the top-level project id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Overrides the top-level access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub params: Params,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PullConfig {
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PushConfig {
    #[serde(default)]
    pub sources: Vec<TargetConfig>,
}

/// The configuration for `locale-sync`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// The remote project the targets belong to.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Token used to authenticate against the remote API.
    ///
    /// Overridden by the `LOCALE_SYNC_ACCESS_TOKEN` environment variable.
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
    /// Default file format of all targets (e.g., "yml", "json").
    #[serde(default)]
    pub file_format: Option<String>,
    #[serde(default)]
    pub pull: PullConfig,
    #[serde(default)]
    pub push: PushConfig,
}

impl Config {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound);
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.apply_env();
        Ok(config)
    }

    /// Finds the closest `.locale-sync.toml` in `start` or one of its ancestors.
    pub fn find_config_path(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Reads the closest configuration file above `start`.
    pub fn discover(start: &Path) -> Result<(PathBuf, Self), ConfigError> {
        let path = Self::find_config_path(start).ok_or(ConfigError::NotFound)?;
        let config = Self::read_from_path(&path)?;
        Ok((path, config))
    }

    fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV)
            && !token.is_empty()
        {
            self.access_token = Some(token);
        }
    }

    /// Returns the configured entries of the given kind.
    pub fn entries(&self, kind: TargetKind) -> &[TargetConfig] {
        match kind {
            TargetKind::Pull => &self.pull.targets,
            TargetKind::Push => &self.push.sources,
        }
    }

    /// Builds one [`Target`] per configured entry of the given kind.
    ///
    /// Entry-level project ids and tokens take precedence over the top-level
    /// ones. The environment token, when set, wins over both.
    pub fn targets(&self, kind: TargetKind, remote_locales: &[RemoteLocale]) -> Vec<Target> {
        let env_token = std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty());

        self.entries(kind)
            .iter()
            .map(|entry| Target {
                file: entry.file.clone(),
                file_format: self.file_format.clone().unwrap_or_default(),
                project_id: entry
                    .project_id
                    .clone()
                    .or_else(|| self.project_id.clone())
                    .unwrap_or_default(),
                access_token: env_token
                    .clone()
                    .or_else(|| entry.access_token.clone())
                    .or_else(|| self.access_token.clone())
                    .unwrap_or_default(),
                params: entry.params.clone(),
                remote_locales: remote_locales.to_vec(),
            })
            .collect()
    }
}
