use crate::core::{CliError, ConfigFileError, ConfigNotFoundError, LoadedConfig};
use clap::{ArgAction, Args};
use locale_sync_toml::{CONFIG_FILE_NAME, Config, ConfigError};
use std::path::{Path, PathBuf};

/// Arguments shared by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Path to the configuration file (defaults to the closest .locale-sync.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Deterministic output for end-to-end tests.
    #[arg(long, hide = true, global = true)]
    pub e2e: bool,
}

impl GlobalArgs {
    /// Load the configuration named by `--config`, or discover it from the
    /// working directory.
    pub fn load_config(&self) -> Result<LoadedConfig, CliError> {
        match &self.config {
            Some(path) => {
                let config = Config::read_from_path(path).map_err(|err| config_error(path, err))?;
                Ok(LoadedConfig {
                    path: path.clone(),
                    config,
                })
            },
            None => {
                let cwd = std::env::current_dir()?;
                let (path, config) = Config::discover(&cwd)
                    .map_err(|err| config_error(&cwd.join(CONFIG_FILE_NAME), err))?;
                tracing::debug!(path = %path.display(), "discovered configuration");
                Ok(LoadedConfig { path, config })
            },
        }
    }
}

fn config_error(path: &Path, err: ConfigError) -> CliError {
    match err {
        ConfigError::NotFound => ConfigNotFoundError {
            expected_path: path.to_path_buf(),
        }
        .into(),
        other => ConfigFileError {
            path: path.to_path_buf(),
            help: other.to_string(),
        }
        .into(),
    }
}
