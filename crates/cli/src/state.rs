use std::path::{Path, PathBuf};

use mfs::{Config, ConfigError};

pub const APP_NAME: &str = "ipfs-mfs";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Where the CLI keeps its config, and what it loaded from there.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config_path: PathBuf,
    pub config: Config,
}

impl AppState {
    /// Config directory: the override if given, else `~/.ipfs-mfs`.
    pub fn dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Load the config if one was written, falling back to defaults.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let dir = Self::dir(custom_path)?;
        let config_path = dir.join(CONFIG_FILE_NAME);

        let config = if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading config");
            Config::load(&config_path)?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Config::default()
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Write `config` into the config directory, creating it if needed.
    pub fn init(custom_path: Option<PathBuf>, config: Config, force: bool) -> Result<Self, StateError> {
        let dir = Self::dir(custom_path)?;
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() && !force {
            return Err(StateError::AlreadyInitialized(config_path));
        }

        std::fs::create_dir_all(&dir)?;
        write_config(&config_path, &config)?;
        tracing::info!(path = %config_path.display(), "wrote config");

        Ok(Self {
            config_path,
            config,
        })
    }
}

fn write_config(path: &Path, config: &Config) -> Result<(), StateError> {
    std::fs::write(path, config.to_toml()?)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("could not determine home directory")]
    NoHomeDirectory,

    #[error("config already exists at {0} (use --force to overwrite)")]
    AlreadyInitialized(PathBuf),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
