//! Application configuration: a TOML file in the user's config directory,
//! seeded with defaults on first run, with an environment override for
//! deployments that cannot edit the file.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use ration_bridge::config::Config;
use tokio::fs;

/// Environment variable that overrides the configured API endpoint.
const API_ENDPOINT_VAR: &str = "RATION_API_ENDPOINT";

/// Errors that can occur while loading or saving application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration or data directories. This
    /// usually occurs when required environment variables are missing (e.g.,
    /// `$HOME` on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the configuration to TOML (e.g., when seeding the default file).
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Filesystem locations the store keeps between runs: the configuration
/// file and the local key/value storage file.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub config_path: PathBuf,
    pub storage_path: PathBuf,
}

/// Resolves the per-user locations of the config and storage files.
pub fn resolve_paths() -> Result<StorePaths, ConfigError> {
    let dirs = ProjectDirs::from("ru", "ration", "ration")
        .ok_or(ConfigError::DirectoriesNotFound)?;

    Ok(StorePaths {
        config_path: dirs.config_dir().join("config.toml"),
        storage_path: dirs.data_dir().join("storage.toml"),
    })
}

/// Loads the configuration. A missing file is seeded with defaults through
/// [`save_config`]; any other read or parse problem propagates.
///
/// After the file is read, a `RATION_API_ENDPOINT` environment value wins
/// over whatever it says, and the endpoint loses its trailing slash so
/// request paths can be appended directly.
pub async fn load_config(paths: &StorePaths) -> Result<Config, ConfigError> {
    log::info!("Loading configuration from {:?}", paths.config_path);

    let mut config = match fs::read_to_string(&paths.config_path).await {
        Ok(contents) => toml::from_str(&contents)?,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            let config = Config::default();
            save_config(paths, &config).await?;
            config
        }
        Err(error) => return Err(error.into()),
    };

    if let Ok(endpoint) = env::var(API_ENDPOINT_VAR) {
        log::info!("API endpoint overridden via {API_ENDPOINT_VAR}");
        config.api_endpoint = endpoint;
    }
    config.api_endpoint = config.api_endpoint.trim_end_matches('/').to_string();

    Ok(config)
}

/// Writes the configuration to disk, creating the config directory on the
/// way. Also used to seed the default file on first run.
pub async fn save_config(paths: &StorePaths, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = paths.config_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    fs::write(&paths.config_path, toml::to_string_pretty(config)?).await?;
    Ok(())
}
