//! Rule configuration persistence
//!
//! Stored as TOML through confy. Loading always applies version migration and
//! writes the migrated file back.

use std::path::{Path, PathBuf};

use mapmark_types::RuleConfiguration;
use thiserror::Error;

pub const APP_NAME: &str = "mapmark";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error at {path:?}: {source}")]
    Confy {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },
    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// Platform config file location
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    confy::get_configuration_file_path(APP_NAME, None).map_err(|_| ConfigError::NoConfigDir)
}

/// Load from an explicit path, creating it with defaults if missing
pub fn load_config_from(path: &Path) -> Result<RuleConfiguration, ConfigError> {
    let mut config: RuleConfiguration =
        confy::load_path(path).map_err(|source| ConfigError::Confy {
            path: path.to_path_buf(),
            source,
        })?;

    if config.migrate() {
        tracing::info!(version = config.version, "Migrated configuration");
        save_config_to(path, &config)?;
    }
    Ok(config)
}

pub fn save_config_to(path: &Path, config: &RuleConfiguration) -> Result<(), ConfigError> {
    confy::store_path(path, config).map_err(|source| ConfigError::Confy {
        path: path.to_path_buf(),
        source,
    })
}

/// Load from the default location, falling back to defaults on any error
pub fn load_config() -> RuleConfiguration {
    let loaded = default_config_path().and_then(|path| load_config_from(&path));
    match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load configuration, using defaults");
            RuleConfiguration::default()
        }
    }
}
