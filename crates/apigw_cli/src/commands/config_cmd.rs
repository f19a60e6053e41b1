use std::path::Path;

use clap::Subcommand;
use tracing::{debug, error, info, instrument};

use crate::config::{get_config_path, AppConfig};
use crate::errors::Error;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the config command
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Create an initial configuration file
    Init,

    /// Show the current configuration with the secret key masked
    Show,
}

/// Execute the config command against the file at `path` (or the default).
#[instrument]
pub fn execute(cmd: &ConfigCommands, path: Option<&str>) -> Result<String, Error> {
    let config_path = get_config_path(path);
    match cmd {
        ConfigCommands::Init => init_config(&config_path),
        ConfigCommands::Show => show_config(&config_path),
    }
}

/// Writes a default configuration file. An existing file is left untouched.
#[instrument]
pub fn init_config(config_path: &Path) -> Result<String, Error> {
    debug!(message = "Initializing configuration", path = ?config_path);

    if config_path.exists() {
        let err = Error::Config(format!(
            "Configuration file already exists at {:?}",
            config_path
        ));
        error!(
            message = "Configuration file already exists",
            path = ?config_path,
            error = ?err
        );
        return Err(err);
    }

    AppConfig::default().save(config_path)?;

    info!(message = "Configuration initialized", path = ?config_path);
    Ok(format!("Configuration initialized at {:?}", config_path))
}

/// Renders the configuration file as TOML with the secret key masked.
#[instrument]
pub fn show_config(config_path: &Path) -> Result<String, Error> {
    let config = AppConfig::load(config_path)?;

    toml::to_string_pretty(&config.redacted())
        .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))
}
