//! Configuration management for the `apigw` CLI.
//!
//! The configuration is stored in TOML format and can be loaded from a
//! specified file path or from `apigw.toml` in the current directory.
//! Credentials from the environment take precedence over the file.
//!
//! ```toml
//! [client]
//! base_url = "https://apigateway.apigw.ntruss.com/api/v1"
//! timeout_seconds = 30
//!
//! [credentials]
//! access_key = "ACCESSKEY"
//! secret_key = "..."
//! ```

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use apigw_client::signer::{ACCESS_KEY_ENV, SECRET_KEY_ENV};
use apigw_client::{ApiGatewayClient, ClientConfig, Credentials, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "apigw.toml";

const REDACTED: &str = "********";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the `apigw` CLI.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub client: ClientSection,

    #[serde(default)]
    pub credentials: CredentialsSection,
}

/// Where and how to reach the API Gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSection {
    #[serde(default = "ClientSection::default_base_url")]
    pub base_url: String,

    /// Request timeout. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl ClientSection {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_seconds: None,
        }
    }
}

/// Credentials stored in the configuration file.
#[derive(Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

impl fmt::Debug for CredentialsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsSection")
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read,
    /// or does not contain a valid configuration.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the configuration file if there is one, otherwise the defaults.
    ///
    /// Running without a file is valid as long as the credentials come from
    /// the environment.
    pub fn load_or_default(path: &Path) -> Result<Self, Error> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file, creating parent directories
    /// as needed and overwriting any existing file.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// A copy safe to print: the secret key is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.credentials.secret_key.is_some() {
            copy.credentials.secret_key = Some(REDACTED.to_string());
        }
        copy
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.client.base_url.clone(),
            timeout: self.client.timeout_seconds.map(Duration::from_secs),
            ..Default::default()
        }
    }

    /// Resolves the credentials from the process environment and the file.
    pub fn credentials(&self) -> Result<Credentials, Error> {
        self.credentials_with(|name| std::env::var(name).ok())
    }

    /// Resolves the credentials, looking each key up in `env` first.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `Error::Auth` naming the first key that has no value.
    pub fn credentials_with<F>(&self, env: F) -> Result<Credentials, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |name: &str, file_value: &Option<String>| {
            env(name)
                .filter(|v| !v.is_empty())
                .or_else(|| file_value.clone().filter(|v| !v.is_empty()))
                .ok_or_else(|| {
                    Error::Auth(format!(
                        "No value for {}. Set the environment variable or add it to the [credentials] section of {}",
                        name, DEFAULT_CONFIG_FILENAME
                    ))
                })
        };

        let access_key = resolve(ACCESS_KEY_ENV, &self.credentials.access_key)?;
        let secret_key = resolve(SECRET_KEY_ENV, &self.credentials.secret_key)?;
        Ok(Credentials::new(access_key, secret_key))
    }

    /// Builds an SDK client from this configuration.
    pub fn build_client(&self) -> Result<ApiGatewayClient, Error> {
        let credentials = self.credentials()?;
        Ok(ApiGatewayClient::new(self.client_config(), credentials)?)
    }
}

/// Resolves the path to the configuration file.
///
/// Uses `config_path` when given, otherwise `apigw.toml` in the current
/// directory.
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
