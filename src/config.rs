//! Configuration management for Basic Fetch
//!
//! Configuration is assembled from several sources, later ones winning:
//! 1. Default values
//! 2. Config file (explicit path, `./basic-fetch.toml`, or the user config dir)
//! 3. Environment variables (`BASIC_FETCH_*`, optionally from `.env`)
//! 4. CLI arguments (applied by the command handlers)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::ClientConfig;
use crate::constants::{config as paths, endpoint, env, http, logging};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client and endpoint settings
    pub client: ClientConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Base URL of the item endpoint
    pub base_url: String,
    /// Resource path relative to the base URL
    pub resource_path: String,
    /// Request timeout, e.g. "30s"
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Connect timeout, e.g. "10s"
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
    /// Connection pool idle timeout (absent = no timeout)
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub pool_idle_timeout: Option<Duration>,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            base_url: endpoint::BASE_URL.to_string(),
            resource_path: endpoint::RESOURCE_PATH.to_string(),
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            tcp_nodelay: true,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
    /// Enable colored output
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
            colored_output: true,
        }
    }
}

impl AppConfig {
    /// Convert TOML-friendly configuration to the runtime client configuration
    pub fn to_runtime_config(&self) -> ClientConfig {
        self.client.to_runtime_config()
    }

    /// Load configuration from file and environment
    ///
    /// An explicitly requested file must exist; the default locations are
    /// optional.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let config_path = match config_file_override {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound { path }),
            Some(path) => Some(path),
            None => Self::find_config_file(),
        };

        if let Some(path) = config_path {
            debug!("Loading config from: {}", path.display());
            config = Self::load_from_file(&path).await?;
        }

        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `BASIC_FETCH_*` overrides using the given variable lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(env::BASE_URL) {
            debug!("Base URL overridden by {}", env::BASE_URL);
            self.client.base_url = base_url;
        }

        if let Some(raw) = lookup(env::TIMEOUT) {
            self.client.request_timeout =
                humantime::parse_duration(&raw).map_err(|e| ConfigError::InvalidValue {
                    field: env::TIMEOUT.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            debug!("Request timeout overridden by {}", env::TIMEOUT);
        }

        if let Some(level) = lookup(env::LOG_LEVEL) {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Check values that would otherwise fail later at runtime
    pub fn validate(&self) -> ConfigResult<()> {
        if let Err(e) = self.to_runtime_config().endpoint() {
            return Err(ConfigError::InvalidValue {
                field: "client.base_url".to_string(),
                value: self.client.base_url.clone(),
                reason: e.to_string(),
            });
        }

        if self.client.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "client.request_timeout".to_string(),
                value: "0s".to_string(),
                reason: "Timeout must be greater than zero".to_string(),
            });
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !logging::LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Expected one of: {}", logging::LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Write the default configuration file to the user config directory
    ///
    /// Returns the path written. An existing file is only replaced with `force`.
    pub async fn initialize(force: bool) -> ConfigResult<PathBuf> {
        let config_path = Self::default_config_path()?;
        Self::write_default_to(&config_path, force).await?;
        Ok(config_path)
    }

    /// Write the default configuration file to `path`
    pub async fn write_default_to(path: &Path, force: bool) -> ConfigResult<()> {
        if path.exists() && !force {
            info!("Config file already exists: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, Self::generate_default_config_content())
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Wrote default configuration to {}", path.display());
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(format!("./{}", paths::LOCAL_FILE_NAME))];
        if let Ok(user_path) = Self::default_config_path() {
            search_paths.push(user_path);
        }

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(paths::APP_DIR_NAME).join(paths::FILE_NAME))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate default configuration content with helpful comments
    fn generate_default_config_content() -> String {
        let defaults = ClientConfigToml::default();

        format!(
            r#"# Basic Fetch Configuration
# Every setting is optional; missing values fall back to these defaults.

[client]
# Item list endpoint: <base_url>/<resource_path>
base_url = "{}"
resource_path = "{}"

# Timeouts use humantime syntax ("500ms", "30s", "1m")
request_timeout = "{}"
connect_timeout = "{}"
pool_idle_timeout = "{}"
tcp_nodelay = true

[logging]
level = "{}"  # error, warn, info, debug, trace
colored_output = true
"#,
            defaults.base_url,
            defaults.resource_path,
            humantime::format_duration(defaults.request_timeout),
            humantime::format_duration(defaults.connect_timeout),
            humantime::format_duration(http::POOL_IDLE_TIMEOUT),
            logging::DEFAULT_LOG_LEVEL,
        )
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            resource_path: self.resource_path.clone(),
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            tcp_nodelay: self.tcp_nodelay,
            pool_idle_timeout: self.pool_idle_timeout,
            ..ClientConfig::default()
        }
    }
}
