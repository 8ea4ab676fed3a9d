use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::path::PathBuf;

use crate::core::AppError;

#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub images: ImageCacheConfig,
    pub theme: ThemeOutputConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir().map_err(|e| {
            config::ConfigError::Message(format!("Failed to find the current dir: {}", e))
        })?;
        let config_dir = base_path.join("src/core/configurations");

        let app_environment: Environment = std::env::var("SALONEO_APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(config::ConfigError::Message)?;

        Self::from_dir(config_dir, app_environment)
    }

    /// Loads `base` plus the overlay for `environment` from `config_dir`,
    /// then applies `SALONEO__SECTION__KEY` environment overrides.
    pub fn from_dir(
        config_dir: PathBuf,
        environment: Environment,
    ) -> Result<Self, config::ConfigError> {
        let configurations = config::Config::builder()
            .add_source(config::File::from(config_dir.join("base")).required(true))
            .add_source(config::File::from(config_dir.join(environment.as_str())).required(false))
            .add_source(
                config::Environment::with_prefix("SALONEO")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        configurations.try_deserialize()
    }
}

#[derive(Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub auth_token: Option<Secret<String>>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotBackend {
    File,
    Redis,
    Memory,
}

#[derive(Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: SnapshotBackend,
    pub directory: Option<String>,
    pub redis: Option<RedisConfig>,
}

#[derive(Deserialize, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: String,
    pub password: Option<Secret<String>>,
}

impl RedisConfig {
    pub fn connect(&self) -> Result<redis::Client, AppError> {
        let password = self
            .password
            .as_ref()
            .map(|p| p.expose_secret().as_str())
            .unwrap_or("");
        let url = format!(
            "redis://:{password}@{host}:{port}",
            password = password,
            host = self.host,
            port = self.port
        );
        redis::Client::open(url).map_err(AppError::from)
    }
}

#[derive(Deserialize, Clone)]
pub struct ImageCacheConfig {
    pub directory: String,
    /// Treat `http(s)` urls as resolvable without a cached copy.
    #[serde(default = "default_remote_urls_available")]
    pub remote_urls_available: bool,
}

fn default_remote_urls_available() -> bool {
    true
}

#[derive(Deserialize, Clone)]
pub struct ThemeOutputConfig {
    pub output_path: String,
}

#[derive(Deserialize, Clone)]
pub struct LoggingConfig {
    pub directory: String,
    pub level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not supported environment. Use either `local`, `staging` or `production` ",
                other
            )),
        }
    }
}
