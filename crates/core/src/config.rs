use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// "dev" unlocks the destructive admin reset endpoint.
    #[serde(default = "default_platform")]
    pub platform: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_expiry")]
    pub token_expiry_seconds: i64,
    #[serde(default = "default_refresh_expiry")]
    pub refresh_expiry_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served under /app.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            assets_dir: default_assets_dir(),
        }
    }
}

fn default_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_refresh_expiry() -> i64 {
    60 // days
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_assets_dir() -> String {
    ".".to_string()
}

fn default_platform() -> String {
    "prod".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from chirpr.toml (if present) with environment
    /// overrides. Environment variables use the CHIRPR_ prefix with a double
    /// underscore between nesting levels, e.g. CHIRPR_DATABASE__URL,
    /// CHIRPR_AUTH__JWT_SECRET, CHIRPR_SERVER__PORT, CHIRPR_PLATFORM.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("chirpr").required(false))
            .add_source(Environment::with_prefix("CHIRPR").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
