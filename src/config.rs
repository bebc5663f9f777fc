use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use platewise_shopping::{EstimateMode, EstimatorConfig};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub estimate: EstimateConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EstimateConfig {
    #[serde(default)]
    pub default_mode: EstimateMode,
    #[serde(default = "default_min_priced_items")]
    pub min_priced_items: usize,
    #[serde(default = "default_medium_missing_ratio")]
    pub medium_missing_ratio: f64,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            default_mode: EstimateMode::default(),
            min_priced_items: default_min_priced_items(),
            medium_missing_ratio: default_medium_missing_ratio(),
        }
    }
}

impl EstimateConfig {
    pub fn estimator(&self) -> EstimatorConfig {
        EstimatorConfig {
            default_mode: self.default_mode,
            min_priced_items: self.min_priced_items,
            medium_missing_ratio: self.medium_missing_ratio,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite:platewise.db".to_string()
}

fn default_min_priced_items() -> usize {
    3
}

fn default_medium_missing_ratio() -> f64 {
    0.2
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load from an optional TOML file plus `PLATEWISE__`-prefixed
    /// environment overrides (e.g. `PLATEWISE__SERVER__PORT=8080`).
    pub fn load(path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(&path));
        }

        builder
            .add_source(Environment::with_prefix("PLATEWISE").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.auth.jwt_secret.len() < 32 {
            return Err("auth.jwt_secret must be at least 32 bytes".to_string());
        }
        if !(0.0..=1.0).contains(&self.estimate.medium_missing_ratio) {
            return Err("estimate.medium_missing_ratio must be within 0.0..=1.0".to_string());
        }
        Ok(())
    }
}
