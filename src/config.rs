use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

use crate::stores::SyntheticMode;
use crate::terms::default_terms;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub fetch: FetchConfig,
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub stores: StoresConfig,
    #[serde(default)]
    pub feeds: Vec<FeedConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: u64,
}

/// Settings for the resilient HTTP client used by network-backed adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
    pub backoff_factor: u32,
    pub request_timeout_secs: u64,
    pub politeness_delay_ms: u64,
    pub user_agent: String,
    /// Development-only trust decision: skips TLS certificate validation.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl FetchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }

    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base_ms: 1000,
            backoff_factor: 2,
            request_timeout_secs: 10,
            politeness_delay_ms: 1000,
            user_agent: "GroceryWatcher/0.1".to_string(),
            accept_invalid_certs: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub interval_hours: u64,
    #[serde(default = "default_true")]
    pub run_on_start: bool,
    #[serde(default)]
    pub parallel_stores: bool,
    /// Replaces the built-in term catalog when present.
    #[serde(default)]
    pub terms: Option<Vec<String>>,
}

impl SchedulerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours * 3600)
    }

    pub fn resolved_terms(&self) -> Vec<String> {
        match &self.terms {
            Some(terms) => terms.clone(),
            None => default_terms(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_hours: 48,
            run_on_start: true,
            parallel_stores: false,
            terms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoresConfig {
    #[serde(default)]
    pub synthetic_mode: SyntheticMode,
    #[serde(default = "default_seed")]
    pub synthetic_seed: u64,
    #[serde(default)]
    pub tesco: RetailerConfig,
    #[serde(default)]
    pub supervalu: RetailerConfig,
    #[serde(default)]
    pub dunnes: RetailerConfig,
    #[serde(default)]
    pub lidl: RetailerConfig,
    #[serde(default)]
    pub aldi: RetailerConfig,
}

impl Default for StoresConfig {
    fn default() -> Self {
        Self {
            synthetic_mode: SyntheticMode::default(),
            synthetic_seed: default_seed(),
            tesco: RetailerConfig::default(),
            supervalu: RetailerConfig::default(),
            dunnes: RetailerConfig::default(),
            lidl: RetailerConfig::default(),
            aldi: RetailerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub delay_ms: Option<u64>,
}

impl Default for RetailerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: None,
        }
    }
}

/// A retailer reachable through a JSON search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub name: String,
    pub website: String,
    /// Must contain a `{term}` placeholder.
    pub search_url: String,
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 9001,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_seed() -> u64 {
    42
}

/// Profile loaded when `RUN_MODE` is unset.
pub const DEFAULT_RUN_MODE: &str = "production";

impl AppConfig {
    /// Load `dir` with the profile named by `RUN_MODE`.
    pub fn from_dir(dir: &str) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| DEFAULT_RUN_MODE.into());
        Self::from_profile(dir, &run_mode)
    }

    pub fn from_profile(dir: &str, run_mode: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/default", dir)))
            .add_source(File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Local overrides (ignored by git)
            .add_source(File::with_name(&format!("{}/local", dir)).required(false))
            .add_source(Environment::with_prefix("GROCERY").separator("__"))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Log settings that weaken safety. Call once logging is installed.
    pub fn warn_on_unsafe_settings(&self) {
        if self.fetch.accept_invalid_certs {
            tracing::warn!("TLS certificate validation is disabled (fetch.accept_invalid_certs)");
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Message("Database max_connections must be greater than 0".into()));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Message("Database min_connections cannot exceed max_connections".into()));
        }

        if self.fetch.max_attempts == 0 {
            return Err(ConfigError::Message("Fetch max_attempts must be greater than 0".into()));
        }

        if self.fetch.request_timeout_secs == 0 {
            return Err(ConfigError::Message("Fetch request_timeout_secs must be greater than 0".into()));
        }

        if self.fetch.backoff_factor == 0 {
            return Err(ConfigError::Message("Fetch backoff_factor must be at least 1".into()));
        }

        if self.scheduler.interval_hours == 0 {
            return Err(ConfigError::Message("Scheduler interval_hours must be greater than 0".into()));
        }

        if let Some(terms) = &self.scheduler.terms {
            if terms.iter().all(|t| t.trim().is_empty()) {
                return Err(ConfigError::Message("Scheduler terms cannot be empty".into()));
            }
        }

        for feed in &self.feeds {
            if Url::parse(&feed.website).is_err() {
                return Err(ConfigError::Message(format!("Invalid website URL for feed {}", feed.name)));
            }
            if !feed.search_url.contains("{term}") {
                return Err(ConfigError::Message(format!(
                    "Feed {} search_url must contain a {{term}} placeholder",
                    feed.name
                )));
            }
            if Url::parse(&feed.search_url.replace("{term}", "milk")).is_err() {
                return Err(ConfigError::Message(format!("Invalid search URL for feed {}", feed.name)));
            }
        }

        if self.metrics.enabled && self.metrics.port == 0 {
            return Err(ConfigError::Message("Metrics port must be greater than 0".into()));
        }

        Ok(())
    }
}
