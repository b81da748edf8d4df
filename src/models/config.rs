use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Eviction policy for a single cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSpec {
    /// Upper bound on the number of entries.
    pub max_capacity: u64,
    /// Expire entries this many seconds after their last access.
    #[serde(default)]
    pub time_to_idle_secs: Option<u64>,
    /// Expire entries this many seconds after they were written.
    #[serde(default)]
    pub time_to_live_secs: Option<u64>,
}

impl CacheSpec {
    pub fn time_to_idle(&self) -> Option<Duration> {
        self.time_to_idle_secs.map(Duration::from_secs)
    }

    pub fn time_to_live(&self) -> Option<Duration> {
        self.time_to_live_secs.map(Duration::from_secs)
    }
}

/// Policies for the by-id and by-tree-root caches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub categories: CacheSpec,
    pub category_tree: CacheSpec,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            categories: CacheSpec {
                max_capacity: 5000,
                time_to_idle_secs: Some(15 * 60),
                time_to_live_secs: None,
            },
            category_tree: CacheSpec {
                max_capacity: 100,
                time_to_idle_secs: None,
                time_to_live_secs: Some(5 * 60),
            },
        }
    }
}

/// Configuration options for the HTTP server binary.
#[cfg(feature = "server")]
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    pub address: String,
    /// Port to bind.
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Load `config/default.yaml`, then `config/{APP_ENV}.yaml`, then
    /// `APP__`-prefixed environment variables, later sources winning.
    pub fn load() -> Result<Self, config::ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        config::Config::builder()
            .set_default("address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "app.db")?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{environment}")).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
