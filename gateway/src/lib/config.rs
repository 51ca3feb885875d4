use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use url::Url;

use crate::downstream::DownstreamService;
use crate::downstream::DownstreamTarget;
use crate::downstream::DownstreamTargets;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub keys: KeysConfig,
    pub services: ServicesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Paths to the RS256 signing keypair.
#[derive(Debug, Deserialize, Clone)]
pub struct KeysConfig {
    pub private_key_path: String,
    pub public_key_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub order_service: ServiceConfig,
    pub inventory_service: ServiceConfig,
    pub payment_service: ServiceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, KEYS__PRIVATE_KEY_PATH, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: SERVICES__ORDER_SERVICE__BASE_URL=http://orders:8080
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Resolve the `services` section into downstream targets.
    ///
    /// # Errors
    /// * `ConfigError::Message` - A base URL does not parse
    pub fn downstream_targets(&self) -> Result<DownstreamTargets, ConfigError> {
        Ok(DownstreamTargets::new(
            self.services
                .order_service
                .resolve(DownstreamService::Orders)?,
            self.services
                .inventory_service
                .resolve(DownstreamService::Inventory)?,
            self.services
                .payment_service
                .resolve(DownstreamService::Payments)?,
        ))
    }
}

impl ServiceConfig {
    fn resolve(&self, service: DownstreamService) -> Result<DownstreamTarget, ConfigError> {
        let base_url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Message(format!(
                "Invalid base_url for {} service '{}': {}",
                service, self.base_url, e
            ))
        })?;

        Ok(DownstreamTarget {
            base_url,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}
