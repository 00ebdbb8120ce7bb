use serde::Deserialize;
use std::env;
use tripwise_core::{HttpLocationResolver, ValidationRules};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub geolocation: GeolocationConfig,
    #[serde(default)]
    pub booking: ValidationRules,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeolocationConfig {
    /// Look up the caller's country once to default the citizenship
    pub enabled: bool,
    pub endpoint: String,
    /// No timeout unless set
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON catalog to use instead of the built-in one
    #[serde(default)]
    pub path: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("server.port", 8080)?
            .set_default("geolocation.enabled", true)?
            .set_default("geolocation.endpoint", HttpLocationResolver::DEFAULT_ENDPOINT)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. TRIPWISE__SERVER__PORT=9090
            .add_source(
                config::Environment::with_prefix("TRIPWISE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_with_defaults() {
        let s = config::Config::builder()
            .set_default("server.port", 9090)
            .unwrap()
            .set_default("geolocation.enabled", false)
            .unwrap()
            .set_default("geolocation.endpoint", "http://localhost/where")
            .unwrap()
            .build()
            .unwrap();

        let config: Config = s.try_deserialize().unwrap();
        assert_eq!(config.server.port, 9090);
        assert!(!config.geolocation.enabled);
        assert_eq!(config.geolocation.timeout_secs, None);
        assert_eq!(config.booking.max_days, 30);
        assert!(config.catalog.path.is_none());
    }
}
