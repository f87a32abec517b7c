//! Configuration for Catalog API

use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::StoreConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub store: StoreConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            store: StoreConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("DB_URL", Some("mongodb://localhost:27017")),
                ("DB_NAMESPACE", Some("admin")),
                ("DB_NAME", Some("catalog")),
                ("DB_USERNAME", Some("root")),
                ("DB_PASSWORD", Some("secret")),
                ("PORT", Some("8080")),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "catalog_api");
                assert_eq!(config.store.database(), "catalog");
                assert_eq!(config.store.credentials(), Some(("root", "secret")));
                assert_eq!(config.server.port, 8080);
                assert!(config.environment.is_production());
            },
        );
    }

    #[test]
    fn test_config_defaults_port() {
        temp_env::with_vars(
            [
                ("DB_URL", Some("mongodb://localhost:27017")),
                ("DB_NAMESPACE", Some("admin")),
                ("DB_NAME", Some("catalog")),
                ("PORT", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 3457);
            },
        );
    }

    #[test]
    fn test_config_requires_store_settings() {
        temp_env::with_vars(
            [
                ("DB_URL", Some("mongodb://localhost:27017")),
                ("DB_NAMESPACE", None::<&str>),
                ("DB_NAME", Some("catalog")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("DB_NAMESPACE"));
            },
        );
    }
}
