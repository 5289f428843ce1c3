//! Privacy provider configuration.

use std::env;
use std::path::PathBuf;

use common::{DatabaseConfig, ServiceConfig};
use domain::{ACTIVITY_MODULE_NAME, PLUGIN_COMPONENT};

/// Default directory for export packages.
const DEFAULT_EXPORT_DIR: &str = "privacy-export";

const SERVICE_NAME: &str = "privacy-provider";

/// Module names used to scope the provider's queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Module type whose contexts are reported for a user
    pub activity_module: String,
    /// Module name that user listing and bulk deletion join against
    pub plugin_module: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            activity_module: ACTIVITY_MODULE_NAME.to_string(),
            plugin_module: PLUGIN_COMPONENT.to_string(),
        }
    }
}

/// Privacy service configuration.
#[derive(Debug, Clone)]
pub struct PrivacyServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    /// Root directory for export packages
    pub export_dir: PathBuf,
    pub provider: ProviderSettings,
}

impl PrivacyServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                log_level: env::var("PRIVACY_LOG_LEVEL")
                    .unwrap_or(defaults.service.log_level),
            },
            database: DatabaseConfig {
                url: env::var("PRIVACY_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: env::var("PRIVACY_DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.max_connections),
                min_connections: env::var("PRIVACY_DB_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.min_connections),
            },
            export_dir: env::var("PRIVACY_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            provider: ProviderSettings {
                activity_module: env::var("PRIVACY_ACTIVITY_MODULE")
                    .unwrap_or(defaults.provider.activity_module),
                plugin_module: env::var("PRIVACY_PLUGIN_MODULE")
                    .unwrap_or(defaults.provider.plugin_module),
            },
        }
    }
}

impl Default for PrivacyServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: SERVICE_NAME.to_string(),
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            provider: ProviderSettings::default(),
        }
    }
}
