//! Configuration module
//!
//! Environment-driven settings for the document service: server, database
//! pool, blob root, placeholder assets and the public URLs the service
//! synthesizes.

use std::env;
use std::path::PathBuf;

// Common constants
const SERVER_PORT: u16 = 80;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const SERVICE_NAME: &str = "oe";
const ASSETS_PATH: &str = "./assets";
const PUBLIC_BASE_URL: &str = "https://pcm.groupclaes.be";
const THUMBNAIL_REDIRECT_BASE_URL: &str = "https://pcm.groupclaes.be/v4/product-images";

/// Base configuration shared by every process
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

/// Document service configuration
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    /// Root of the blob tree; blobs live under `<data_path>/content`.
    pub data_path: PathBuf,
    /// Directory holding the six `404*.svg|png` placeholders.
    pub assets_path: PathBuf,
    pub app_version: Option<String>,
    pub service_name: String,
    pub public_base_url: String,
    pub thumbnail_redirect_base_url: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn as_service(&self) -> &ServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_service().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_service().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_service().base.environment
    }

    pub fn database_url(&self) -> &str {
        &self.as_service().database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_service().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_service().base.db_timeout_seconds
    }

    pub fn data_path(&self) -> &PathBuf {
        &self.as_service().data_path
    }

    pub fn assets_path(&self) -> &PathBuf {
        &self.as_service().assets_path
    }

    pub fn app_version(&self) -> Option<&str> {
        self.as_service().app_version.as_deref()
    }

    pub fn service_name(&self) -> &str {
        &self.as_service().service_name
    }

    pub fn public_base_url(&self) -> &str {
        self.as_service().public_base_url.trim_end_matches('/')
    }

    pub fn thumbnail_redirect_base_url(&self) -> &str {
        self.as_service()
            .thumbnail_redirect_base_url
            .trim_end_matches('/')
    }

    /// Version segment with a leading slash, or empty when unversioned.
    pub fn version_segment(&self) -> String {
        match self.app_version() {
            Some(version) => format!("/{}", version),
            None => String::new(),
        }
    }

    /// Route prefix the service is mounted under: `[/<version>]/<service>`.
    pub fn route_prefix(&self) -> String {
        format!("{}/{}", self.version_segment(), self.service_name())
    }

    /// Host part of the public base URL, as used in the content security policy.
    pub fn public_host(&self) -> &str {
        let url = self.public_base_url();
        let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
        without_scheme.split('/').next().unwrap_or(without_scheme)
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
        };

        let app_version = env::var("APP_VERSION")
            .ok()
            .map(|v| v.trim().trim_matches('/').to_string())
            .filter(|v| !v.is_empty());

        Ok(ServiceConfig {
            base,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            data_path: env::var("DATA_PATH")
                .map(PathBuf::from)
                .map_err(|_| anyhow::anyhow!("DATA_PATH must be set"))?,
            assets_path: PathBuf::from(
                env::var("ASSETS_PATH").unwrap_or_else(|_| ASSETS_PATH.to_string()),
            ),
            app_version,
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| SERVICE_NAME.to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| PUBLIC_BASE_URL.to_string()),
            thumbnail_redirect_base_url: env::var("THUMBNAIL_REDIRECT_BASE_URL")
                .unwrap_or_else(|_| THUMBNAIL_REDIRECT_BASE_URL.to_string()),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.database_url.starts_with("postgresql://")
            || self.database_url.starts_with("postgres://"))
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.data_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("DATA_PATH cannot be empty"));
        }

        if self.service_name.trim().is_empty() || self.service_name.contains('/') {
            return Err(anyhow::anyhow!(
                "SERVICE_NAME must be a single non-empty path segment"
            ));
        }

        for (name, url) in [
            ("PUBLIC_BASE_URL", &self.public_base_url),
            ("THUMBNAIL_REDIRECT_BASE_URL", &self.thumbnail_redirect_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!("{} must be an absolute http(s) URL", name));
            }
        }

        if self.base.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be greater than 0"));
        }

        Ok(())
    }
}
