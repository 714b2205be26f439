use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_ALLOW_ORIGINS: &str = "http://localhost:5173";
/// MongoDB refuses documents above 16 MiB; the stored image also carries its
/// name, type and id, so the body limit stays a mebibyte below that.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;
const MONGO_MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Comma separated list of origins, or `*`
    pub allow_origins: String,
    /// Directory holding the built single-page front-end
    pub static_dir: String,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Load HTTP server configuration from environment variables
    ///
    /// Expected environment variables:
    /// - APP_HOST: bind address (defaults to 0.0.0.0)
    /// - PORT: listening port (defaults to 5000)
    /// - ALLOW_ORIGINS: CORS origins (defaults to http://localhost:5173)
    /// - STATIC_DIR: front-end bundle directory (defaults to ./client/dist)
    /// - MAX_UPLOAD_BYTES: request body limit for image uploads (defaults to 15 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading application configuration from environment variables");

        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                error!("Invalid PORT value: {}", raw);
                ConfigError::InvalidValue(format!("PORT: {}", raw))
            })?,
            Err(_) => {
                warn!("PORT not set, using default: {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let allow_origins = env::var("ALLOW_ORIGINS")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ALLOW_ORIGINS.to_string());
        debug!("CORS allowed origins: {}", allow_origins);

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "./client/dist".to_string());
        debug!("Static bundle directory: {}", static_dir);

        let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| {
                error!("Invalid MAX_UPLOAD_BYTES value: {}", raw);
                ConfigError::InvalidValue(format!("MAX_UPLOAD_BYTES: {}", raw))
            })?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let config = AppConfig {
            host,
            port,
            allow_origins,
            static_dir,
            max_upload_bytes,
        };
        config.validate()?;
        info!("Application configuration loaded successfully");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::ValidationError("APP_HOST cannot be empty".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "MAX_UPLOAD_BYTES must be greater than 0".to_string(),
            ));
        }
        if self.max_upload_bytes >= MONGO_MAX_DOCUMENT_BYTES {
            warn!(
                "MAX_UPLOAD_BYTES of {} reaches MongoDB's document limit; uploads near it will fail to store",
                self.max_upload_bytes
            );
        }
        Ok(())
    }

    /// Origins parsed from `allow_origins`; `None` means any origin.
    pub fn origins(&self) -> Option<Vec<String>> {
        if self.allow_origins.trim() == "*" {
            return None;
        }
        Some(
            self.allow_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            allow_origins: DEFAULT_ALLOW_ORIGINS.to_string(),
            static_dir: "./client/dist".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.allow_origins, "http://localhost:5173");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_upload_limit_leaves_room_for_document_fields() {
        let config = AppConfig::default();
        assert_eq!(config.max_upload_bytes, 15_728_640);
        assert!(config.max_upload_bytes + 64 * 1024 < MONGO_MAX_DOCUMENT_BYTES);
    }

    #[test]
    fn test_origins_split_and_trimmed() {
        let config = AppConfig {
            allow_origins: "http://a.test, http://b.test,,".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.origins(),
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
    }

    #[test]
    fn test_wildcard_origin() {
        let config = AppConfig {
            allow_origins: "*".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.origins(), None);
    }

    #[test]
    fn test_validate_zero_upload_limit() {
        let config = AppConfig {
            max_upload_bytes: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
