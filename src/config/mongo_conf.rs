use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// MongoDB configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Load MongoDB configuration from environment variables
    ///
    /// Expected environment variables:
    /// - MONGODB_URI: MongoDB connection URI (required, MONGO_URI accepted as an alias)
    /// - MONGO_DATABASE: Database name (defaults to quote_db)
    /// - MONGO_USERNAME / MONGO_PASSWORD: credentials (optional)
    /// - MONGO_POOL_SIZE: Connection pool size (defaults to 10)
    /// - MONGO_CONNECTION_TIMEOUT: Connection timeout in seconds (defaults to 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");

        let uri = env::var("MONGODB_URI")
            .or_else(|_| env::var("MONGO_URI"))
            .map_err(|_| {
                error!("MONGODB_URI environment variable not found");
                ConfigError::EnvVarNotFound("MONGODB_URI".to_string())
            })?;

        let database = env::var("MONGO_DATABASE").unwrap_or_else(|_| {
            debug!("MONGO_DATABASE not set, using default: quote_db");
            "quote_db".to_string()
        });
        debug!("MongoDB database: {}", database);

        let username = env::var("MONGO_USERNAME").ok();
        if let Some(ref user) = username {
            debug!("MongoDB username: {}", user);
        }

        let password = env::var("MONGO_PASSWORD").ok();
        if password.is_some() {
            debug!("MongoDB password provided");
        }

        let pool_size = env::var("MONGO_POOL_SIZE")
            .unwrap_or_else(|_| {
                warn!("MONGO_POOL_SIZE not set, using default: 10");
                "10".to_string()
            })
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid MONGO_POOL_SIZE value");
                ConfigError::InvalidValue("Invalid MONGO_POOL_SIZE value".to_string())
            })?;

        let connection_timeout_secs = env::var("MONGO_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid MONGO_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid MONGO_CONNECTION_TIMEOUT value".to_string())
            })?;
        debug!("MongoDB connection timeout: {} seconds", connection_timeout_secs);

        let config = MongoConfig {
            uri,
            database,
            username,
            password,
            pool_size,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(config)
    }

    /// Create MongoConfig for testing
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: "quote_db_test".to_string(),
            username: None,
            password: None,
            pool_size: 2,
            connection_timeout_secs: 2,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uri.is_empty() {
            error!("MongoDB URI is empty");
            return Err(ConfigError::ValidationError("MongoDB URI cannot be empty".to_string()));
        }

        if self.database.is_empty() {
            error!("MongoDB database is empty");
            return Err(ConfigError::ValidationError("MongoDB database cannot be empty".to_string()));
        }

        if self.pool_size == 0 {
            return Err(ConfigError::ValidationError("MongoDB pool size must be greater than 0".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "MongoDB connection timeout must be greater than 0".to_string(),
            ));
        }

        // Credentials are optional but must not be blank when given
        if matches!(self.username.as_deref(), Some("")) {
            return Err(ConfigError::ValidationError("MongoDB username cannot be empty if set".to_string()));
        }
        if matches!(self.password.as_deref(), Some("")) {
            return Err(ConfigError::ValidationError("MongoDB password cannot be empty if set".to_string()));
        }
        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "quote_db".to_string(),
            username: None,
            password: None,
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}
