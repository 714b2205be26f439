use chrono::{DateTime, Duration, Utc};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

pub const DEFAULT_ISSUER: &str = "preservation-windows";
/// Sessions are effectively permanent: roughly 114 years.
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 1_000_000;

/// JWT configuration structure
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Symmetric secret used to sign HS256 tokens
    pub jwt_secret: String,
    /// Session token lifetime in hours
    pub token_expiration_hours: i64,
    /// Value of the `iss` claim
    pub jwt_issuer: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JWT_SECRET: Secret key for signing JWT tokens (required)
    /// - JWT_TOKEN_EXPIRY_HOURS: Token lifetime in hours (defaults to 1000000)
    /// - JWT_ISSUER: Token issuer (defaults to preservation-windows)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load("")
    }

    /// Same as `from_env` but reads `TEST_` prefixed variables
    pub fn from_test_env() -> Result<Self, ConfigError> {
        Self::load("TEST_")
    }

    fn load(prefix: &str) -> Result<Self, ConfigError> {
        info!("Loading {}JWT configuration from environment variables", prefix);

        let secret_var = format!("{}JWT_SECRET", prefix);
        let jwt_secret = env::var(&secret_var).map_err(|_| {
            error!("{} environment variable not found", secret_var);
            ConfigError::EnvVarNotFound(secret_var.clone())
        })?;
        debug!("JWT secret loaded (length: {} chars)", jwt_secret.len());

        let expiry_var = format!("{}JWT_TOKEN_EXPIRY_HOURS", prefix);
        let token_expiration_hours = match env::var(&expiry_var) {
            Ok(raw) => raw.parse::<i64>().map_err(|e| {
                error!("Invalid {} value: {}", expiry_var, e);
                ConfigError::InvalidValue(format!("{}: {}", expiry_var, e))
            })?,
            Err(_) => DEFAULT_TOKEN_EXPIRY_HOURS,
        };
        debug!("JWT token expiration: {} hours", token_expiration_hours);

        let jwt_issuer = env::var(format!("{}JWT_ISSUER", prefix))
            .unwrap_or_else(|_| DEFAULT_ISSUER.to_string());

        let config = JwtConfig {
            jwt_secret,
            token_expiration_hours,
            jwt_issuer,
        };
        config.validate()?;

        info!("JWT configuration loaded successfully");
        Ok(config)
    }

    /// When a token issued at `issued_at` expires, or `None` if that lies
    /// beyond the representable date range.
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        Duration::try_hours(self.token_expiration_hours).and_then(|lifetime| issued_at.checked_add_signed(lifetime))
    }

    /// Validate the JWT configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        debug!("Validating JWT configuration");

        if self.jwt_secret.is_empty() {
            error!("JWT secret cannot be empty");
            return Err(ConfigError::ValidationError("JWT_SECRET cannot be empty".to_string()));
        }

        if self.jwt_secret.len() < 32 {
            warn!("JWT secret is shorter than 32 characters");
        }

        if self.token_expiration_hours <= 0 {
            error!("Token expiration must be greater than 0");
            return Err(ConfigError::ValidationError(
                "JWT_TOKEN_EXPIRY_HOURS must be greater than 0".to_string(),
            ));
        }

        if self.expires_at(Utc::now()).is_none() {
            error!("Token expiration of {} hours overflows the date range", self.token_expiration_hours);
            return Err(ConfigError::ValidationError(
                "JWT_TOKEN_EXPIRY_HOURS is too large".to_string(),
            ));
        }

        if self.jwt_issuer.is_empty() {
            return Err(ConfigError::ValidationError("JWT_ISSUER cannot be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_should_be_long_enough_for_security_purposes".to_string(),
            token_expiration_hours: DEFAULT_TOKEN_EXPIRY_HOURS,
            jwt_issuer: DEFAULT_ISSUER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = JwtConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.jwt_issuer, "preservation-windows");
        assert_eq!(config.token_expiration_hours, 1_000_000);
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = JwtConfig {
            jwt_secret: String::new(),
            ..JwtConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_secret_only_warns() {
        let config = JwtConfig {
            jwt_secret: "short".to_string(),
            ..JwtConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_expiry_rejected() {
        let config = JwtConfig {
            token_expiration_hours: 0,
            ..JwtConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_expiry_rejected() {
        let config = JwtConfig {
            token_expiration_hours: 10_000_000_000,
            ..JwtConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(ref m)) if m == "JWT_TOKEN_EXPIRY_HOURS is too large"
        ));
        assert!(config.expires_at(Utc::now()).is_none());
    }
}
