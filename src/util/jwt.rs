use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::JwtConfig;

/// JWT session claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID, hex ObjectId)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

/// Error types for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    /// Header absent, not a bearer credential, or empty
    #[error("Missing or malformed JWT")]
    MissingToken,
    #[error("Missing JWT secret")]
    MissingSecret,
}

pub trait JwtTokenUtils {
    fn generate_token(&self, user_id: &str, email: &str) -> Result<String, JwtError>;
    fn validate_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
}

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {
    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl { jwt_config }
    }

    /// Create JWT utils from environment variables
    pub fn from_env() -> Result<Self, JwtError> {
        let jwt_config = JwtConfig::from_env().map_err(|_| JwtError::MissingSecret)?;
        Ok(JwtTokenUtilsImpl::new(jwt_config))
    }

    /// Create JWT utils from test environment variables
    pub fn from_test_env() -> Result<Self, JwtError> {
        let jwt_config = JwtConfig::from_test_env().map_err(|_| JwtError::MissingSecret)?;
        Ok(JwtTokenUtilsImpl::new(jwt_config))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.jwt_config.jwt_issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {
    fn generate_token(&self, user_id: &str, email: &str) -> Result<String, JwtError> {
        debug!("Generating session token for user: {}", user_id);

        let now = Utc::now();
        let expiration = self.jwt_config.expires_at(now).ok_or_else(|| {
            error!(
                "Token expiration of {} hours overflows the date range",
                self.jwt_config.token_expiration_hours
            );
            JwtError::EncodingFailed("Token expiration is out of range".to_string())
        })?;

        let claims = Claims {
            sub: user_id.to_string(),
            iss: self.jwt_config.jwt_issuer.clone(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());

        match encode(&header, &claims, &encoding_key) {
            Ok(token) => {
                info!("Successfully generated session token for user: {}", user_id);
                Ok(token)
            }
            Err(err) => {
                error!("Failed to encode JWT token: {}", err);
                Err(JwtError::EncodingFailed(err.to_string()))
            }
        }
    }

    fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        debug!("Validating JWT token");

        let decoding_key = DecodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());

        match decode::<Claims>(token, &decoding_key, &self.validation()) {
            Ok(token_data) => {
                debug!("Token validation successful for user: {}", token_data.claims.sub);
                Ok(token_data.claims)
            }
            Err(err) if matches!(err.kind(), ErrorKind::ExpiredSignature) => {
                warn!("Token has expired");
                Err(JwtError::TokenExpired)
            }
            Err(err) => {
                warn!("Failed to decode JWT token: {}", err);
                Err(JwtError::DecodingFailed(err.to_string()))
            }
        }
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or(JwtError::MissingToken)?;

        if token.is_empty() {
            debug!("Empty token in authorization header");
            return Err(JwtError::MissingToken);
        }

        Ok(token.to_string())
    }
}
