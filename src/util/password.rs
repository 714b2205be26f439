//! Password hashing and verification utilities
//!
//! New hashes use Argon2id with the crate's fixed default cost. Hashes in
//! bcrypt format (`$2a$`, `$2b$`, `$2y$`) written by the earlier deployment
//! are still accepted on verification.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{debug, error};

/// Error types for password operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
    #[error("Failed to verify password: {0}")]
    VerificationFailed(String),
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

pub trait PasswordUtils {
    /// Hashes the given password using Argon2id algorithm
    fn hash_password(password: &str) -> Result<String, PasswordError>;

    /// Verifies the given password against the stored hash
    fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError>;
}

pub struct PasswordUtilsImpl;

impl PasswordUtilsImpl {
    fn is_bcrypt_hash(hash: &str) -> bool {
        ["$2a$", "$2b$", "$2y$"].iter().any(|prefix| hash.starts_with(prefix))
    }
}

impl PasswordUtils for PasswordUtilsImpl {
    fn hash_password(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        match Argon2::default().hash_password(password.as_bytes(), &salt) {
            Ok(password_hash) => {
                debug!("Password successfully hashed");
                Ok(password_hash.to_string())
            }
            Err(err) => {
                error!("Failed to hash password: {}", err);
                Err(PasswordError::HashingFailed(err.to_string()))
            }
        }
    }

    fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
        if Self::is_bcrypt_hash(hash) {
            debug!("Verifying password against legacy bcrypt hash");
            return bcrypt::verify(password, hash).map_err(|err| match err {
                bcrypt::BcryptError::InvalidHash(_) | bcrypt::BcryptError::InvalidPrefix(_) => {
                    PasswordError::InvalidHashFormat
                }
                other => PasswordError::VerificationFailed(other.to_string()),
            });
        }

        let parsed_hash = match PasswordHash::new(hash) {
            Ok(hash) => hash,
            Err(err) => {
                error!("Invalid password hash format: {}", err);
                return Err(PasswordError::InvalidHashFormat);
            }
        };

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed - invalid password");
                Ok(false)
            }
            Err(err) => {
                error!("Password verification error: {}", err);
                Err(PasswordError::VerificationFailed(err.to_string()))
            }
        }
    }
}
