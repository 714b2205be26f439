use crate::model::user::User;
use crate::repository::repository_error::RepositoryError;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub const USER_EXISTS: &str = "User already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[async_trait]
pub trait UserService: Send + Sync {
    /// Store a new account; the returned user carries the password hash.
    async fn register(&self, username: String, email: String, password: String) -> Result<User, ServiceError>;
    /// Check credentials and issue a session token.
    async fn login(&self, email: String, password: String) -> Result<String, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self { user_repo, jwt_utils }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, password), fields(username = %username, email = %email))]
    async fn register(&self, username: String, email: String, password: String) -> Result<User, ServiceError> {
        info!("Registering new user");

        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!("Registration refused, email already taken");
            return Err(ServiceError::InvalidInput(USER_EXISTS.to_string()));
        }

        let password_hash = PasswordUtilsImpl::hash_password(&password).map_err(|e| {
            error!("Password hashing failed: {}", e);
            ServiceError::InternalError("Failed to hash password".to_string())
        })?;

        let user = User {
            id: None,
            username,
            email,
            password_hash,
            created_at: None,
        };

        match self.user_repo.insert(user).await {
            Ok(inserted) => {
                info!("User registered");
                Ok(inserted)
            }
            // lost the race against a concurrent registration
            Err(RepositoryError::AlreadyExists(_)) => {
                warn!("Duplicate key on user insert");
                Err(ServiceError::InvalidInput(USER_EXISTS.to_string()))
            }
            Err(e) => {
                error!("Failed to insert user: {e}");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<String, ServiceError> {
        info!("User login attempt");

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                warn!("Login failed, unknown email");
                return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let valid = PasswordUtilsImpl::verify_password(&password, &user.password_hash).unwrap_or_else(|e| {
            error!("Stored password hash could not be checked: {}", e);
            false
        });
        if !valid {
            warn!("Login failed, wrong password");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let user_id = user.id.map(|id| id.to_hex()).unwrap_or_default();
        let token = self.jwt_utils.generate_token(&user_id, &user.email).map_err(|e| {
            error!("Token generation failed: {}", e);
            ServiceError::InternalError("Failed to generate token".to_string())
        })?;

        info!("User logged in");
        Ok(token)
    }
}
