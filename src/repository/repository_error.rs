#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Already Exists: {0}")]
    AlreadyExists(String),
    #[error("Validation Error: {0}")]
    ValidationError(String),
    #[error("Database Error: {0}")]
    DatabaseError(String),
    #[error("Connection Error: {0}")]
    ConnectionError(String),
    #[error("Serialization Error: {0}")]
    SerializationError(String),
    /// Generic error that wraps any error implementing std::error::Error
    #[error("Repository Error: {0}")]
    Generic(#[source] Box<dyn std::error::Error + Send + Sync>),
}

// Convenient constructors
impl RepositoryError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        RepositoryError::NotFound(msg.into())
    }

    pub fn already_exists<T: Into<String>>(msg: T) -> Self {
        RepositoryError::AlreadyExists(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        RepositoryError::ValidationError(msg.into())
    }

    pub fn database<T: Into<String>>(msg: T) -> Self {
        RepositoryError::DatabaseError(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        RepositoryError::SerializationError(msg.into())
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::Write(_) => {
                // E11000 is the server's duplicate key code
                if err.to_string().contains("E11000") {
                    RepositoryError::AlreadyExists(format!("Duplicate key: {}", err))
                } else {
                    RepositoryError::DatabaseError(format!("Write error: {}", err))
                }
            }
            ErrorKind::Authentication { .. } => {
                RepositoryError::ConnectionError(format!("Authentication failed: {}", err))
            }
            // driver misuse, not a client error
            ErrorKind::InvalidArgument { .. } => {
                RepositoryError::DatabaseError(format!("Invalid argument: {}", err))
            }
            ErrorKind::Io(_) | ErrorKind::ServerSelection { .. } => {
                RepositoryError::ConnectionError(format!("IO error: {}", err))
            }
            _ => RepositoryError::Generic(Box::new(err)),
        }
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::SerializationError(format!("BSON serialization error: {}", err))
    }
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        RepositoryError::SerializationError(format!("BSON deserialization error: {}", err))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
