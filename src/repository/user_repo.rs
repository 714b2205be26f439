use crate::model::user::User;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::USERS_COLLECTION;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use tracing::{error, info};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
}

pub struct UserRepositoryImpl {
    collection: Collection<User>,
}

impl UserRepositoryImpl {
    pub fn new(db: &Database) -> Self {
        UserRepositoryImpl {
            collection: db.collection::<User>(USERS_COLLECTION),
        }
    }

    /// Back email uniqueness with a unique index.
    ///
    /// Building the index fails when duplicates are already stored; callers
    /// log that and keep running on the application-level check alone.
    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index, None).await?;
        info!("Unique email index ensured on users collection");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        user.created_at = Some(chrono::Utc::now().to_rfc3339());
        match self.collection.insert_one(&user, None).await {
            Ok(_) => Ok(user),
            Err(e) => {
                error!("Failed to insert user: {}", e);
                // keeps duplicate-key detection from the From impl
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by email: {}", e)))?;
        Ok(user)
    }
}
