use crate::model::temp_image::TempImage;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::TEMPS_COLLECTION;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

#[async_trait]
pub trait TempImageRepository: Send + Sync {
    async fn insert(&self, image: TempImage) -> RepositoryResult<TempImage>;
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<TempImage>>;
}

pub struct MongoTempImageRepository {
    collection: Collection<TempImage>,
}

impl MongoTempImageRepository {
    pub fn new(db: &Database) -> Self {
        MongoTempImageRepository {
            collection: db.collection::<TempImage>(TEMPS_COLLECTION),
        }
    }
}

#[async_trait]
impl TempImageRepository for MongoTempImageRepository {
    #[tracing::instrument(skip(self, image), fields(name = %image.name, size = image.image.bytes.len()))]
    async fn insert(&self, mut image: TempImage) -> RepositoryResult<TempImage> {
        image.id = Some(ObjectId::new());
        image.created_at = Some(chrono::Utc::now().to_rfc3339());
        self.collection
            .insert_one(&image, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to save image: {}", e)))?;
        Ok(image)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<TempImage>> {
        let image = self.collection.find_one(doc! { "name": name }, None).await?;
        Ok(image)
    }
}
