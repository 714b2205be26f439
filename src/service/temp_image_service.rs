use crate::dto::temp_dto::{ImageContent, ImageUpload, DEFAULT_CONTENT_TYPE};
use crate::model::temp_image::TempImage;
use crate::repository::temp_image_repo::TempImageRepository;
use crate::util::error::ServiceError;
use async_trait::async_trait;
use bson::spec::BinarySubtype;
use bson::Binary;
use std::sync::Arc;
use tracing::{info, instrument};

pub const NAME_REQUIRED: &str = "Name is required";
pub const IMAGE_REQUIRED: &str = "Image file is required";
pub const IMAGE_NOT_FOUND: &str = "Image not found";

#[async_trait]
pub trait TempImageService: Send + Sync {
    async fn upload(&self, upload: ImageUpload) -> Result<TempImage, ServiceError>;
    /// First stored image with exactly this name.
    async fn retrieve(&self, name: &str) -> Result<ImageContent, ServiceError>;
}

pub struct TempImageServiceImpl {
    pub temp_repo: Arc<dyn TempImageRepository>,
}

impl TempImageServiceImpl {
    pub fn new(temp_repo: Arc<dyn TempImageRepository>) -> Self {
        Self { temp_repo }
    }
}

#[async_trait]
impl TempImageService for TempImageServiceImpl {
    #[instrument(skip(self, upload), fields(name = %upload.name, size = upload.content.len()))]
    async fn upload(&self, upload: ImageUpload) -> Result<TempImage, ServiceError> {
        if upload.name.is_empty() {
            return Err(ServiceError::InvalidInput(NAME_REQUIRED.to_string()));
        }
        if upload.content.is_empty() {
            return Err(ServiceError::InvalidInput(IMAGE_REQUIRED.to_string()));
        }

        let file_type = if upload.content_type.is_empty() {
            DEFAULT_CONTENT_TYPE.to_string()
        } else {
            upload.content_type
        };

        let image = TempImage {
            id: None,
            name: upload.name,
            image: Binary {
                subtype: BinarySubtype::Generic,
                bytes: upload.content.to_vec(),
            },
            file_type,
            created_at: None,
        };

        let stored = self.temp_repo.insert(image).await?;
        info!("Image stored");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn retrieve(&self, name: &str) -> Result<ImageContent, ServiceError> {
        let image = self
            .temp_repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(IMAGE_NOT_FOUND.to_string()))?;

        let content_type = if image.file_type.is_empty() {
            DEFAULT_CONTENT_TYPE.to_string()
        } else {
            image.file_type
        };

        Ok(ImageContent {
            content: image.image.bytes,
            content_type,
        })
    }
}
