use crate::dto::job_dto::UpdateJobRequest;
use crate::model::job::Drawing;
use crate::repository::job_repo::JobRepository;
use crate::service::job_service::apply_update;
use crate::util::error::ServiceError;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{info, instrument};

#[async_trait]
pub trait DrawingService: Send + Sync {
    async fn list_drawings(&self) -> Result<Vec<Drawing>, ServiceError>;
    async fn get_drawing(&self, id: ObjectId) -> Result<Drawing, ServiceError>;
    async fn update_drawing(&self, id: ObjectId, request: UpdateJobRequest) -> Result<(), ServiceError>;
    async fn delete_drawing(&self, id: ObjectId) -> Result<(), ServiceError>;
    /// Copy a job into the drawings collection under a new id.
    async fn convert_from_job(&self, job_id: ObjectId) -> Result<Drawing, ServiceError>;
}

pub struct DrawingServiceImpl {
    pub drawing_repo: Arc<dyn JobRepository>,
    pub job_repo: Arc<dyn JobRepository>,
}

impl DrawingServiceImpl {
    pub fn new(drawing_repo: Arc<dyn JobRepository>, job_repo: Arc<dyn JobRepository>) -> Self {
        Self { drawing_repo, job_repo }
    }
}

#[async_trait]
impl DrawingService for DrawingServiceImpl {
    #[instrument(skip(self))]
    async fn list_drawings(&self) -> Result<Vec<Drawing>, ServiceError> {
        Ok(self.drawing_repo.list().await?)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_drawing(&self, id: ObjectId) -> Result<Drawing, ServiceError> {
        Ok(self.drawing_repo.get_by_id(id).await?)
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update_drawing(&self, id: ObjectId, request: UpdateJobRequest) -> Result<(), ServiceError> {
        apply_update(self.drawing_repo.as_ref(), id, &request).await?;
        info!("Drawing updated");
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_drawing(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.drawing_repo.delete(id).await?;
        info!("Drawing deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %job_id))]
    async fn convert_from_job(&self, job_id: ObjectId) -> Result<Drawing, ServiceError> {
        let mut job = self.job_repo.get_by_id(job_id).await?;
        // the drawing gets its own identity; quoteId is carried over
        job.id = None;
        let drawing = self.drawing_repo.insert(job).await?;
        info!(drawing_id = ?drawing.id, "Job converted to drawing");
        Ok(drawing)
    }
}
