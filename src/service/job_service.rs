use crate::dto::job_dto::{JobRequest, UpdateJobRequest};
use crate::model::job::Job;
use crate::repository::counter_repo::{CounterRepository, QUOTE_ID_COUNTER};
use crate::repository::job_repo::JobRepository;
use crate::repository::repository_error::RepositoryError;
use crate::util::error::ServiceError;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info, instrument};

pub const NO_FIELDS_TO_UPDATE: &str = "No fields to update";

#[async_trait]
pub trait JobService: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<Job>, ServiceError>;
    async fn get_job(&self, id: ObjectId) -> Result<Job, ServiceError>;
    async fn create_job(&self, request: JobRequest) -> Result<Job, ServiceError>;
    async fn update_job(&self, id: ObjectId, request: UpdateJobRequest) -> Result<(), ServiceError>;
    async fn delete_job(&self, id: ObjectId) -> Result<(), ServiceError>;
}

pub struct JobServiceImpl {
    pub job_repo: Arc<dyn JobRepository>,
    pub counter_repo: Arc<dyn CounterRepository>,
}

impl JobServiceImpl {
    pub fn new(job_repo: Arc<dyn JobRepository>, counter_repo: Arc<dyn CounterRepository>) -> Self {
        Self { job_repo, counter_repo }
    }
}

/// Shallow `$set` of the fields present in `request`.
///
/// Shared by jobs and drawings, which differ only in their collection.
pub(crate) async fn apply_update(
    repo: &dyn JobRepository,
    id: ObjectId,
    request: &UpdateJobRequest,
) -> Result<(), ServiceError> {
    let changes = request.to_set_document().map_err(RepositoryError::from)?;
    if changes.is_empty() {
        return Err(ServiceError::InvalidInput(NO_FIELDS_TO_UPDATE.to_string()));
    }
    repo.set_fields(id, changes).await?;
    Ok(())
}

#[async_trait]
impl JobService for JobServiceImpl {
    #[instrument(skip(self))]
    async fn list_jobs(&self) -> Result<Vec<Job>, ServiceError> {
        let jobs = self.job_repo.list().await?;
        info!(count = jobs.len(), "Jobs listed");
        Ok(jobs)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_job(&self, id: ObjectId) -> Result<Job, ServiceError> {
        Ok(self.job_repo.get_by_id(id).await?)
    }

    #[instrument(skip(self, request), fields(customer = %request.customer_name))]
    async fn create_job(&self, request: JobRequest) -> Result<Job, ServiceError> {
        info!("Creating job");

        // nothing is inserted unless a quote number was allocated
        let seq = match self.counter_repo.next_value(QUOTE_ID_COUNTER).await {
            Ok(seq) => seq,
            Err(e) => {
                error!("Could not allocate quote number: {e}");
                return Err(e.into());
            }
        };

        let job = request.into_job(seq.to_string());
        let inserted = self.job_repo.insert(job).await?;
        info!(quote_id = %inserted.quote_id, "Job created");
        Ok(inserted)
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update_job(&self, id: ObjectId, request: UpdateJobRequest) -> Result<(), ServiceError> {
        apply_update(self.job_repo.as_ref(), id, &request).await?;
        info!("Job updated");
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_job(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.job_repo.delete(id).await?;
        info!("Job deleted");
        Ok(())
    }
}
