use crate::dto::job_dto::{JobRequest, JobResponse, UpdateJobRequest};
use crate::dto::MessageResponse;
use crate::handler::{parse_object_id, ApiJson};
use crate::service::job_service::{JobService, JobServiceImpl};
use crate::util::error::HandlerError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

pub async fn list_jobs_handler(
    State(service): State<Arc<JobServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let jobs = service.list_jobs().await?;
    Ok(Json(jobs.into_iter().map(JobResponse::from).collect::<Vec<_>>()))
}

pub async fn get_job_handler(
    State(service): State<Arc<JobServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    let job = service.get_job(id).await?;
    Ok(Json(JobResponse::from(job)))
}

pub async fn create_job_handler(
    State(service): State<Arc<JobServiceImpl>>,
    ApiJson(payload): ApiJson<JobRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let job = service.create_job(payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

pub async fn update_job_handler(
    State(service): State<Arc<JobServiceImpl>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateJobRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    service.update_job(id, payload).await?;
    Ok(Json(MessageResponse::new("Job updated")))
}

pub async fn delete_job_handler(
    State(service): State<Arc<JobServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    service.delete_job(id).await?;
    Ok(Json(MessageResponse::new("Job deleted")))
}
