use crate::dto::job_dto::{JobResponse, UpdateJobRequest};
use crate::dto::MessageResponse;
use crate::handler::{parse_object_id, ApiJson};
use crate::service::drawing_service::{DrawingService, DrawingServiceImpl};
use crate::util::error::HandlerError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

pub async fn list_drawings_handler(
    State(service): State<Arc<DrawingServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let drawings = service.list_drawings().await?;
    Ok(Json(drawings.into_iter().map(JobResponse::from).collect::<Vec<_>>()))
}

pub async fn get_drawing_handler(
    State(service): State<Arc<DrawingServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    let drawing = service.get_drawing(id).await?;
    Ok(Json(JobResponse::from(drawing)))
}

pub async fn update_drawing_handler(
    State(service): State<Arc<DrawingServiceImpl>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateJobRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    service.update_drawing(id, payload).await?;
    Ok(Json(MessageResponse::new("Drawing updated")))
}

pub async fn delete_drawing_handler(
    State(service): State<Arc<DrawingServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id)?;
    service.delete_drawing(id).await?;
    Ok(Json(MessageResponse::new("Drawing deleted")))
}

// POST /jobs/{id}/convert-to-drawing
pub async fn convert_job_handler(
    State(service): State<Arc<DrawingServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let job_id = parse_object_id(&id)?;
    let drawing = service.convert_from_job(job_id).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(drawing))))
}
