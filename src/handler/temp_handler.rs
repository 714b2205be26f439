use crate::dto::temp_dto::{ImageUpload, TempImageResponse, DEFAULT_CONTENT_TYPE};
use crate::service::temp_image_service::{TempImageService, TempImageServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, warn};

fn multipart_error(err: MultipartError) -> HandlerError {
    warn!("Multipart read failed: {}", err);
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        HandlerError::new(HandlerErrorKind::PayloadTooLarge, err.body_text())
    } else {
        HandlerError::bad_request(err.body_text())
    }
}

/// POST /temps, multipart fields `name` and `image`
pub async fn upload_temp_handler(
    State(service): State<Arc<TempImageServiceImpl>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let mut multipart = multipart.map_err(|rejection| HandlerError::bad_request(rejection.body_text()))?;

    let mut name = String::new();
    let mut content = Bytes::new();
    let mut content_type = String::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => {
                name = field.text().await.map_err(multipart_error)?;
            }
            Some("image") => {
                content_type = field.content_type().map(str::to_string).unwrap_or_default();
                content = field.bytes().await.map_err(multipart_error)?;
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let stored = service
        .upload(ImageUpload {
            name,
            content,
            content_type,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(TempImageResponse::from(stored))))
}

/// GET /temps/image/{name}
pub async fn get_temp_image_handler(
    State(service): State<Arc<TempImageServiceImpl>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let image = service.retrieve(&name).await?;
    let content_type = HeaderValue::from_str(&image.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    Ok(([(header::CONTENT_TYPE, content_type)], image.content))
}
