use crate::dto::user_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::handler::ApiJson;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

pub const FIELDS_REQUIRED: &str = "All fields are required";

// Register
pub async fn register_handler(
    State(service): State<Arc<UserServiceImpl>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if payload.validate().is_err() {
        return Err(HandlerError::bad_request(FIELDS_REQUIRED));
    }
    let user = service
        .register(payload.username, payload.email, payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// Login
pub async fn login_handler(
    State(service): State<Arc<UserServiceImpl>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if payload.validate().is_err() {
        return Err(HandlerError::bad_request(FIELDS_REQUIRED));
    }
    let token = service.login(payload.email, payload.password).await?;
    Ok(Json(LoginResponse { token }))
}
