use crate::util::error::HandlerError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

pub const MISSING_TOKEN: &str = "Missing or malformed JWT";
pub const INVALID_TOKEN: &str = "Invalid or expired JWT";

pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

/// Require a valid bearer token. Verified claims go into the request extensions.
pub async fn jwt_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| HandlerError::unauthorized(MISSING_TOKEN))?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| HandlerError::unauthorized(MISSING_TOKEN))?;

    let claims = state.jwt_utils.validate_token(&token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        HandlerError::unauthorized(INVALID_TOKEN)
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
