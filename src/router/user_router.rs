use crate::handler::user_handler::{login_handler, register_handler};
use crate::service::user_service::UserServiceImpl;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Public account routes; no token required.
pub fn user_router(service: Arc<UserServiceImpl>) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .with_state(service)
}
