use crate::handler::temp_handler::{get_temp_image_handler, upload_temp_handler};
use crate::service::temp_image_service::TempImageServiceImpl;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn temp_router(service: Arc<TempImageServiceImpl>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route(
            "/temps",
            post(upload_temp_handler).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/temps/image/{name}", get(get_temp_image_handler))
        .with_state(service)
}
