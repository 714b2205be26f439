use crate::handler::drawing_handler::{
    convert_job_handler,
    delete_drawing_handler,
    get_drawing_handler,
    list_drawings_handler,
    update_drawing_handler,
};
use crate::service::drawing_service::DrawingServiceImpl;
use axum::{routing::{get, post}, Router};
use std::sync::Arc;

pub fn drawing_router(service: Arc<DrawingServiceImpl>) -> Router {
    Router::new()
        .route("/drawings", get(list_drawings_handler))
        .route(
            "/drawings/{id}",
            get(get_drawing_handler).put(update_drawing_handler).delete(delete_drawing_handler),
        )
        .route("/jobs/{id}/convert-to-drawing", post(convert_job_handler))
        .with_state(service)
}
