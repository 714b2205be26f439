use crate::handler::job_handler::{
    create_job_handler,
    delete_job_handler,
    get_job_handler,
    list_jobs_handler,
    update_job_handler,
};
use crate::service::job_service::JobServiceImpl;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn job_router(service: Arc<JobServiceImpl>) -> Router {
    Router::new()
        .route("/jobs", get(list_jobs_handler).post(create_job_handler))
        .route(
            "/jobs/{id}",
            get(get_job_handler).put(update_job_handler).delete(delete_job_handler),
        )
        .with_state(service)
}
