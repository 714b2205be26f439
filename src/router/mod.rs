pub mod drawing_router;
pub mod job_router;
pub mod temp_router;
pub mod user_router;

use crate::config::AppConfig;
use crate::middlewares::auth_middleware::{jwt_auth, AuthState};
use crate::service::drawing_service::DrawingServiceImpl;
use crate::service::job_service::JobServiceImpl;
use crate::service::temp_image_service::TempImageServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::error::HandlerError;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::warn;

use drawing_router::drawing_router;
use job_router::job_router;
use temp_router::temp_router;
use user_router::user_router;

/// Everything the HTTP surface needs, built once at startup.
#[derive(Clone)]
pub struct ApiServices {
    pub user_service: Arc<UserServiceImpl>,
    pub job_service: Arc<JobServiceImpl>,
    pub drawing_service: Arc<DrawingServiceImpl>,
    pub temp_service: Arc<TempImageServiceImpl>,
    pub auth_state: Arc<AuthState>,
}

async fn api_not_found() -> HandlerError {
    HandlerError::not_found("Not found")
}

/// Routes mounted under `/api`.
///
/// Register and login are public; every other route, including unknown
/// paths, goes through `jwt_auth` first.
pub fn api_router(services: &ApiServices, max_upload_bytes: usize) -> Router {
    let protected = Router::new()
        .merge(job_router(services.job_service.clone()))
        .merge(drawing_router(services.drawing_service.clone()))
        .merge(temp_router(services.temp_service.clone(), max_upload_bytes))
        .fallback(api_not_found)
        .layer(middleware::from_fn_with_state(services.auth_state.clone(), jwt_auth));

    user_router(services.user_service.clone()).merge(protected)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    match config.origins() {
        None => layer.allow_origin(Any),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(origins)).allow_credentials(true)
        }
    }
}

/// The full application: API, health probe, SPA assets, CORS and tracing.
pub fn app_router(services: &ApiServices, config: &AppConfig) -> Router {
    let static_dir = Path::new(&config.static_dir);
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_router(services, config.max_upload_bytes))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}
