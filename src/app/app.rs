use crate::config::{AppConfig, JwtConfig, MongoConfig};
use crate::middlewares::auth_middleware::AuthState;
use crate::repository::counter_repo::MongoCounterRepository;
use crate::repository::job_repo::MongoJobRepository;
use crate::repository::temp_image_repo::MongoTempImageRepository;
use crate::repository::user_repo::UserRepositoryImpl;
use crate::router::{app_router, ApiServices};
use crate::service::drawing_service::DrawingServiceImpl;
use crate::service::job_service::JobServiceImpl;
use crate::service::temp_image_service::TempImageServiceImpl;
use crate::service::user_service::UserServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;
use axum::Router;
use std::error::Error;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{info, warn};

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    /// Load configuration, connect to MongoDB and wire every layer together.
    pub async fn new() -> Result<Self, Box<dyn Error>> {
        let config = AppConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;
        let jwt_config = JwtConfig::from_env()?;

        let db = crate::repository::connect(&mongo_config).await?;

        let user_repo = Arc::new(UserRepositoryImpl::new(&db));
        if let Err(e) = user_repo.ensure_indexes().await {
            // registration still checks for an existing email before inserting
            warn!("Could not create unique email index: {e}");
        }
        let job_repo = Arc::new(MongoJobRepository::jobs(&db));
        let drawing_repo = Arc::new(MongoJobRepository::drawings(&db));
        let counter_repo = Arc::new(MongoCounterRepository::new(&db));
        let temp_repo = Arc::new(MongoTempImageRepository::new(&db));

        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));

        let services = ApiServices {
            user_service: Arc::new(UserServiceImpl::new(user_repo, jwt_utils.clone())),
            job_service: Arc::new(JobServiceImpl::new(job_repo.clone(), counter_repo)),
            drawing_service: Arc::new(DrawingServiceImpl::new(drawing_repo, job_repo)),
            temp_service: Arc::new(TempImageServiceImpl::new(temp_repo)),
            auth_state: Arc::new(AuthState { jwt_utils }),
        };

        let router = app_router(&services, &config);
        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), Box<dyn Error>> {
        let host: IpAddr = self.config.host.parse()?;
        let addr = SocketAddr::new(host, self.config.port);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Server running at http://{}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
