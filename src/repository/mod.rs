pub mod counter_repo;
pub mod job_repo;
pub mod repository_error;
pub mod temp_image_repo;
pub mod user_repo;

use crate::config::mongo_conf::MongoConfig;
use bson::doc;
use mongodb::{
    options::{ClientOptions, Credential, ResolverConfig},
    Client, Database,
};
use tracing::{error, info};

pub const USERS_COLLECTION: &str = "users";
pub const JOBS_COLLECTION: &str = "jobs";
pub const DRAWINGS_COLLECTION: &str = "drawings";
pub const COUNTERS_COLLECTION: &str = "counters";
pub const TEMPS_COLLECTION: &str = "temps";

/// Open one client for the whole process and confirm the server answers.
///
/// Every repository is built from the returned handle, so the driver's
/// connection pool is shared.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options =
        ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("PreservationWindowsBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    let client = Client::with_options(client_options)?;
    let db = client.database(&config.database);

    match db.run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => info!(database = %config.database, "Connected to MongoDB"),
        Err(e) => {
            error!("MongoDB ping failed: {}", e);
            return Err(e);
        }
    }
    Ok(db)
}
