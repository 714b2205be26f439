//! Mint a session token for manual API testing.
//!
//! `cargo run --example generate_token -- <user-id> <email>`

use dotenv::dotenv;
use preservation_windows_backend::util::{
    jwt::{JwtTokenUtils, JwtTokenUtilsImpl},
    logger::Logger,
};
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_result = dotenv();
    let logger = Logger::new()?;
    let _guards = logger.guards;

    if let Err(e) = dotenv_result {
        warn!("Failed to load .env file: {} (using system env vars)", e);
    }

    let jwt_util = match JwtTokenUtilsImpl::from_env() {
        Ok(util) => util,
        Err(e) => {
            error!("Failed to create JWT utils, missing config: {}", e);
            return Err(Box::<dyn std::error::Error>::from(e));
        }
    };

    let mut args = std::env::args().skip(1);
    let user_id = args
        .next()
        .unwrap_or_else(|| bson::oid::ObjectId::new().to_hex());
    let email = args.next().unwrap_or_else(|| "user@example.com".to_string());

    debug!(user_id = %user_id, email = %email, "Generating session token");
    let token = jwt_util.generate_token(&user_id, &email)?;

    let claims = jwt_util.validate_token(&token)?;
    info!(
        user_id = %claims.sub,
        issuer = %claims.iss,
        expires = claims.exp,
        "Token validated"
    );

    println!("{}", token);
    Ok(())
}
