use dotenv::dotenv;
use preservation_windows_backend::app::App;
use preservation_windows_backend::util::logger::Logger;
use tracing::{error, info, warn};

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let app = App::new().await?;
    app.start().await
}

#[tokio::main]
async fn main() {
    // .env must be loaded before the logger reads RUST_LOG and LOG_DIR
    let dotenv_result = dotenv();

    let logger = match Logger::new() {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            std::process::exit(1);
        }
    };

    info!("Starting Preservation Windows backend");
    match dotenv_result {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => warn!("No .env file loaded: {} (using system env vars)", e),
    }

    if let Err(e) = run().await {
        error!("Fatal: {e}");
        // flush the file writers before exiting
        drop(logger);
        std::process::exit(1);
    }
}
