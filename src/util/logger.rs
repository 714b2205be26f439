use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Keeps the background log writers alive; drop it only at shutdown.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let guards = Self::setup_logging()?;
        Ok(Logger { guards })
    }

    /// Console (pretty), daily plain file and daily JSON file.
    ///
    /// - RUST_LOG filters the console output
    /// - FILE_LOG_LEVEL filters both files (defaults to debug)
    /// - LOG_DIR picks the directory (defaults to logs)
    pub fn setup_logging() -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        let json_dir = format!("{}/json", log_dir);
        std::fs::create_dir_all(&json_dir)?;

        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,preservation_windows_backend=debug"));

        let file_log_level = std::env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());

        let general_file = rolling::daily(&log_dir, "preservation-windows-backend.log");
        let (non_blocking_general, general_guard) = non_blocking(general_file);

        let json_file = rolling::daily(&json_dir, "preservation-windows-backend.json");
        let (non_blocking_json, json_guard) = non_blocking(json_file);

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(true)
                    .with_filter(console_filter),
            )
            .with(
                fmt::layer()
                    .with_writer(non_blocking_general)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking_json)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .try_init()?;

        Ok(vec![general_guard, json_guard])
    }
}
