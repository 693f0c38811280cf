//! Logging setup
//!
//! Console output plus a daily-rotated log file in the log directory.

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with a console layer and a rotating file layer.
/// Must run before anything logs.
pub fn init_logging(log_dir: &str) {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Could not create log directory {}: {}", log_dir, e);
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "coin_viewer.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    // The guard flushes on drop; logging lasts the whole program, so leak it
    std::mem::forget(guard);

    // RUST_LOG overrides the default filter
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,coin_viewer=debug"));

    let console_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized. Log directory: {}", log_dir);
}
