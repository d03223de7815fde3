// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the stderr subscriber for extraction progress and skipped-document warnings.
/// `RUST_LOG` wins when set; otherwise `default_level` applies ("debug" under `--debug`).
pub fn setup_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Log filter falls back to '{}'", default_level);
}
