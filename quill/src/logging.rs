use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs to stderr, filtered by `RUST_LOG` (`info` when unset).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .init();
}
