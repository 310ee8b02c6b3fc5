use tracing_subscriber::{EnvFilter, fmt};

/// JSON logs to stdout. `try_init` also bridges `log` records, which is what
/// actix's `Logger` middleware emits.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chirp_server=debug"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .json()
        .try_init();
}
