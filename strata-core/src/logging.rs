use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber from `RUST_LOG`, falling back
/// to `default_level` when the environment does not set a filter.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
