use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "WELLBEING_LOG";

/// Logs go to stderr so dashboard output on stdout stays clean.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
