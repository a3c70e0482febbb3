use tracing_subscriber::{EnvFilter, fmt};

/// Sets up the logging framework using tracing_subscriber.
///
/// Filters come from `RUST_LOG`; without it the level is `warn`, or `debug`
/// when `verbose` is set. Output goes to stderr so exports on stdout stay
/// clean.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded; keep that one
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("Logging setup complete.");
}
