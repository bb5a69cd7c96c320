use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins when set; otherwise `info`,
/// or `debug` for this crate when `verbose`. Logs go to stderr so the report
/// on stdout stays clean.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "info,stigler_diet=debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber installed earlier (e.g. by a test harness) is kept
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
