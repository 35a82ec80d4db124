use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps `--verbose` occurrences to a diagnostic level.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs a stderr `tracing` subscriber. The filter is derived from the
/// command line only; a second call is a no-op.
pub fn init_logging(verbosity: u8) {
    let level = level_for(verbosity);
    let filter = EnvFilter::new(format!("manifest_extract={level},extract={level}"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
