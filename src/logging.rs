use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr diagnostics subscriber.
///
/// - 0 (default): `RUST_LOG` if set, otherwise warnings only
/// - 1 (-v): info
/// - 2 (-vv): debug
/// - 3+ (-vvv): trace
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // A second install (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .try_init();
}
