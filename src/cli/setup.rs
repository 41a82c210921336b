//! Runtime setup for the command-line front end.

use tracing_subscriber::EnvFilter;

/// Default log level for a `-v` count
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` takes precedence over the `-v` count. Records emitted through
/// the `log` facade are forwarded to the same subscriber.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("smpsgen={}", level_for_verbosity(verbosity)))
    });

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        // A subscriber is already installed
        eprintln!("Note: Logging already configured: {}", e);
    }
}
