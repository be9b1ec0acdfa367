//! Log output for the command line tool.

use std::io;

use tracing_subscriber::EnvFilter;

/// Routes `log` records into `tracing` and prints them to stderr.
///
/// Defaults to `info`; `RUST_LOG` overrides (e.g. `RUST_LOG=uber_noise_core=trace`).
pub fn init() -> anyhow::Result<()> {
    tracing_log::LogTracer::init()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
