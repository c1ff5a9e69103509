pub mod commands;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod pipeline_config;
pub mod session; // Per-section sources, records, search and analysis files

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `info` (or `debug`
/// with `verbose`) and everything else at `warn`. Logs go to stderr.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        config::verbose_log_filter()
    } else {
        config::default_log_filter()
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("{} v{} starting", config::APP_NAME, config::APP_VERSION);
}
