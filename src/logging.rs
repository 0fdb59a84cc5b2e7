use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber used by both binaries.
///
/// Compact formatting; the level comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging() -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}
