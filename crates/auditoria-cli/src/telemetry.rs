use tracing_subscriber::EnvFilter;

use crate::config::{AuditoriaConfig, LogFormat};

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr; stdout carries command output.
pub fn init(config: &AuditoriaConfig) -> eyre::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| eyre::eyre!("invalid log level '{}': {e}", config.log_level))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| eyre::eyre!("failed to install tracing subscriber: {e}"))
}
