use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::domain::DomainError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global tracing subscriber. `RUST_LOG` overrides the
/// configured level. Logs go to stderr so command output stays clean.
pub fn init_logging(config: &LoggingConfig) -> Result<(), DomainError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.level)?,
    };

    tracing_subscriber::registry()
        .with(output_layer(&config.format))
        .with(filter)
        .try_init()
        .map_err(|e| DomainError::internal(format!("Failed to install logger: {}", e)))?;

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

fn level_filter(level: &str) -> Result<EnvFilter, DomainError> {
    EnvFilter::try_new(level).map_err(|e| {
        DomainError::configuration(format!("Invalid logging.level '{}': {}", level, e))
    })
}

fn output_layer(format: &LogFormat) -> BoxedLayer {
    let layer = fmt::layer().with_writer(std::io::stderr);

    match format {
        LogFormat::Json => layer.json().with_current_span(false).boxed(),
        LogFormat::Pretty => layer.pretty().with_target(true).boxed(),
        LogFormat::Compact => layer.compact().with_target(false).boxed(),
    }
}
