use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "invalid log filter '{}'", value)
            }
            TelemetryError::Subscriber(err) => write!(f, "tracing subscriber already set: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Builds the filter from `RUST_LOG`, falling back to the configured level.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| {
            TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            }
        }),
    }
}

/// Installs the global subscriber. Output goes to stderr so CLI commands can
/// keep stdout for JSON.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_level() {
        std::env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "networking_lab=loud".to_string(),
        };
        let err = env_filter(&config).expect_err("malformed filter rejected");
        assert!(err.to_string().contains("networking_lab=loud"));
    }
}
