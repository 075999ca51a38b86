//! Process-wide `tracing` subscriber.
//!
//! Console output (coloured only on a terminal) and an optional log file in
//! `full`, `compact` or `json` format.

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use writer::LogFileWriter;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LoggerError::config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);

    // The file layer goes first so the console's ANSI setting does not leak
    // escape codes into span fields written to the file.
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::init(e.to_string()))
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = LogFileWriter::new(config)?;

    let layer = match config.format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(writer)
            .boxed(),
    };

    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_rejects_invalid_config_before_installing() {
        let config = LoggerConfig {
            level: "chatty".to_string(),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            init_logger(config),
            Err(LoggerError::Config { .. })
        ));
    }

    #[test]
    fn test_file_layer_fails_on_unwritable_path() {
        let dir = tempfile::TempDir::new().unwrap();
        // A directory cannot be opened as the log file
        let config = FileConfig {
            enabled: true,
            path: dir.path().to_path_buf(),
            append: true,
            format: LogFormat::Json,
        };
        assert!(matches!(file_layer(&config), Err(LoggerError::Io(_))));
    }
}
