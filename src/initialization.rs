use log::info;
use thiserror::Error;
use crate::cli::Args;
use crate::config::{load_config, Config, ConfigError};
use crate::logging::{setup_logger, LoggerError};

/// Loads configuration and sets up logging
///
/// # Arguments
///
/// * 'args' - parsed command line arguments
pub fn init(args: &Args) -> Result<Config, InitializationError> {
    // Load configuration
    let config = load_config(args.config.as_deref())?;

    // Setup logging
    let _ = setup_logger(config.general.log_path.as_deref(), config.general.log_level, config.general.log_to_stdout)?;

    // Print version
    info!("starting price generator version: {}", env!("CARGO_PKG_VERSION"));

    Ok(config)
}

/// Error depicting errors that occur while initializing the generator
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] ConfigError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
}
