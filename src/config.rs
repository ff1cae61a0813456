use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;
use crate::generators::GeneratorType;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            log_path: None,
            log_level: LevelFilter::Info,
            log_to_stdout: true,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Generation {
    pub generator: GeneratorType,
    pub min_price: f64,
    pub max_price: f64,
    pub seed: Option<u64>,
}

impl Default for Generation {
    fn default() -> Self {
        Generation {
            generator: GeneratorType::Standard,
            min_price: 0.0,
            max_price: 100.0,
            seed: None,
        }
    }
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub generation: Generation,
}

/// Loads the configuration file and returns a struct with all configuration items.
/// Without a path the built-in defaults are used.
///
/// # Arguments
///
/// * 'config_path' - optional path to the configuration file
pub fn load_config(config_path: Option<&str>) -> Result<Config, ConfigError> {
    match config_path {
        Some(path) => {
            let toml = fs::read_to_string(path)
                .map_err(|e| ConfigError::ReadError(format!("{}: {}", path, e)))?;
            Ok(toml::from_str(&toml)?)
        }
        None => Ok(Config::default()),
    }
}

/// Error depicting errors that occur while loading the configuration
///
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ReadError: {0}")]
    ReadError(String),
    #[error("ParseError: {0}")]
    ParseError(#[from] toml::de::Error),
}
