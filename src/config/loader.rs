//! Configuration loading.
//!
//! Defaults, then an optional TOML file named by `SERVER_CONFIG`, then
//! environment overrides. The environment always wins.

use std::fs;
use std::path::Path;

use crate::config::schema::{Environment, LogFormat, ServerConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, message: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, message } => write!(f, "Invalid {}: {}", var, message),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate the process configuration.
///
/// Called exactly once at startup; the result is injected into server
/// construction and never re-read.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
    let mut config = match std::env::var("SERVER_CONFIG") {
        Ok(path) => load_file(Path::new(&path))?,
        Err(_) => ServerConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration from a TOML file.
pub fn load_file(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Apply environment variable overrides on top of a base configuration.
///
/// Takes the variable lookup as a function so the override logic stays a
/// pure transformation.
fn apply_env_overrides<F>(config: &mut ServerConfig, var: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = var("PORT") {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::Env {
            var: "PORT",
            message: format!("{:?} is not a valid port number", port),
        })?;
    }

    if let Some(host) = var("HOST") {
        config.listener.host = host;
    }

    if let Some(env) = var("NODE_ENV") {
        config.environment = Environment::from(env.as_str());
    }

    if let Some(key) = var("ARCJET_KEY") {
        if !key.trim().is_empty() {
            config.protection.key = Some(key);
        }
    }

    if let Some(format) = var("LOG_FORMAT") {
        config.observability.log_format = match format.trim().to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => {
                return Err(ConfigError::Env {
                    var: "LOG_FORMAT",
                    message: format!("{:?} is not one of: pretty, json", format),
                })
            }
        };
    }

    Ok(())
}
