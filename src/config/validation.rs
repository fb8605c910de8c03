//! Configuration validation.
//!
//! Semantic checks on an already-deserialized configuration. Returns all
//! violations, not just the first, so a broken deployment can be fixed in
//! one pass.

use crate::config::schema::ServerConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidPort,
    EmptyOrigin,
    ZeroRate(&'static str),
    ZeroBodyLimit,
    EmptyLogLevel,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidPort => write!(f, "listener.port must be non-zero"),
            ValidationError::EmptyOrigin => write!(f, "cors.allowed_origins contains an empty entry"),
            ValidationError::ZeroRate(field) => write!(f, "protection.{} must be non-zero", field),
            ValidationError::ZeroBodyLimit => write!(f, "security.max_body_size must be non-zero"),
            ValidationError::EmptyLogLevel => write!(f, "observability.log_level must not be empty"),
        }
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    if config.cors.allowed_origins.iter().any(|o| o.trim().is_empty()) {
        errors.push(ValidationError::EmptyOrigin);
    }

    if config.protection.requests_per_second == 0 {
        errors.push(ValidationError::ZeroRate("requests_per_second"));
    }
    if config.protection.burst_size == 0 {
        errors.push(ValidationError::ZeroRate("burst_size"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.observability.log_level.trim().is_empty() {
        errors.push(ValidationError::EmptyLogLevel);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
