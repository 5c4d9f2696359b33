//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles document shape)
//! - Validate value ranges (timeouts > 0)
//! - Check credentials are usable in a Basic `Authorization` header
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ExporterConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::ExporterConfig;

/// A single semantic problem in an otherwise well-formed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    pub path: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(path: &'static str, message: &'static str) -> Self {
        Self { path, message }
    }
}

/// Check an [`ExporterConfig`] for values the agent cannot run with.
pub fn validate_config(config: &ExporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.http_server.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "/httpServer/requestTimeoutSeconds",
            "must be greater than 0",
        ));
    }

    if let Some(basic) = &config.http_server.authentication {
        if basic.username.is_empty() {
            errors.push(ValidationError::new(
                "/httpServer/authentication/basic/username",
                "must not be empty",
            ));
        }
        if basic.username.contains(':') {
            errors.push(ValidationError::new(
                "/httpServer/authentication/basic/username",
                "must not contain ':'",
            ));
        }
        if basic.password.is_empty() {
            errors.push(ValidationError::new(
                "/httpServer/authentication/basic/password",
                "must not be empty",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
