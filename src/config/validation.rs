//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Recognized type names must be non-empty and distinct
//! - Value ranges (proxy depth > 0, parsable log filter)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("type name `{0}` must not be empty")]
    EmptyTypeName(&'static str),

    #[error("type name `{name}` is used for both {first} and {second}")]
    DuplicateTypeName {
        name: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("normalizer.max_proxy_depth must be greater than 0")]
    ZeroProxyDepth,

    #[error("invalid log level `{0}`")]
    InvalidLogLevel(String),
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut names: Vec<(&'static str, &str)> = vec![
        ("route", config.types.route.as_str()),
        ("redirect", config.types.redirect.as_str()),
    ];
    if let Some(fragment) = &config.types.fragment {
        names.push(("fragment", fragment.as_str()));
    }

    for (i, &(role, name)) in names.iter().enumerate() {
        if name.is_empty() {
            errors.push(ValidationError::EmptyTypeName(role));
            continue;
        }
        if let Some(&(first, _)) = names[..i].iter().find(|(_, other)| *other == name) {
            errors.push(ValidationError::DuplicateTypeName {
                name: name.to_string(),
                first,
                second: role,
            });
        }
    }

    if config.normalizer.max_proxy_depth == 0 {
        errors.push(ValidationError::ZeroProxyDepth);
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
