//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (the document API names an existing service)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("crud.collection must not be empty")]
    EmptyCollection,

    #[error("crud.storage_service '{0}' is not defined in [services]")]
    UnknownService(String),

    #[error("service '{name}' has invalid url '{url}'")]
    ServiceUrl { name: String, url: String },

    #[error("{0} must be greater than zero")]
    ZeroValue(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.crud.collection.is_empty() {
        errors.push(ValidationError::EmptyCollection);
    }

    if !config.services.contains_key(&config.crud.storage_service) {
        errors.push(ValidationError::UnknownService(config.crud.storage_service.clone()));
    }

    // Sorted so the error order is stable across runs.
    let mut names: Vec<&String> = config.services.keys().collect();
    names.sort();
    for name in names {
        let service = &config.services[name];
        let url_ok = Url::parse(&service.url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !url_ok {
            errors.push(ValidationError::ServiceUrl {
                name: name.clone(),
                url: service.url.clone(),
            });
        }
        if service.timeout_secs == 0 {
            errors.push(ValidationError::ZeroValue(format!("services.{}.timeout_secs", name)));
        }
        if service.connect_timeout_secs == 0 {
            errors.push(ValidationError::ZeroValue(format!(
                "services.{}.connect_timeout_secs",
                name
            )));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroValue("timeouts.request_secs".to_string()));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroValue("security.max_body_size".to_string()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
