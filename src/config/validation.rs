//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and reports every
//! problem at once rather than stopping at the first.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("database.{0} must not be empty")]
    EmptyField(&'static str),

    #[error("database.max_connections must be at least 1")]
    PoolSize,

    #[error("retries.max_attempts must be at least 1")]
    MaxAttempts,

    #[error("retries.base_delay_ms ({base}) exceeds retries.max_delay_ms ({max})")]
    BackoffRange { base: u64, max: u64 },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.request_secs ({request}) must exceed retries.deadline_secs ({deadline})")]
    RequestShorterThanRetries { request: u64, deadline: u64 },
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let db = &config.database;
    if db.host.trim().is_empty() {
        errors.push(ValidationError::EmptyField("host"));
    }
    if db.user.trim().is_empty() {
        errors.push(ValidationError::EmptyField("user"));
    }
    if db.database.trim().is_empty() {
        errors.push(ValidationError::EmptyField("database"));
    }
    if db.max_connections == 0 {
        errors.push(ValidationError::PoolSize);
    }
    if db.acquire_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("database.acquire_timeout_secs"));
    }

    let retries = &config.retries;
    if retries.max_attempts == 0 {
        errors.push(ValidationError::MaxAttempts);
    }
    if retries.base_delay_ms > retries.max_delay_ms {
        errors.push(ValidationError::BackoffRange {
            base: retries.base_delay_ms,
            max: retries.max_delay_ms,
        });
    }
    if retries.deadline_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("retries.deadline_secs"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    } else if config.timeouts.request_secs <= retries.deadline_secs {
        errors.push(ValidationError::RequestShorterThanRetries {
            request: config.timeouts.request_secs,
            deadline: retries.deadline_secs,
        });
    }
    if config.observability.metrics_upkeep_secs == 0 {
        errors.push(ValidationError::ZeroTimeout(
            "observability.metrics_upkeep_secs",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
