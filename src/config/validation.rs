//! Configuration validation.
//!
//! Serde handles the syntax; this checks value ranges. Every problem is
//! reported, not just the first one.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream.address must not be empty")]
    EmptyUpstreamAddress,

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstream.address.trim().is_empty() {
        errors.push(ValidationError::EmptyUpstreamAddress);
    }

    let positive: [(&'static str, u64); 4] = [
        ("upstream.connect_timeout_secs", config.upstream.connect_timeout_secs),
        ("timeouts.chat_secs", config.timeouts.chat_secs),
        ("timeouts.upload_secs", config.timeouts.upload_secs),
        ("upload.max_file_bytes", config.upload.max_file_bytes as u64),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::ZeroValue { field });
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn reports_every_problem() {
        let mut config = GatewayConfig::default();
        config.upstream.address = "  ".into();
        config.timeouts.chat_secs = 0;
        config.upload.max_file_bytes = 0;
        config.observability.metrics_address = "not-an-address".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyUpstreamAddress,
                ValidationError::ZeroValue { field: "timeouts.chat_secs" },
                ValidationError::ZeroValue { field: "upload.max_file_bytes" },
                ValidationError::InvalidMetricsAddress("not-an-address".into()),
            ]
        );
    }

    #[test]
    fn metrics_address_ignored_when_disabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_enabled = false;
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());
    }
}
