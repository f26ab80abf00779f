//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default Brain address used when nothing else is configured.
pub const DEFAULT_UPSTREAM_ADDRESS: &str = "localhost:50051";

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Brain connection settings.
    pub upstream: UpstreamConfig,

    /// Remote call deadlines.
    pub timeouts: TimeoutConfig,

    /// Document submission limits.
    pub upload: UploadConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Upstream (Brain) connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Brain address (e.g., "localhost:50051" or "brain.example.com").
    pub address: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_UPSTREAM_ADDRESS.to_string(),
            connect_timeout_secs: 5,
        }
    }
}

/// Deadlines for calls to the Brain.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for a single chat turn in seconds.
    pub chat_secs: u64,

    /// Deadline for a document submission call in seconds.
    pub upload_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            chat_secs: 30,
            upload_secs: 120,
        }
    }
}

/// Document submission configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes.
    pub max_file_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 10 * 1024 * 1024, // 10 MiB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub log_json: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
