//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (GATEWAY_CONFIG / --config)
//!     → loader.rs (parse & deserialize)
//!     → TUTOR_SERVICE_ADDR / --upstream overlay
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow running with no file at all
//! - The listen address is not part of the config (fixed at :8080)

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::{
    GatewayConfig, ObservabilityConfig, TimeoutConfig, UploadConfig, UpstreamConfig,
    DEFAULT_UPSTREAM_ADDRESS,
};
pub use validation::ValidationError;
