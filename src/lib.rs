//! Tutor gateway library: the HTTP/WebSocket front door to the AI Brain.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;
pub mod session;
pub mod upload;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use session::ChatBridge;
pub use upload::UploadBridge;
pub use upstream::{Brain, UpstreamChannel};
