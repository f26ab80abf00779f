//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → handlers.rs
//!         POST /upload → upload bridge
//!         GET  /ws     → upgrade → chat bridge
//!     → Send to client
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer, LISTEN_ADDRESS};
