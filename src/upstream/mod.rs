//! Brain (upstream) integration subsystem.
//!
//! # Data Flow
//! ```text
//! TUTOR_SERVICE_ADDR
//!     → target.rs (scheme, port and security selection)
//!     → client.rs (eager connect, shared tonic Channel)
//!     → Brain trait (process_document / chat)
//!     → proto.rs (ace.TutorService wire types)
//! ```
//!
//! # Design Decisions
//! - One channel for the process lifetime, never mutated after connect
//! - Bridges depend on the `Brain` trait, not on tonic
//! - No retries; deadlines are applied by the callers

pub mod client;
pub mod proto;
pub mod target;
pub mod types;

pub use client::UpstreamChannel;
pub use target::{SecurityMode, UpstreamTarget};
pub use types::{Brain, ConnectError, DocumentAnalysis, DocumentUpload, UpstreamError};
