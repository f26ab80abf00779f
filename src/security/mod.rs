//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → access_policy.rs (CORS headers, preflight short-circuit)
//!     → Router → /upload: limits.rs (size ceiling before any Brain call)
//! ```
//!
//! # Design Decisions
//! - No caller authentication
//! - Size limits are checked before the body is buffered where possible

pub mod access_policy;
pub mod limits;

pub use access_policy::access_policy_middleware;
pub use limits::UploadLimits;
