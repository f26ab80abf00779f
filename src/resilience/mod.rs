//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to the Brain:
//!     → timeouts.rs (enforce chat / upload deadline)
//!     → On failure: caller translates (fallback reply or error response)
//! ```
//!
//! # Design Decisions
//! - Every Brain call has a deadline
//! - No retries and no circuit breaking; a failed call fails its turn only

pub mod timeouts;

pub use timeouts::with_deadline;
