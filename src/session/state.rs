//! Chat session state and live-session tracking.
//!
//! # Responsibilities
//! - Track session state (Open → Closed)
//! - Generate unique session IDs for tracing
//! - Count live sessions for the active-sessions gauge

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::observability::metrics;

/// Unique identifier for a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a new unique session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Upgraded and servicing frames.
    Open,
    /// Terminal; the connection has been released.
    Closed,
}

/// Why a session closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Peer sent a Close frame or the stream ended.
    PeerClosed,
    /// Reading the next frame failed.
    ReadFailed,
    /// Writing a reply failed.
    WriteFailed,
    /// The gateway is shutting down.
    Shutdown,
}

/// One duplex connection, owned by the task that services it.
#[derive(Debug)]
pub struct ChatSession {
    id: SessionId,
    state: SessionState,
    turns: u64,
    close_reason: Option<CloseReason>,
}

impl ChatSession {
    /// A freshly upgraded session.
    pub fn open() -> Self {
        Self {
            id: SessionId::new(),
            state: SessionState::Open,
            turns: 0,
            close_reason: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Completed request/reply round trips.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    pub(crate) fn complete_turn(&mut self) {
        self.turns += 1;
    }

    /// Move to `Closed`. Closing twice keeps the first reason.
    pub(crate) fn close(&mut self, reason: CloseReason) {
        if self.state == SessionState::Open {
            self.state = SessionState::Closed;
            self.close_reason = Some(reason);
        }
    }
}

/// Counts live sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    active_count: Arc<AtomicU64>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new live session. Returns a guard that decrements on drop.
    pub fn track(&self) -> SessionGuard {
        let count = self.active_count.fetch_add(1, Ordering::SeqCst) + 1;
        metrics::set_active_sessions(count);
        SessionGuard {
            active_count: Arc::clone(&self.active_count),
        }
    }

    /// Current count of live sessions.
    pub fn active_count(&self) -> u64 {
        self.active_count.load(Ordering::SeqCst)
    }
}

/// Guard that tracks a session's lifetime.
#[derive(Debug)]
pub struct SessionGuard {
    active_count: Arc<AtomicU64>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let count = self.active_count.fetch_sub(1, Ordering::SeqCst) - 1;
        metrics::set_active_sessions(count);
    }
}
