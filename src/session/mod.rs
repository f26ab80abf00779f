//! Chat session bridge.
//!
//! # State Machine
//! ```text
//! Open ──read text frame──▶ chat(text) under deadline ──write reply──▶ Open
//!   │                                                       │
//!   ├─ read error / Close frame / end of stream ──▶ Closed  │
//!   ├─ shutdown signal ──▶ send Close ──▶ Closed            │
//!   └──────────────────────────── write error ──────────────┴──▶ Closed
//! ```
//!
//! # Design Decisions
//! - One task per session; the next frame is read only after the reply is written
//! - Any Brain failure, including the deadline, becomes the fixed fallback reply
//! - Failure causes are logged, never sent to the peer
//! - No frame size limit beyond the transport defaults

pub mod state;

use std::fmt::Display;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, SinkExt, Stream, StreamExt};

use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::resilience::with_deadline;
use crate::upstream::Brain;

pub use state::{ChatSession, CloseReason, SessionId, SessionState, SessionTracker};

/// Reply sent when the Brain fails or misses the deadline.
pub const FALLBACK_REPLY: &str = "I'm having trouble reaching my brain right now.";

/// Runs chat sessions against the shared Brain.
pub struct ChatBridge {
    brain: Arc<dyn Brain>,
    deadline: Duration,
    shutdown: Arc<Shutdown>,
    tracker: SessionTracker,
}

impl ChatBridge {
    pub fn new(brain: Arc<dyn Brain>, deadline: Duration, shutdown: Arc<Shutdown>) -> Self {
        Self {
            brain,
            deadline,
            shutdown,
            tracker: SessionTracker::new(),
        }
    }

    /// Number of sessions currently open.
    pub fn active_sessions(&self) -> u64 {
        self.tracker.active_count()
    }

    /// Service an upgraded WebSocket until it closes.
    pub async fn serve(&self, socket: WebSocket) -> ChatSession {
        let (outbound, inbound) = socket.split();
        self.run(outbound, inbound).await
    }

    /// The session loop, over any frame sink and stream.
    pub async fn run<Si, St, E>(&self, mut outbound: Si, mut inbound: St) -> ChatSession
    where
        Si: Sink<Message> + Unpin,
        Si::Error: Display,
        St: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
    {
        let _guard = self.tracker.track();
        let mut shutdown = self.shutdown.subscribe();
        let mut session = ChatSession::open();
        let session_id = session.id();

        tracing::info!(session_id = %session_id, "Client connected to chat");

        while session.is_open() {
            let next = tokio::select! {
                frame = inbound.next() => Some(frame),
                _ = shutdown.recv() => None,
            };

            let Some(frame) = next else {
                let _ = outbound.send(Message::Close(None)).await;
                session.close(CloseReason::Shutdown);
                break;
            };

            let text = match frame {
                Some(Ok(Message::Text(text))) => text.as_str().to_owned(),
                Some(Ok(Message::Binary(bytes))) => String::from_utf8_lossy(&bytes).into_owned(),
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                Some(Ok(Message::Close(_))) | None => {
                    session.close(CloseReason::PeerClosed);
                    break;
                }
                Some(Err(e)) => {
                    tracing::debug!(session_id = %session_id, error = %e, "Read from client failed");
                    session.close(CloseReason::ReadFailed);
                    break;
                }
            };

            tracing::debug!(session_id = %session_id, bytes = text.len(), "Received chat message");
            let reply = self.answer(session_id, &text).await;

            if let Err(e) = outbound.send(Message::Text(reply.into())).await {
                tracing::warn!(session_id = %session_id, error = %e, "Write to client failed");
                session.close(CloseReason::WriteFailed);
                break;
            }
            session.complete_turn();
        }

        tracing::info!(
            session_id = %session_id,
            turns = session.turns(),
            reason = ?session.close_reason(),
            "Client disconnected from chat"
        );
        session
    }

    async fn answer(&self, session_id: SessionId, text: &str) -> String {
        let start = Instant::now();
        match with_deadline(self.deadline, self.brain.chat(text)).await {
            Ok(reply) => {
                metrics::record_upstream_call("chat", "ok", start);
                reply
            }
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Chat call to Brain failed");
                metrics::record_upstream_call("chat", e.kind(), start);
                metrics::record_chat_fallback();
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
