//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with both endpoints
//! - Wire up middleware (access policy, tracing, request ID, body limit)
//! - Serve on a listener until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::Request,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::handlers::{method_not_allowed, upload_handler, ws_handler};
use crate::lifecycle::{Shutdown, ShutdownSignal};
use crate::security::{access_policy_middleware, UploadLimits};
use crate::session::ChatBridge;
use crate::upload::UploadBridge;
use crate::upstream::Brain;

/// Fixed listen address for both endpoints.
pub const LISTEN_ADDRESS: &str = "0.0.0.0:8080";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub uploads: Arc<UploadBridge>,
    pub chat: Arc<ChatBridge>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create the server over an already connected Brain.
    pub fn new(config: &GatewayConfig, brain: Arc<dyn Brain>, shutdown: Arc<Shutdown>) -> Self {
        let uploads = Arc::new(UploadBridge::new(
            brain.clone(),
            UploadLimits::new(config.upload.max_file_bytes),
            Duration::from_secs(config.timeouts.upload_secs),
        ));
        let chat = Arc::new(ChatBridge::new(
            brain,
            Duration::from_secs(config.timeouts.chat_secs),
            shutdown,
        ));

        let router = Self::build_router(AppState { uploads, chat });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let body_limit = state.uploads.limits().max_body_bytes();

        Router::new()
            .route(
                "/upload",
                post(upload_handler)
                    .fallback(method_not_allowed)
                    .layer(DefaultBodyLimit::max(body_limit)),
            )
            .route("/ws", get(ws_handler))
            .with_state(state)
            .layer(middleware::from_fn(access_policy_middleware))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The configured router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, mut shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.recv().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
