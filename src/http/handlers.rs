//! Endpoint handlers.

use axum::{
    extract::{
        multipart::MultipartRejection,
        ws::WebSocketUpgrade,
        Multipart, State,
    },
    http::{HeaderMap, Method},
    response::Response,
    Json,
};

use crate::http::server::AppState;
use crate::upload::{UploadError, UploadReply};

/// `POST /upload`.
pub async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadReply>, UploadError> {
    state.uploads.handle(&headers, multipart).await
}

/// Any other method on `/upload`.
pub async fn method_not_allowed(State(state): State<AppState>, method: Method) -> UploadError {
    state.uploads.reject_method(&method)
}

/// `GET /ws`: upgrade and hand the socket to the chat bridge.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_failed_upgrade(|e| tracing::warn!(error = %e, "WebSocket upgrade failed"))
        .on_upgrade(move |socket| async move {
            state.chat.serve(socket).await;
        })
}
