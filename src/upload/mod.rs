//! Document submission bridge.
//!
//! # Data Flow
//! ```text
//! POST /upload (multipart)
//!     → size ceiling (declared length, streamed body, file field)
//!     → DocumentUpload (whole file in memory)
//!     → Brain::process_document under the upload deadline
//!     → graph.rs (explicit parse outcome)
//!     → JSON reply {message, nodes, graph, status}
//! ```
//!
//! Every rejection happens before the Brain is called.

pub mod graph;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart,
    },
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::observability::metrics;
use crate::resilience::with_deadline;
use crate::security::UploadLimits;
use crate::upstream::{Brain, DocumentUpload, UpstreamError};

pub use graph::GraphPayload;

/// Multipart field that carries the document.
pub const FILE_FIELD: &str = "file";

/// File name used when the part does not carry one.
pub const DEFAULT_FILE_NAME: &str = "upload.bin";

/// Successful upload reply body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadReply {
    pub message: String,
    pub nodes: i32,
    pub graph: Vec<Value>,
    pub status: &'static str,
}

/// Ways a document submission can fail.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("File too big")]
    TooLarge,

    #[error("Invalid file")]
    InvalidFile,

    #[error("AI Brain Error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("AI returned no data")]
    NoData,
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            UploadError::TooLarge | UploadError::InvalidFile => StatusCode::BAD_REQUEST,
            UploadError::Upstream(UpstreamError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            UploadError::Upstream(_) | UploadError::NoData => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            UploadError::MethodNotAllowed => "method_not_allowed",
            UploadError::TooLarge => "too_large",
            UploadError::InvalidFile => "invalid_file",
            UploadError::Upstream(UpstreamError::Timeout(_)) => "upstream_timeout",
            UploadError::Upstream(_) => "upstream_error",
            UploadError::NoData => "no_data",
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

impl From<MultipartError> for UploadError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge
        } else {
            tracing::debug!(error = %e, "Malformed multipart body");
            UploadError::InvalidFile
        }
    }
}

/// Translates document submissions into `process_document` calls.
pub struct UploadBridge {
    brain: Arc<dyn Brain>,
    limits: UploadLimits,
    deadline: Duration,
}

impl UploadBridge {
    pub fn new(brain: Arc<dyn Brain>, limits: UploadLimits, deadline: Duration) -> Self {
        Self {
            brain,
            limits,
            deadline,
        }
    }

    pub fn limits(&self) -> UploadLimits {
        self.limits
    }

    /// Reject a request to the upload path made with the wrong method.
    pub fn reject_method(&self, method: &Method) -> UploadError {
        let err = UploadError::MethodNotAllowed;
        tracing::debug!(method = %method, "Upload rejected: method not allowed");
        metrics::record_upload(err.outcome());
        err
    }

    /// Serve one `POST /upload`.
    pub async fn handle(
        &self,
        headers: &HeaderMap,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Json<UploadReply>, UploadError> {
        let result = self.read_and_submit(headers, multipart).await;
        match &result {
            Ok(_) => metrics::record_upload("success"),
            Err(e) => {
                metrics::record_upload(e.outcome());
                if e.status().is_server_error() {
                    tracing::error!(error = %e, "Upload failed");
                } else {
                    tracing::debug!(error = %e, "Upload rejected");
                }
            }
        }
        result.map(Json)
    }

    async fn read_and_submit(
        &self,
        headers: &HeaderMap,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<UploadReply, UploadError> {
        if self.limits.rejects_declared_length(content_length(headers)) {
            return Err(UploadError::TooLarge);
        }
        let multipart = multipart.map_err(|e| {
            tracing::debug!(error = %e, "Request is not multipart");
            UploadError::InvalidFile
        })?;
        let upload = self.read_upload(multipart).await?;
        self.submit(upload).await
    }

    /// Pull the first `file` field into memory, enforcing the ceiling.
    pub async fn read_upload(&self, mut multipart: Multipart) -> Result<DocumentUpload, UploadError> {
        while let Some(field) = multipart.next_field().await? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let file_name = field
                .file_name()
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_FILE_NAME)
                .to_string();
            let content = self.read_field(field).await?;
            return Ok(DocumentUpload { file_name, content });
        }
        Err(UploadError::InvalidFile)
    }

    async fn read_field(&self, mut field: Field<'_>) -> Result<Vec<u8>, UploadError> {
        let mut content = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if self.limits.rejects_file(content.len() + chunk.len()) {
                return Err(UploadError::TooLarge);
            }
            content.extend_from_slice(&chunk);
        }
        Ok(content)
    }

    /// Call the Brain and build the reply.
    pub async fn submit(&self, upload: DocumentUpload) -> Result<UploadReply, UploadError> {
        let file_name = upload.file_name.clone();
        tracing::info!(file_name = %file_name, bytes = upload.content.len(), "Submitting document to Brain");

        let start = Instant::now();
        let result = with_deadline(self.deadline, self.brain.process_document(upload)).await;
        metrics::record_upstream_call(
            "process_document",
            result.as_ref().map_or_else(|e| e.kind(), |_| "ok"),
            start,
        );

        let analysis = result?.ok_or(UploadError::NoData)?;
        if !analysis.success {
            tracing::warn!(file_name = %file_name, message = %analysis.message, "Brain reported an unsuccessful analysis");
        }

        let graph = match GraphPayload::parse(&analysis.graph_json) {
            GraphPayload::Parsed(values) => values,
            GraphPayload::Absent => Vec::new(),
            GraphPayload::Malformed(e) => {
                // Malformed graph data must not fail the upload.
                tracing::warn!(file_name = %file_name, error = %e, "Discarding malformed graph from Brain");
                Vec::new()
            }
        };

        Ok(UploadReply {
            message: analysis.message,
            nodes: analysis.nodes_created,
            graph,
            status: "success",
        })
    }
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::DocumentAnalysis;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Brain stub returning a fixed document outcome.
    struct DocumentBrain {
        outcome: Mutex<Option<Result<Option<DocumentAnalysis>, UpstreamError>>>,
        delay: Duration,
        seen: Mutex<Vec<DocumentUpload>>,
    }

    impl DocumentBrain {
        fn new(outcome: Result<Option<DocumentAnalysis>, UpstreamError>) -> Arc<Self> {
            Self::slow(outcome, Duration::ZERO)
        }

        fn slow(outcome: Result<Option<DocumentAnalysis>, UpstreamError>, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Some(outcome)),
                delay,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Brain for DocumentBrain {
        async fn process_document(
            &self,
            upload: DocumentUpload,
        ) -> Result<Option<DocumentAnalysis>, UpstreamError> {
            self.seen.lock().unwrap().push(upload);
            tokio::time::sleep(self.delay).await;
            self.outcome.lock().unwrap().take().expect("called once")
        }

        async fn chat(&self, _message: &str) -> Result<String, UpstreamError> {
            unreachable!("upload tests never chat")
        }
    }

    fn analysis(graph_json: &str) -> DocumentAnalysis {
        DocumentAnalysis {
            success: true,
            message: "Analyzed calc.pdf & Memorized Content".into(),
            nodes_created: 2,
            graph_json: graph_json.into(),
        }
    }

    fn bridge(brain: Arc<DocumentBrain>) -> UploadBridge {
        UploadBridge::new(brain, UploadLimits::new(1024), Duration::from_secs(120))
    }

    fn upload() -> DocumentUpload {
        DocumentUpload {
            file_name: "calc.pdf".into(),
            content: b"%PDF-1.7".to_vec(),
        }
    }

    #[tokio::test]
    async fn success_builds_reply_with_parsed_graph() {
        let brain = DocumentBrain::new(Ok(Some(analysis(r#"[{"name":"Limits"}]"#))));
        let reply = bridge(brain.clone()).submit(upload()).await.unwrap();

        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "message": "Analyzed calc.pdf & Memorized Content",
                "nodes": 2,
                "graph": [{"name": "Limits"}],
                "status": "success",
            })
        );
        assert_eq!(brain.seen.lock().unwrap()[0], upload());
    }

    #[tokio::test]
    async fn malformed_graph_degrades_to_empty() {
        let brain = DocumentBrain::new(Ok(Some(analysis("{not json"))));
        let reply = bridge(brain).submit(upload()).await.unwrap();
        assert!(reply.graph.is_empty());
        assert_eq!(reply.status, "success");
    }

    #[tokio::test]
    async fn missing_result_is_no_data() {
        let brain = DocumentBrain::new(Ok(None));
        let err = bridge(brain).submit(upload()).await.unwrap_err();
        assert!(matches!(err, UploadError::NoData));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "AI returned no data");
    }

    #[tokio::test]
    async fn brain_failure_is_translated() {
        let brain = DocumentBrain::new(Err(tonic::Status::internal("pdf parser crashed").into()));
        let err = bridge(brain).submit(upload()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "AI Brain Error: upstream returned Internal: pdf parser crashed");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_brain_hits_upload_deadline() {
        let brain = DocumentBrain::slow(Ok(Some(analysis("[]"))), Duration::from_secs(121));
        let err = bridge(brain).submit(upload()).await.unwrap_err();
        assert!(matches!(err, UploadError::Upstream(UpstreamError::Timeout(_))));
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(UploadError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(UploadError::TooLarge.status(), StatusCode::BAD_REQUEST);
        assert_eq!(UploadError::InvalidFile.status(), StatusCode::BAD_REQUEST);
    }
}
