//! Brain call surface, payload types and error definitions.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::upstream::proto::SyllabusResponse;

/// The remote operations the gateway needs from the Brain.
///
/// Implementations must be safe to call from any number of tasks at once
/// without external locking.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Submit a document for analysis.
    ///
    /// `Ok(None)` means the Brain answered but produced nothing usable.
    async fn process_document(
        &self,
        upload: DocumentUpload,
    ) -> Result<Option<DocumentAnalysis>, UpstreamError>;

    /// Ask the Brain a single chat question.
    async fn chat(&self, message: &str) -> Result<String, UpstreamError>;
}

/// A document received on the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// The Brain's analysis of an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAnalysis {
    /// Whether the Brain considers the analysis successful.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Number of graph nodes the Brain created.
    pub nodes_created: i32,
    /// JSON-encoded concept graph. May be empty or malformed.
    pub graph_json: String,
}

impl DocumentAnalysis {
    /// Convert a wire response, treating the all-default message as no result.
    pub fn from_response(response: SyllabusResponse) -> Option<Self> {
        if response == SyllabusResponse::default() {
            return None;
        }
        Some(Self {
            success: response.success,
            message: response.message,
            nodes_created: response.nodes_created,
            graph_json: response.graph_json,
        })
    }
}

/// Errors from a remote call to the Brain.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The Brain (or the channel) answered with a gRPC status.
    #[error("upstream returned {code:?}: {message}")]
    Status { code: tonic::Code, message: String },

    /// The call did not finish before its deadline.
    #[error("upstream call timed out after {0:?}")]
    Timeout(Duration),
}

impl From<tonic::Status> for UpstreamError {
    fn from(status: tonic::Status) -> Self {
        Self::Status {
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}

impl UpstreamError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Status { .. } => "error",
            UpstreamError::Timeout(_) => "timeout",
        }
    }
}

/// Errors establishing the initial channel.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid upstream address '{uri}': {source}")]
    InvalidAddress {
        uri: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("failed to configure TLS for '{uri}': {source}")]
    Tls {
        uri: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("could not connect to upstream '{uri}': {source}")]
    Unreachable {
        uri: String,
        #[source]
        source: tonic::transport::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_response_is_no_result() {
        assert_eq!(DocumentAnalysis::from_response(SyllabusResponse::default()), None);
    }

    #[test]
    fn failed_analysis_is_still_a_result() {
        let analysis = DocumentAnalysis::from_response(SyllabusResponse {
            success: false,
            message: "Failed to read PDF".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(!analysis.success);
        assert_eq!(analysis.message, "Failed to read PDF");
    }

    #[test]
    fn status_translation_keeps_code_and_message() {
        let err = UpstreamError::from(tonic::Status::unavailable("connection refused"));
        assert_eq!(err.to_string(), "upstream returned Unavailable: connection refused");
        assert_eq!(err.kind(), "error");
        assert_eq!(UpstreamError::Timeout(Duration::from_secs(30)).kind(), "timeout");
    }
}
