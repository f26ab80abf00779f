//! The shared gRPC channel to the Brain.
//!
//! # Responsibilities
//! - Pick transport security from the configured address
//! - Connect eagerly so an unreachable Brain fails startup
//! - Serve concurrent calls over one multiplexed HTTP/2 channel

use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};

use crate::config::UpstreamConfig;
use crate::upstream::proto::tutor_service_client::TutorServiceClient;
use crate::upstream::proto::{ChatRequest, SyllabusRequest};
use crate::upstream::target::{SecurityMode, UpstreamTarget};
use crate::upstream::types::{Brain, ConnectError, DocumentAnalysis, DocumentUpload, UpstreamError};

/// Process-lifetime connection to the Brain.
///
/// Cloning is cheap; clones share the underlying channel.
#[derive(Clone)]
pub struct UpstreamChannel {
    client: TutorServiceClient<Channel>,
    target: UpstreamTarget,
}

impl UpstreamChannel {
    /// Resolve the configured address and establish the channel.
    pub async fn connect(config: &UpstreamConfig) -> Result<Self, ConnectError> {
        let target = UpstreamTarget::resolve(&config.address);

        match target.security {
            SecurityMode::Plaintext => tracing::info!("Using plaintext connection (loopback)"),
            SecurityMode::Tls => tracing::info!("Using TLS connection"),
        }
        tracing::info!(uri = %target.uri, "Connecting to Brain");

        let mut endpoint = Endpoint::from_shared(target.uri.clone())
            .map_err(|source| ConnectError::InvalidAddress {
                uri: target.uri.clone(),
                source,
            })?
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if target.security == SecurityMode::Tls {
            endpoint = endpoint
                .tls_config(ClientTlsConfig::new().with_webpki_roots())
                .map_err(|source| ConnectError::Tls {
                    uri: target.uri.clone(),
                    source,
                })?;
        }

        let channel = endpoint
            .connect()
            .await
            .map_err(|source| ConnectError::Unreachable {
                uri: target.uri.clone(),
                source,
            })?;

        tracing::info!(uri = %target.uri, security = %target.security, "Connected to Brain");

        Ok(Self {
            client: TutorServiceClient::new(channel),
            target,
        })
    }

    /// The resolved target this channel talks to.
    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }
}

#[async_trait]
impl Brain for UpstreamChannel {
    async fn process_document(
        &self,
        upload: DocumentUpload,
    ) -> Result<Option<DocumentAnalysis>, UpstreamError> {
        let request = SyllabusRequest {
            file_name: upload.file_name,
            file_data: upload.content,
        };
        let response = self.client.clone().process_syllabus(request).await?;
        Ok(DocumentAnalysis::from_response(response.into_inner()))
    }

    async fn chat(&self, message: &str) -> Result<String, UpstreamError> {
        let request = ChatRequest {
            message: message.to_string(),
        };
        let response = self.client.clone().chat(request).await?;
        Ok(response.into_inner().response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_loopback_fails_to_connect() {
        // Port 1 on loopback refuses connections immediately.
        let config = UpstreamConfig {
            address: "127.0.0.1:1".into(),
            connect_timeout_secs: 2,
        };
        let err = UpstreamChannel::connect(&config).await.err().unwrap();
        assert!(matches!(err, ConnectError::Unreachable { .. }), "got {err:?}");
    }
}
