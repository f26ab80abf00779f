//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use tutor_gateway::config::GatewayConfig;
use tutor_gateway::http::HttpServer;
use tutor_gateway::lifecycle::Shutdown;
use tutor_gateway::upstream::{Brain, DocumentAnalysis, DocumentUpload, UpstreamError};

/// What the mock answers to `process_document`.
#[derive(Clone)]
pub enum DocumentBehavior {
    Reply(DocumentAnalysis),
    Empty,
    Fail(tonic::Code, &'static str),
}

/// Programmable in-process Brain.
pub struct MockBrain {
    document: DocumentBehavior,
    chat_delay: Duration,
    chat_fails: bool,
    document_calls: AtomicU32,
    chat_calls: AtomicU32,
    last_upload: Mutex<Option<DocumentUpload>>,
}

impl MockBrain {
    pub fn new() -> Self {
        Self {
            document: DocumentBehavior::Reply(analysis(3, r#"[{"id":1},{"id":2}]"#)),
            chat_delay: Duration::ZERO,
            chat_fails: false,
            document_calls: AtomicU32::new(0),
            chat_calls: AtomicU32::new(0),
            last_upload: Mutex::new(None),
        }
    }

    pub fn with_document(mut self, behavior: DocumentBehavior) -> Self {
        self.document = behavior;
        self
    }

    pub fn with_chat_delay(mut self, delay: Duration) -> Self {
        self.chat_delay = delay;
        self
    }

    pub fn with_failing_chat(mut self) -> Self {
        self.chat_fails = true;
        self
    }

    pub fn document_calls(&self) -> u32 {
        self.document_calls.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> u32 {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub fn last_upload(&self) -> Option<DocumentUpload> {
        self.last_upload.lock().unwrap().clone()
    }
}

#[async_trait]
impl Brain for MockBrain {
    async fn process_document(
        &self,
        upload: DocumentUpload,
    ) -> Result<Option<DocumentAnalysis>, UpstreamError> {
        self.document_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_upload.lock().unwrap() = Some(upload);
        match &self.document {
            DocumentBehavior::Reply(analysis) => Ok(Some(analysis.clone())),
            DocumentBehavior::Empty => Ok(None),
            DocumentBehavior::Fail(code, message) => {
                Err(tonic::Status::new(*code, *message).into())
            }
        }
    }

    /// Echoes "reply to <message>", or "world" for "hello".
    async fn chat(&self, message: &str) -> Result<String, UpstreamError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        if !self.chat_delay.is_zero() {
            tokio::time::sleep(self.chat_delay).await;
        }
        if self.chat_fails {
            return Err(tonic::Status::unavailable("brain offline").into());
        }
        Ok(match message {
            "hello" => "world".to_string(),
            other => format!("reply to {other}"),
        })
    }
}

pub fn analysis(nodes: i32, graph_json: &str) -> DocumentAnalysis {
    DocumentAnalysis {
        success: true,
        message: "Processed".to_string(),
        nodes_created: nodes,
        graph_json: graph_json.to_string(),
    }
}

/// A gateway serving on an ephemeral loopback port.
pub struct TestGateway {
    pub addr: SocketAddr,
    pub shutdown: Arc<Shutdown>,
    pub task: JoinHandle<std::io::Result<()>>,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

pub async fn start_gateway(config: GatewayConfig, brain: Arc<MockBrain>) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Arc::new(Shutdown::new());

    let server = HttpServer::new(&config, brain, shutdown.clone());
    let signal = shutdown.subscribe();
    let task = tokio::spawn(async move { server.run(listener, signal).await });

    TestGateway {
        addr,
        shutdown,
        task,
    }
}
