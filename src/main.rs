//! Tutor gateway
//!
//! Front door between browser clients and the AI Brain service.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 TUTOR GATEWAY                │
//!                         │                                              │
//!   POST /upload          │  ┌────────┐   ┌──────────────┐               │
//!   ──────────────────────┼─▶│  http  │──▶│upload bridge │──┐            │
//!   (multipart document)  │  │ server │   └──────────────┘  │  ┌───────┐ │  gRPC
//!                         │  │        │                     ├─▶│  Brain│─┼──────▶ ace.TutorService
//!   GET /ws               │  │        │   ┌──────────────┐  │  │channel│ │
//!   ──────────────────────┼─▶│        │──▶│ chat bridge  │──┘  └───────┘ │
//!   (WebSocket chat)      │  └────────┘   └──────────────┘               │
//!                         │                                              │
//!                         │  config · lifecycle · observability · limits │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use tutor_gateway::config::resolve_config;
use tutor_gateway::lifecycle::startup;
use tutor_gateway::observability::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "tutor-gateway", version, about = "HTTP and WebSocket gateway to the AI Brain")]
struct Cli {
    /// Optional TOML configuration file
    #[arg(long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Brain address (host:port, or a full http/https URI)
    #[arg(long, env = "TUTOR_SERVICE_ADDR")]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.filter(|p| !p.as_os_str().is_empty());
    let config = match resolve_config(config_path.as_deref(), cli.upstream.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tutor-gateway: {e}");
            return Err(e.into());
        }
    };

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        upstream = %config.upstream.address,
        chat_timeout_secs = config.timeouts.chat_secs,
        upload_timeout_secs = config.timeouts.upload_secs,
        max_file_bytes = config.upload.max_file_bytes,
        "tutor-gateway starting"
    );

    if let Err(e) = startup::run(config).await {
        tracing::error!(error = %e, "Gateway stopped with an error");
        return Err(e.into());
    }
    Ok(())
}
