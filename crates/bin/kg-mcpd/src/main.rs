//! Daemon entry point for the Knowledge Graph MCP server.
//!
//! Loads configuration from the command line and environment, builds the
//! Knowledge Graph client, and serves MCP over stdio and/or streamable HTTP.

mod config;

use std::sync::Arc;

use kg_core::KnowledgeGraphClient;
use kg_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tokio::task::JoinHandle;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::KgConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // stdout carries the stdio transport, so logs go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = KgConfig::from_args()?;
    let client = Arc::new(KnowledgeGraphClient::new(config.client.clone())?);

    let http = config.mcp_serve.then(|| {
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
        tokio::spawn(serve_streamable_http(client.clone(), http_config))
    });
    let stdio = config.enable_stdio.then(|| serve_stdio(client));

    tokio::select! {
        result = run_transports(stdio, http) => {
            if let Err(err) = &result {
                error!("transport failed: {err}");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
        }
    }
    Ok(())
}

/// Drives the enabled transports until they finish.
///
/// When stdio is enabled its end stops the HTTP server. A failing HTTP server
/// is an error in either mode.
async fn run_transports<S>(
    stdio: Option<S>,
    http: Option<JoinHandle<Result<(), BoxError>>>,
) -> Result<(), BoxError>
where
    S: Future<Output = Result<(), BoxError>>,
{
    match (stdio, http) {
        (Some(stdio), Some(mut http)) => {
            tokio::pin!(stdio);
            tokio::select! {
                result = &mut stdio => {
                    http.abort();
                    result
                }
                joined = &mut http => {
                    joined??;
                    stdio.await
                }
            }
        }
        (Some(stdio), None) => stdio.await,
        (None, Some(http)) => http.await?,
        (None, None) => Ok(()),
    }
}
