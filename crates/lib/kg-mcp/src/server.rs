//! MCP server runners.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::routing::{get, post};
use kg_core::KnowledgeGraphClient;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use serde_json::{Map, Value};
use tracing::info;

use crate::KnowledgeGraphMcp;
use crate::dispatch::{self, ToolError, ToolResponse};

/// Configuration for the MCP streamable HTTP server.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
        }
    }
}

impl Default for McpHttpServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1:4020".parse().expect("valid MCP HTTP address"))
    }
}

/// Serves the MCP server over stdio until the peer closes the stream.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio(
    client: Arc<KnowledgeGraphClient>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service = KnowledgeGraphMcp::with_client(client);
    let (stdin, stdout) = stdio();
    let running = serve_server(service, (stdin, stdout)).await?;
    info!("knowledge graph MCP serving on stdio");
    let _ = running.waiting().await?;
    Ok(())
}

/// Serves the MCP server using streamable HTTP transport.
///
/// Besides `/mcp`, the listener answers `GET /health` and accepts plain JSON
/// tool invocations at `POST /tools/:name`.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http(
    client: Arc<KnowledgeGraphClient>,
    config: McpHttpServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = config.addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let app = build_router(client, &config);

    info!("knowledge graph MCP listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the HTTP router: MCP at `/mcp`, health check and tool gateway.
pub fn build_router(client: Arc<KnowledgeGraphClient>, config: &McpHttpServerConfig) -> Router {
    let service_client = client.clone();
    let service: StreamableHttpService<KnowledgeGraphMcp, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(KnowledgeGraphMcp::with_client(service_client.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                sse_keep_alive: config.sse_keep_alive,
                sse_retry: config.sse_retry,
                stateful_mode: config.stateful_mode,
                ..Default::default()
            },
        );

    Router::new()
        .route("/tools/:name", post(invoke_tool))
        .with_state(client)
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", service)
}

async fn invoke_tool(
    State(client): State<Arc<KnowledgeGraphClient>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Json<ToolResponse> {
    let arguments = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(arguments) => arguments,
            Err(err) => {
                let err = ToolError::InvalidRequest(format!("invalid tool arguments: {err}"));
                return Json(dispatch::record_outcome(&name, Err(err)));
            }
        }
    };
    Json(dispatch::invoke(&client, &name, arguments).await)
}
