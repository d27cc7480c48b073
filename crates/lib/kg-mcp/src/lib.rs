//! MCP server exposing the Google Knowledge Graph Search API.
//!
//! This crate wires the entity fetcher into rmcp tool handlers, reshapes
//! upstream entities into the compact tool output, and provides the stdio and
//! streamable HTTP runners.

mod tools;
pub mod dispatch;
pub mod reshape;
pub mod server;

use std::sync::Arc;

use kg_core::KnowledgeGraphClient;
use rmcp::{
    ErrorData,
    RoleServer,
    ServerHandler,
    handler::server::tool::ToolRouter,
};
#[allow(deprecated)]
use rmcp::model::{
    CallToolRequestParam,
    CallToolResult,
    ListToolsResult,
    PaginatedRequestParam,
    ServerCapabilities,
    ServerInfo,
};
use rmcp::service::RequestContext;
use serde_json::{Map, Value};

pub use dispatch::{ToolCall, ToolError, ToolResponse};
pub use reshape::{EntityListing, EntitySummary};
pub use tools::entities::{LookupParams, SearchParams};

const SERVER_INSTRUCTIONS: &str = r"google-knowledge-graph-mcp searches Google's public Knowledge Graph for real-world entities.

Tools:
- `search_knowledge_graph` finds entities by name or topic. Optional `languages` (default [en]),
  `types` (schema.org types such as Person, Organization, Place) and `limit` (1-500, default 20).
- `lookup_knowledge_graph_entities` fetches entities by Machine ID (MID) when the ids are already
  known, e.g. from a previous search.

Notes:
- MIDs look like `/m/0dl567` or `/g/11b6vwtjpg`; the `kg:` namespace prefix is stripped from results.
- Each entity carries `mid`, `name`, `type`, and when available `description`, `detailedDescription`,
  `image`, `url` and `resultScore`.
- Failures are returned as an `Error: ...` text result with the error flag set.";

/// MCP server wrapper around a shared Knowledge Graph client.
#[derive(Clone)]
pub struct KnowledgeGraphMcp {
    tool_router: ToolRouter<Self>,
    client: Arc<KnowledgeGraphClient>,
}

impl KnowledgeGraphMcp {
    /// Creates a new server owning the client.
    #[must_use]
    pub fn new(client: KnowledgeGraphClient) -> Self {
        Self::with_client(Arc::new(client))
    }

    /// Creates a new server using a shared client handle.
    #[must_use]
    pub fn with_client(client: Arc<KnowledgeGraphClient>) -> Self {
        Self {
            tool_router: Self::tool_router_entities(),
            client,
        }
    }

    #[must_use]
    pub fn client(&self) -> &KnowledgeGraphClient {
        &self.client
    }

    /// Invokes a tool by name outside of the MCP transport.
    pub async fn invoke(&self, name: &str, arguments: Value) -> ToolResponse {
        dispatch::invoke(&self.client, name, arguments).await
    }
}

// Every call goes through `dispatch`; the router only supplies tool schemas.
#[allow(deprecated)]
impl ServerHandler for KnowledgeGraphMcp {
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = request
            .arguments
            .map_or_else(|| Value::Object(Map::new()), Value::Object);
        self.invoke(&request.name, arguments)
            .await
            .into_call_result()
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_router.list_all()))
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
