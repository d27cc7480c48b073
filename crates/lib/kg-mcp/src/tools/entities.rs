use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::KnowledgeGraphMcp;
use crate::dispatch::{self, LOOKUP_TOOL, SEARCH_TOOL};

/// Parameters for searching entities by text.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchParams {
    /// Search query for entities (e.g., "Taylor Swift", "Eiffel Tower", "Python programming").
    pub query: String,
    /// Language codes (ISO 639, e.g., ["en", "es", "fr"]). Default: ["en"].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// Filter by schema.org types (e.g., ["Person", "Organization", "Place"]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Maximum results to return (1-500). Default: 20.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 500))]
    pub limit: Option<u32>,
}

/// Parameters for looking up entities by machine id.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LookupParams {
    /// Entity Machine IDs (MIDs) to lookup (e.g., ["/m/0dl567"]).
    #[schemars(length(min = 1))]
    pub ids: Vec<String>,
    /// Language codes for results. Default: ["en"].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

#[tool_router(router = tool_router_entities, vis = "pub")]
impl KnowledgeGraphMcp {
    #[tool(description = "Search Google Knowledge Graph for entities by name or topic. Returns structured information about real-world entities like people, places, organizations, and concepts from Google's public knowledge base.")]
    async fn search_knowledge_graph(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = dispatch::search(self.client(), params).await;
        dispatch::record_outcome(SEARCH_TOOL, result).into_call_result()
    }

    #[tool(description = "Look up specific Knowledge Graph entities by their Machine IDs (MIDs). Use this when you already know the entity IDs from a previous search. MIDs look like /m/0dl567 or /g/11b6vwtjpg.")]
    async fn lookup_knowledge_graph_entities(
        &self,
        Parameters(params): Parameters<LookupParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = dispatch::lookup(self.client(), params).await;
        dispatch::record_outcome(LOOKUP_TOOL, result).into_call_result()
    }
}
