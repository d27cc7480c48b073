//! Tool dispatch shared by every transport.
//!
//! Each call is validated, defaulted, sent to the entity fetcher and reshaped.
//! Failures never escape as transport faults: they are folded into the tagged
//! [`ToolResponse`] returned to the caller.

use std::{error::Error, fmt};

use kg_core::{ClientError, KnowledgeGraphClient, SearchOptions};
use kg_core::query::MAX_LIMIT;
use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::reshape::EntityListing;
use crate::tools::entities::{LookupParams, SearchParams};

pub const SEARCH_TOOL: &str = "search_knowledge_graph";
pub const LOOKUP_TOOL: &str = "lookup_knowledge_graph_entities";

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

#[derive(Debug)]
pub enum ToolError {
    InvalidRequest(String),
    UnknownTool(String),
    Client(ClientError),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(message) => write!(f, "{message}"),
            Self::UnknownTool(name) => write!(f, "Unknown tool: {name}"),
            Self::Client(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ToolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Client(err) => Some(err),
            Self::InvalidRequest(_) | Self::UnknownTool(_) => None,
        }
    }
}

impl From<ClientError> for ToolError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidRequest(message) => Self::InvalidRequest(message),
            other => Self::Client(other),
        }
    }
}

/// A named tool invocation with decoded arguments.
#[derive(Debug, Clone)]
pub enum ToolCall {
    Search(SearchParams),
    Lookup(LookupParams),
}

impl ToolCall {
    /// Resolves a tool name and its JSON arguments.
    ///
    /// # Errors
    /// Returns [`ToolError::UnknownTool`] for an unrecognised name and
    /// [`ToolError::InvalidRequest`] when the arguments do not decode.
    pub fn parse(name: &str, arguments: Value) -> Result<Self, ToolError> {
        match name {
            SEARCH_TOOL => serde_json::from_value(arguments)
                .map(Self::Search)
                .map_err(invalid_arguments),
            LOOKUP_TOOL => serde_json::from_value(arguments)
                .map(Self::Lookup)
                .map_err(invalid_arguments),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Search(_) => SEARCH_TOOL,
            Self::Lookup(_) => LOOKUP_TOOL,
        }
    }
}

fn invalid_arguments(err: serde_json::Error) -> ToolError {
    ToolError::InvalidRequest(format!("invalid tool arguments: {err}"))
}

/// Outcome of a tool call, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResponse {
    Success(EntityListing),
    Error { message: String },
}

impl ToolResponse {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Converts the outcome into an MCP tool result.
    ///
    /// Errors become a text payload prefixed with `Error:` and flagged with
    /// `is_error`, so callers always receive a well-formed result.
    ///
    /// # Errors
    /// Returns an MCP error only if the listing cannot be serialized.
    pub fn into_call_result(self) -> Result<CallToolResult, ErrorData> {
        match self {
            Self::Success(listing) => Ok(CallToolResult::success(vec![Content::json(listing)?])),
            Self::Error { message } => Ok(CallToolResult::error(vec![Content::text(format!(
                "Error: {message}"
            ))])),
        }
    }
}

impl From<Result<EntityListing, ToolError>> for ToolResponse {
    fn from(result: Result<EntityListing, ToolError>) -> Self {
        match result {
            Ok(listing) => Self::Success(listing),
            Err(err) => Self::from(err),
        }
    }
}

impl From<ToolError> for ToolResponse {
    fn from(err: ToolError) -> Self {
        Self::Error {
            message: err.to_string(),
        }
    }
}

/// Runs `search_knowledge_graph`.
///
/// # Errors
/// Returns [`ToolError::InvalidRequest`] for a blank query or a limit above
/// the API maximum, and client errors from the fetch.
pub async fn search(
    client: &KnowledgeGraphClient,
    params: SearchParams,
) -> Result<EntityListing, ToolError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ToolError::InvalidRequest("query is required".to_string()));
    }
    let limit = match params.limit {
        None | Some(0) => DEFAULT_SEARCH_LIMIT,
        Some(limit) if limit > MAX_LIMIT => {
            return Err(ToolError::InvalidRequest(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {limit}"
            )));
        }
        Some(limit) => limit,
    };

    let options = SearchOptions::for_query(query)
        .with_languages(languages_or_default(params.languages))
        .with_types(params.types.unwrap_or_default())
        .with_limit(Some(limit));
    let entities = client.search_entities(&options).await?;
    Ok(EntityListing::from(entities))
}

/// Runs `lookup_knowledge_graph_entities`.
///
/// # Errors
/// Returns [`ToolError::InvalidRequest`] when no non-blank id is given, and
/// client errors from the fetch.
pub async fn lookup(
    client: &KnowledgeGraphClient,
    params: LookupParams,
) -> Result<EntityListing, ToolError> {
    let ids: Vec<String> = params
        .ids
        .into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    if ids.is_empty() {
        return Err(ToolError::InvalidRequest(
            "ids must contain at least one entity id".to_string(),
        ));
    }

    let entities = client
        .lookup_entities(ids, languages_or_default(params.languages))
        .await?;
    Ok(EntityListing::from(entities))
}

/// Executes a decoded tool call.
///
/// # Errors
/// See [`search`] and [`lookup`].
pub async fn execute(
    client: &KnowledgeGraphClient,
    call: ToolCall,
) -> Result<EntityListing, ToolError> {
    match call {
        ToolCall::Search(params) => search(client, params).await,
        ToolCall::Lookup(params) => lookup(client, params).await,
    }
}

/// Resolves, executes and tags a tool call by name.
pub async fn invoke(client: &KnowledgeGraphClient, name: &str, arguments: Value) -> ToolResponse {
    let result = match ToolCall::parse(name, arguments) {
        Ok(call) => execute(client, call).await,
        Err(err) => Err(err),
    };
    record_outcome(name, result)
}

/// Logs and tags the outcome of a tool call.
pub(crate) fn record_outcome(
    name: &str,
    result: Result<EntityListing, ToolError>,
) -> ToolResponse {
    match &result {
        Ok(listing) => info!(tool = name, count = listing.count, "tool call completed"),
        Err(err) => warn!(tool = name, error = %err, "tool call failed"),
    }
    ToolResponse::from(result)
}

fn languages_or_default(languages: Option<Vec<String>>) -> Vec<String> {
    match languages {
        Some(languages) if !languages.is_empty() => languages,
        _ => vec![DEFAULT_LANGUAGE.to_string()],
    }
}
