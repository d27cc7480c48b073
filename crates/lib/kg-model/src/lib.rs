//! Entity models and schema constants for the Knowledge Graph MCP server.
//!
//! This crate defines the open-ended entity record returned by the Knowledge
//! Graph Search API and the JSON field names shared by the client and the MCP
//! layer.

pub mod models;
pub mod schema;

pub use models::*;
