//! MCP tool modules.

pub mod entities;
