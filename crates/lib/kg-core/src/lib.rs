//! Core client for the Google Knowledge Graph Search API.
//!
//! This crate owns request construction ([`query`]), the immutable client
//! configuration ([`config`]), and the entity fetcher ([`client`]) that turns
//! an upstream response into [`kg_model::KnowledgeGraphEntity`] records.

pub mod client;
pub mod config;
pub mod error;
pub mod query;

pub use client::KnowledgeGraphClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use query::{SearchOptions, build_search_url};
pub use reqwest::Url;
