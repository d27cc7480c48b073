use kg_model::KnowledgeGraphEntity;
use kg_model::schema::ENVELOPE_ITEM_LIST;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::query::{SearchOptions, build_search_url};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Entity fetcher for the Knowledge Graph Search API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct KnowledgeGraphClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl KnowledgeGraphClient {
    /// Creates a client from an immutable configuration.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Searches the Knowledge Graph and returns the matching entities.
    ///
    /// Each entity carries the upstream `resultScore`. A successful response
    /// without an `itemListElement` list yields no entities.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidRequest`] before any network traffic when
    /// `options` has neither a query nor ids, [`ClientError::Upstream`] for a
    /// non-success status, and transport or decode errors otherwise.
    pub async fn search_entities(
        &self,
        options: &SearchOptions,
    ) -> Result<Vec<KnowledgeGraphEntity>, ClientError> {
        if !options.has_target() {
            return Err(ClientError::InvalidRequest(
                "Either query or ids parameter is required".to_string(),
            ));
        }

        let url = build_search_url(&self.config.base_url, &self.config.api_key, options);
        debug!(
            query = options.text_query(),
            ids = options.ids.len(),
            limit = options.limit,
            "knowledge graph request"
        );

        let response = self
            .http
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(error = %err, "failed to read knowledge graph error body");
                    String::new()
                }
            };
            warn!(status = status.as_u16(), "knowledge graph request failed");
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)?;
        let entities = entities_from_response(payload);
        debug!(count = entities.len(), "knowledge graph response");
        Ok(entities)
    }

    /// Looks up entities by their machine ids.
    ///
    /// # Errors
    /// See [`Self::search_entities`].
    pub async fn lookup_entities(
        &self,
        ids: Vec<String>,
        languages: Vec<String>,
    ) -> Result<Vec<KnowledgeGraphEntity>, ClientError> {
        let options = SearchOptions::for_ids(ids).with_languages(languages);
        self.search_entities(&options).await
    }
}

/// Extracts entities from a search response envelope.
///
/// Anything other than an object with an `itemListElement` array yields an
/// empty list.
#[must_use]
pub fn entities_from_response(payload: Value) -> Vec<KnowledgeGraphEntity> {
    let Value::Object(mut envelope) = payload else {
        return Vec::new();
    };
    match envelope.remove(ENVELOPE_ITEM_LIST) {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(KnowledgeGraphEntity::from_list_item)
            .collect(),
        _ => Vec::new(),
    }
}
