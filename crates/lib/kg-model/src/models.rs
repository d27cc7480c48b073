use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::schema::{
    DEFAULT_ENTITY_TYPE,
    ENVELOPE_RESULT,
    FIELD_DESCRIPTION,
    FIELD_DETAILED_DESCRIPTION,
    FIELD_ID,
    FIELD_IMAGE,
    FIELD_NAME,
    FIELD_RESULT_SCORE,
    FIELD_TYPE,
    FIELD_URL,
};

/// Entity record returned by the Knowledge Graph Search API.
///
/// The record is an open mapping: recognised fields are exposed through typed
/// accessors, and every other key the API supplies is kept as-is so that
/// serializing the entity reproduces the upstream payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeGraphEntity {
    fields: Map<String, Value>,
}

/// Long-form description attached to an entity, usually sourced from Wikipedia.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// Image attached to an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl KnowledgeGraphEntity {
    /// Builds an entity from one element of the `itemListElement` envelope.
    ///
    /// The element's `result` object becomes the entity and its sibling
    /// `resultScore` is merged into it. A missing or non-object `result`
    /// yields an entity carrying only the score.
    #[must_use]
    pub fn from_list_item(item: Value) -> Self {
        let Value::Object(mut item) = item else {
            return Self::default();
        };
        let mut fields = match item.remove(ENVELOPE_RESULT) {
            Some(Value::Object(result)) => result,
            _ => Map::new(),
        };
        if let Some(score) = item.remove(FIELD_RESULT_SCORE) {
            fields.insert(FIELD_RESULT_SCORE.to_string(), score);
        }
        Self { fields }
    }

    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.str_field(FIELD_ID)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field(FIELD_NAME)
    }

    /// Returns the entity's schema.org types as a list.
    ///
    /// A single string is wrapped, a list keeps its string members, and an
    /// absent or empty value falls back to `Thing`.
    #[must_use]
    pub fn type_names(&self) -> Vec<String> {
        match self.fields.get(FIELD_TYPE) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(Value::String(value)) if !value.is_empty() => vec![value.clone()],
            _ => vec![DEFAULT_ENTITY_TYPE.to_string()],
        }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.str_field(FIELD_DESCRIPTION)
    }

    #[must_use]
    pub fn detailed_description(&self) -> Option<DetailedDescription> {
        self.object_field(FIELD_DETAILED_DESCRIPTION)
    }

    #[must_use]
    pub fn image(&self) -> Option<EntityImage> {
        self.object_field(FIELD_IMAGE)
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.str_field(FIELD_URL)
    }

    /// Returns the relevance score exactly as the API encoded it.
    #[must_use]
    pub fn result_score(&self) -> Option<&Number> {
        match self.fields.get(FIELD_RESULT_SCORE) {
            Some(Value::Number(score)) => Some(score),
            _ => None,
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn object_field<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        match self.fields.get(key) {
            Some(value @ Value::Object(_)) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}
