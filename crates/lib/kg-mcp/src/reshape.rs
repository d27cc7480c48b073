//! Conversion from upstream entity records to the compact tool output.

use kg_model::KnowledgeGraphEntity;
use kg_model::schema::strip_mid_prefix;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Compact entity record returned by the search and lookup tools.
///
/// Optional fields are omitted from the JSON output when the upstream entity
/// did not carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySummary {
    pub mid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_score: Option<Number>,
}

/// Tool payload: the reshaped entities and how many there are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityListing {
    pub entities: Vec<EntitySummary>,
    pub count: usize,
}

impl From<&KnowledgeGraphEntity> for EntitySummary {
    fn from(entity: &KnowledgeGraphEntity) -> Self {
        Self {
            mid: strip_mid_prefix(entity.id().unwrap_or_default()).to_string(),
            name: entity.name().unwrap_or_default().to_string(),
            types: entity.type_names(),
            description: non_empty(entity.description()),
            detailed_description: entity
                .detailed_description()
                .and_then(|detailed| detailed.article_body)
                .filter(|body| !body.is_empty()),
            image: entity
                .image()
                .and_then(|image| image.content_url)
                .filter(|url| !url.is_empty()),
            url: non_empty(entity.url()),
            result_score: entity.result_score().cloned(),
        }
    }
}

impl From<Vec<KnowledgeGraphEntity>> for EntityListing {
    fn from(entities: Vec<KnowledgeGraphEntity>) -> Self {
        let entities: Vec<EntitySummary> = entities.iter().map(EntitySummary::from).collect();
        Self {
            count: entities.len(),
            entities,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn entity(value: Value) -> KnowledgeGraphEntity {
        serde_json::from_value(value).expect("entity should deserialize")
    }

    #[test]
    fn full_entity_is_reshaped() {
        let summary = EntitySummary::from(&entity(json!({
            "@id": "kg:/m/0dl567",
            "name": "Taylor Swift",
            "@type": ["Person", "Thing"],
            "description": "American singer-songwriter",
            "detailedDescription": {
                "articleBody": "Taylor Alison Swift is an American singer-songwriter.",
                "url": "https://en.wikipedia.org/wiki/Taylor_Swift",
                "license": "https://en.wikipedia.org/wiki/Wikipedia:Text_of_Creative_Commons_Attribution-ShareAlike_3.0_Unported_License"
            },
            "image": {
                "contentUrl": "https://encrypted-tbn0.gstatic.com/images?q=tbn:1",
                "url": "https://commons.wikimedia.org/wiki/File:Taylor_Swift.png"
            },
            "url": "http://taylorswift.com/",
            "resultScore": 896.5
        })));

        assert_eq!(summary.mid, "/m/0dl567");
        assert_eq!(summary.name, "Taylor Swift");
        assert_eq!(summary.types, vec!["Person", "Thing"]);
        assert_eq!(summary.description.as_deref(), Some("American singer-songwriter"));
        assert_eq!(
            summary.detailed_description.as_deref(),
            Some("Taylor Alison Swift is an American singer-songwriter.")
        );
        assert_eq!(
            summary.image.as_deref(),
            Some("https://encrypted-tbn0.gstatic.com/images?q=tbn:1")
        );
        assert_eq!(summary.url.as_deref(), Some("http://taylorswift.com/"));
        assert_eq!(summary.result_score.as_ref().and_then(Number::as_f64), Some(896.5));
    }

    #[test]
    fn sparse_entity_gets_defaults_and_omits_optionals() {
        let summary = EntitySummary::from(&entity(json!({ "description": "" })));

        assert_eq!(summary.mid, "");
        assert_eq!(summary.name, "");
        assert_eq!(summary.types, vec!["Thing"]);

        let output = serde_json::to_value(&summary).expect("serialize summary");
        assert_eq!(output, json!({ "mid": "", "name": "", "type": ["Thing"] }));
    }

    #[test]
    fn integer_score_is_emitted_unchanged() {
        let summary = EntitySummary::from(&entity(json!({ "@id": "kg:/m/1", "resultScore": 50 })));

        let output = serde_json::to_value(&summary).expect("serialize summary");
        assert_eq!(output["resultScore"], json!(50));
        assert_eq!(
            serde_json::to_string(&summary).expect("serialize summary"),
            r#"{"mid":"/m/1","name":"","type":["Thing"],"resultScore":50}"#
        );
    }

    #[test]
    fn single_type_is_wrapped() {
        let summary = EntitySummary::from(&entity(json!({ "@id": "/g/11b6vwtjpg", "@type": "Place" })));

        assert_eq!(summary.mid, "/g/11b6vwtjpg");
        assert_eq!(summary.types, vec!["Place"]);
    }

    #[test]
    fn listing_counts_entities() {
        let listing = EntityListing::from(vec![
            entity(json!({ "@id": "kg:/m/1" })),
            entity(json!({ "@id": "kg:/m/2" })),
        ]);

        assert_eq!(listing.count, 2);
        assert_eq!(listing.entities[1].mid, "/m/2");
        assert_eq!(EntityListing::from(Vec::new()).count, 0);
    }
}
