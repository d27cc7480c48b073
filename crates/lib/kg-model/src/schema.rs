pub const FIELD_ID: &str = "@id";
pub const FIELD_TYPE: &str = "@type";
pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_DETAILED_DESCRIPTION: &str = "detailedDescription";
pub const FIELD_IMAGE: &str = "image";
pub const FIELD_URL: &str = "url";
pub const FIELD_RESULT_SCORE: &str = "resultScore";

pub const ENVELOPE_ITEM_LIST: &str = "itemListElement";
pub const ENVELOPE_RESULT: &str = "result";

pub const MID_PREFIX: &str = "kg:";
pub const DEFAULT_ENTITY_TYPE: &str = "Thing";

/// Strips the `kg:` namespace from an entity identifier, yielding the bare MID.
#[must_use]
pub fn strip_mid_prefix(id: &str) -> &str {
    id.strip_prefix(MID_PREFIX).unwrap_or(id)
}
