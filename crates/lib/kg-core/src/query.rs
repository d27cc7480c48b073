//! Query construction for the entity search endpoint.
//!
//! Parameter inclusion follows the API's own conventions: list parameters are
//! comma-joined, `indent` is sent as the literal `True`, and `prefix` is sent
//! whenever the caller set it, including `false`.

use reqwest::Url;

pub const PARAM_KEY: &str = "key";
pub const PARAM_QUERY: &str = "query";
pub const PARAM_IDS: &str = "ids";
pub const PARAM_LANGUAGES: &str = "languages";
pub const PARAM_TYPES: &str = "types";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_INDENT: &str = "indent";
pub const PARAM_PREFIX: &str = "prefix";

/// Maximum `limit` accepted by the API.
pub const MAX_LIMIT: u32 = 500;

/// Options for a single entity search or lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub query: Option<String>,
    pub ids: Vec<String>,
    pub languages: Vec<String>,
    pub types: Vec<String>,
    pub limit: Option<u32>,
    pub indent: bool,
    pub prefix: Option<bool>,
}

impl SearchOptions {
    #[must_use]
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_ids(ids: Vec<String>) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    #[must_use]
    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
        self
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub const fn with_prefix(mut self, prefix: Option<bool>) -> Self {
        self.prefix = prefix;
        self
    }

    /// Returns the text query when it is present and non-empty.
    #[must_use]
    pub fn text_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|query| !query.is_empty())
    }

    /// True when the options name something to search for: a text query or at
    /// least one entity id.
    #[must_use]
    pub fn has_target(&self) -> bool {
        self.text_query().is_some() || !self.ids.is_empty()
    }
}

/// Builds the full request URL for `options` against `base`.
///
/// A `limit` of zero is treated as unset and omitted, matching how the API
/// client has always behaved.
#[must_use]
pub fn build_search_url(base: &Url, api_key: &str, options: &SearchOptions) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair(PARAM_KEY, api_key);

        if let Some(query) = options.text_query() {
            pairs.append_pair(PARAM_QUERY, query);
        }
        if !options.ids.is_empty() {
            pairs.append_pair(PARAM_IDS, &options.ids.join(","));
        }
        if !options.languages.is_empty() {
            pairs.append_pair(PARAM_LANGUAGES, &options.languages.join(","));
        }
        if !options.types.is_empty() {
            pairs.append_pair(PARAM_TYPES, &options.types.join(","));
        }
        if let Some(limit) = options.limit.filter(|limit| *limit != 0) {
            pairs.append_pair(PARAM_LIMIT, &limit.to_string());
        }
        if options.indent {
            pairs.append_pair(PARAM_INDENT, "True");
        }
        if let Some(prefix) = options.prefix {
            pairs.append_pair(PARAM_PREFIX, if prefix { "true" } else { "false" });
        }
    }
    url
}
