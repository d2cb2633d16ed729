//! Wire types for the classifier adapter (§6 classifier wire contract).

use serde::{Deserialize, Deserializer, Serialize};

/// Which set a classified item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlCategory {
    Target,
    Seed,
}

/// One item as returned by the classifier wire format: `{url,
/// url_description, extension, pagination, url_category}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifiedItem {
    pub url: String,
    #[serde(default)]
    pub url_description: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    /// Some classifier backends send this as a JSON boolean, others as the
    /// literal string `"true"`/`"false"`; accept both.
    #[serde(default, deserialize_with = "deserialize_loose_bool")]
    pub pagination: bool,
    pub url_category: UrlCategory,
}

fn deserialize_loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        Some(BoolOrString::Bool(b)) => Ok(b),
        Some(BoolOrString::Str(s)) => Ok(s.eq_ignore_ascii_case("true")),
        None => Ok(false),
    }
}

/// The normalized, partitioned result of a classify() call (§4.5).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedUrls {
    pub targets: Vec<String>,
    pub seeds: Vec<String>,
}
