//! The discovery document: the root manifest listing every other document.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::timestamp::Timestamp;

/// The discovery document (gbfs.json).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryFeed {
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub data: DiscoveryData,
}

/// One declared document: name plus URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedLink {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// The declared document list.
///
/// 3.0+ publishes a flat `feeds` list; 2.x groups feeds per language. The
/// flat form is preferred; for the grouped form the first language (in key
/// order, for determinism) supplies the list.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryData {
    pub feeds: Vec<FeedLink>,
    /// Populated only for the per-language grouping.
    pub languages: BTreeMap<String, Vec<FeedLink>>,
}

impl DiscoveryData {
    /// Feed name → URL, in declaration order for duplicates-last semantics.
    pub fn url_map(&self) -> BTreeMap<String, String> {
        self.feeds
            .iter()
            .map(|f| (f.name.clone(), f.url.clone()))
            .collect()
    }
}

impl<'de> Deserialize<'de> for DiscoveryData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let mut out = DiscoveryData::default();

        let Value::Object(map) = raw else {
            return Ok(out);
        };

        if let Some(Value::Array(feeds)) = map.get("feeds") {
            out.feeds = decode_links(feeds);
            return Ok(out);
        }

        let mut grouped = BTreeMap::new();
        for (language, entry) in &map {
            if let Some(Value::Array(feeds)) = entry.get("feeds") {
                grouped.insert(language.clone(), decode_links(feeds));
            }
        }
        if let Some(first) = grouped.values().next() {
            out.feeds = first.clone();
        }
        out.languages = grouped;
        Ok(out)
    }
}

fn decode_links(entries: &[Value]) -> Vec<FeedLink> {
    entries
        .iter()
        .map(|entry| FeedLink {
            name: entry
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            url: entry
                .get("url")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}
