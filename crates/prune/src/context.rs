// ABOUTME: Per-build and per-page inputs for the passes: the destination set and page frontmatter.
// ABOUTME: Site-wide destinations take precedence over the page's own list; malformed data degrades to empty.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::links::DestinationSet;
use crate::sections::RemovalTitles;

/// Data shared by every page of one build.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    pub destinations: Option<DestinationSet>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_destinations(destinations: DestinationSet) -> Self {
        Self {
            destinations: Some(destinations),
        }
    }
}

/// Data attached to a single page by earlier stages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageData {
    #[serde(deserialize_with = "object_or_empty")]
    pub frontmatter: Map<String, Value>,
    #[serde(alias = "allSlugs")]
    pub all_slugs: Option<Value>,
}

/// `null` or any non-object frontmatter reads as empty.
fn object_or_empty<'de, D>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

impl PageData {
    pub fn new(frontmatter: Map<String, Value>) -> Self {
        Self {
            frontmatter,
            all_slugs: None,
        }
    }

    /// Decode page data from JSON.
    pub fn from_json_str(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The destinations to check links against for this page. A site-wide
    /// set is borrowed, a page-level list is decoded.
    pub fn destinations<'a>(&self, build: Option<&'a BuildContext>) -> Cow<'a, DestinationSet> {
        if let Some(set) = build.and_then(|b| b.destinations.as_ref()) {
            return Cow::Borrowed(set);
        }
        Cow::Owned(
            self.all_slugs
                .as_ref()
                .map(DestinationSet::from_value)
                .unwrap_or_default(),
        )
    }

    /// Section titles listed under `field` in the frontmatter.
    pub fn removal_titles(&self, field: &str) -> RemovalTitles {
        RemovalTitles::from_value(self.frontmatter.get(field))
    }
}
