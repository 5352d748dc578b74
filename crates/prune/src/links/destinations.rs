// ABOUTME: The set of pages that exist in the build and the rules for resolving links against it.
// ABOUTME: Handles trailing slashes, leading slashes, .html suffixes, and /index equivalence.

use std::collections::HashSet;

use serde_json::Value;

const INDEX_SUFFIX: &str = "/index";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Destination {
    /// Member with one trailing slash removed.
    trimmed: String,
    /// `trimmed` without leading slashes.
    bare: String,
}

impl Destination {
    fn new(raw: &str) -> Self {
        let trimmed = strip_one_trailing_slash(raw).to_string();
        let bare = trimmed.trim_start_matches('/').to_string();
        Self { trimmed, bare }
    }

    fn matches_slug(&self, slug: &str) -> bool {
        let slug = strip_one_trailing_slash(slug);
        let dest = self.trimmed.as_str();
        slug == dest || is_index_of(slug, dest) || is_index_of(dest, slug)
    }

    fn matches_href(&self, href: &HrefForms<'_>) -> bool {
        let trimmed = self.trimmed.as_str();
        let bare = self.bare.as_str();

        href.stem == trimmed
            || href.bare == trimmed
            || href.clean == trimmed
            || href.raw.strip_prefix('/') == Some(trimmed)
            || href.raw == trimmed
            || href.stem == bare
            || href.bare == bare
            || [trimmed, bare]
                .into_iter()
                .any(|dest| is_index_of(dest, &href.stem) || is_index_of(&href.stem, dest))
    }
}

/// `candidate` is `base` + `/index`, or the site index when `base` is empty.
fn is_index_of(candidate: &str, base: &str) -> bool {
    candidate.strip_suffix(INDEX_SUFFIX) == Some(base) || (base.is_empty() && candidate == "index")
}

fn strip_one_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}

/// The comparison forms of one href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HrefForms<'a> {
    /// Path part of the href, query and fragment cut off.
    raw: &'a str,
    /// `raw` minus one leading slash.
    clean: &'a str,
    /// `clean` minus `.html`, minus one trailing slash.
    stem: &'a str,
    /// `raw` minus `.html`, all outer slashes trimmed.
    bare: &'a str,
}

impl<'a> HrefForms<'a> {
    pub(crate) fn new(href: &'a str) -> Self {
        let raw = href
            .split(|c: char| c == '#' || c == '?')
            .next()
            .unwrap_or(href);
        let clean = raw.strip_prefix('/').unwrap_or(raw);
        let stem = strip_one_trailing_slash(clean.strip_suffix(".html").unwrap_or(clean));
        let bare = raw
            .strip_suffix(".html")
            .unwrap_or(raw)
            .trim_matches('/');
        Self {
            raw,
            clean,
            stem,
            bare,
        }
    }
}

/// Every page the build knows about.
///
/// Immutable for the duration of a pass. An empty set disables dead-link
/// detection entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationSet {
    entries: Vec<Destination>,
    /// Trimmed forms already in `entries`.
    seen: HashSet<String>,
}

impl DestinationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON array of strings. Anything else is an empty set;
    /// non-string entries are ignored.
    pub fn from_value(value: &Value) -> Self {
        match value.as_array() {
            Some(items) => items.iter().filter_map(Value::as_str).collect(),
            None => Self::default(),
        }
    }

    pub fn insert(&mut self, destination: &str) {
        let dest = Destination::new(destination);
        if self.seen.insert(dest.trimmed.clone()) {
            self.entries.push(dest);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if a `data-slug` style identifier names a known page.
    pub fn resolves_slug(&self, slug: &str) -> bool {
        self.entries.iter().any(|d| d.matches_slug(slug))
    }

    /// True if an internal href points at a known page.
    ///
    /// Unlike a plain string comparison, the query string and fragment are
    /// cut off first: `/notes/rust#ownership` and `/notes/rust?tab=2` both
    /// resolve against `notes/rust`. Only the path has to name a page.
    pub fn resolves_href(&self, href: &str) -> bool {
        let forms = HrefForms::new(href);
        self.entries.iter().any(|d| d.matches_href(&forms))
    }
}

impl<S: AsRef<str>> FromIterator<S> for DestinationSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = DestinationSet::new();
        for item in iter {
            set.insert(item.as_ref());
        }
        set
    }
}
