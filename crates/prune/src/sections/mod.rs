// ABOUTME: Section pass: removes heading-delimited sections whose titles match a per-page list.
// ABOUTME: Flattens the tree, marks elements with the heading state machine, then deletes per parent in reverse.

//! Section removal.
//!
//! A section runs from a matching heading up to, not including, the next
//! heading of the same or a shallower level. The pass works in two phases:
//!
//! 1. Walk the tree depth first and record `(node, parent, position)` for
//!    every element. Feed each one to [`SectionState`] and keep the ones it
//!    marks for removal.
//! 2. Group the marked entries by parent and detach them in descending
//!    position order, so a removal never shifts a sibling still waiting to be
//!    removed.

mod state;

pub use state::{SectionState, Step};

use std::collections::HashMap;

use ego_tree::{NodeId, NodeRef};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, trace};

use crate::options::SectionOptions;
use crate::tree::{collect_text, Document, Node};

static HEADING_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^h([1-6])$").unwrap());

/// Section titles to remove, case-folded and trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalTitles(Vec<String>);

impl RemovalTitles {
    pub fn new<S: AsRef<str>>(titles: &[S]) -> Self {
        Self(
            titles
                .iter()
                .filter_map(|t| normalize_title(t.as_ref()))
                .collect(),
        )
    }

    /// Decode a metadata value. Missing, non-array or empty means no titles;
    /// non-string and blank entries are dropped.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(items) = value.and_then(Value::as_array) else {
            return Self::default();
        };
        Self(
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(normalize_title)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the heading text equals or contains one of the titles.
    pub fn matches(&self, heading_text: &str) -> bool {
        let text = heading_text.to_lowercase();
        let text = text.trim();
        self.0.iter().any(|t| text == t.as_str() || text.contains(t.as_str()))
    }
}

fn normalize_title(title: &str) -> Option<String> {
    let title = title.to_lowercase().trim().to_string();
    (!title.is_empty()).then_some(title)
}

/// Heading level of a tag name, `h1`..`h6`.
pub fn heading_level(tag: &str) -> Option<u8> {
    HEADING_TAG_RE
        .captures(tag)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// One flattened element and where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    node: NodeId,
    parent: NodeId,
    position: usize,
}

/// Depth-first list of elements with their parent and child position.
/// Heading contents belong to the heading and are not listed.
fn flatten(doc: &Document) -> Vec<Placement> {
    fn walk(node: NodeRef<'_, Node>, out: &mut Vec<Placement>) {
        for (position, child) in node.children().enumerate() {
            let Node::Element(el) = child.value() else {
                continue;
            };
            out.push(Placement {
                node: child.id(),
                parent: node.id(),
                position,
            });
            if heading_level(&el.tag).is_none() {
                walk(child, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(doc.tree().root(), &mut out);
    out
}

/// Run the state machine over the flattened elements and return the ones to
/// remove.
fn mark(doc: &Document, titles: &RemovalTitles, opts: &SectionOptions) -> Vec<Placement> {
    let mut state = SectionState::default();
    let mut marked = Vec::new();

    for placement in flatten(doc) {
        let Some(node) = doc.tree().get(placement.node) else {
            continue;
        };
        let Node::Element(el) = node.value() else {
            continue;
        };

        let step = match heading_level(&el.tag) {
            Some(level) => {
                let text = collect_text(node);
                let matches = titles.matches(&text);
                let was_removing = state.is_removing();
                let step = state.on_heading(level, matches, opts.remove_heading_itself);
                if matches && !was_removing && state.is_removing() {
                    debug!(heading = text.trim(), level, "removing section");
                } else if was_removing && !state.is_removing() {
                    trace!(heading = text.trim(), level, "section closed");
                }
                step
            }
            None => state.on_content(),
        };

        if step == Step::Remove {
            marked.push(placement);
        }
    }
    marked
}

/// Detach marked elements, grouped by parent, highest position first.
fn apply(doc: &mut Document, marked: Vec<Placement>) -> usize {
    let mut by_parent: HashMap<NodeId, Vec<Placement>> = HashMap::new();
    for placement in marked {
        by_parent.entry(placement.parent).or_default().push(placement);
    }

    let mut removed = 0;
    for (parent, mut items) in by_parent {
        items.sort_by(|a, b| b.position.cmp(&a.position));
        for item in items {
            match doc.remove_child_at(parent, item.position) {
                Some(id) if id == item.node => removed += 1,
                Some(id) => debug!(?id, expected = ?item.node, "removed node differs from marked node"),
                None => trace!(position = item.position, "nothing left at position"),
            }
        }
    }
    removed
}

/// Remove every section whose heading matches one of `titles`.
///
/// An empty title list leaves the tree untouched without walking it.
pub fn remove_sections(doc: &mut Document, titles: &RemovalTitles, opts: &SectionOptions) {
    if titles.is_empty() {
        return;
    }

    let marked = mark(doc, titles, opts);
    if marked.is_empty() {
        trace!(titles = titles.len(), "no matching sections");
        return;
    }
    let removed = apply(doc, marked);
    debug!(removed, titles = titles.len(), "section pass finished");
}
