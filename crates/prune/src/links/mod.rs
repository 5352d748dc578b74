// ABOUTME: Dead-link pass: classifies every anchor and neutralizes the ones pointing at missing pages.
// ABOUTME: Anchor, external and already-marked links are skipped; an empty destination set disables the pass.

//! Dead-link classification.
//!
//! Every `a` element with a non-empty `href` is classified in order, first
//! match wins:
//!
//! | Class | Condition |
//! |-------|-----------|
//! | `Anchor` | href starts with `#` |
//! | `External` | `http://`, `https://`, `//`, or an `external` class |
//! | `Neutralized` | already carries the marker class |
//! | `Unchecked` | the destination set is empty |
//! | `Valid` | `data-slug` or href resolves against the set |
//! | `Dead` | nothing resolved |
//!
//! Only `Dead` links are touched, according to the configured
//! [`Disposition`].

mod destinations;

pub use destinations::DestinationSet;

use std::fmt;

use tracing::{debug, trace};

use crate::options::{DeadLinkOptions, Disposition};
use crate::tree::{Document, Element};

const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "//"];
const EXTERNAL_CLASS: &str = "external";
const SLUG_ATTR: &str = "data-slug";

/// Outcome of classifying one anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkClass {
    Anchor,
    External,
    Neutralized,
    Unchecked,
    Valid,
    Dead,
}

impl fmt::Display for LinkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinkClass::Anchor => "anchor",
            LinkClass::External => "external",
            LinkClass::Neutralized => "neutralized",
            LinkClass::Unchecked => "unchecked",
            LinkClass::Valid => "valid",
            LinkClass::Dead => "dead",
        };
        write!(f, "{}", s)
    }
}

/// Classify an element. Returns `None` for anything that is not an anchor
/// with a non-empty href.
pub fn classify(el: &Element, destinations: &DestinationSet, marker_class: &str) -> Option<LinkClass> {
    if !el.is("a") {
        return None;
    }
    let href = el.attr("href").filter(|h| !h.is_empty())?;

    if href.starts_with('#') {
        return Some(LinkClass::Anchor);
    }
    if EXTERNAL_PREFIXES.iter().any(|p| href.starts_with(p)) {
        return Some(LinkClass::External);
    }
    if el.class.mentions(EXTERNAL_CLASS) {
        return Some(LinkClass::External);
    }
    if el.class.contains(marker_class) {
        return Some(LinkClass::Neutralized);
    }
    if destinations.is_empty() {
        return Some(LinkClass::Unchecked);
    }

    // A slug that does not resolve still gets a chance through the href.
    if let Some(slug) = el.attr(SLUG_ATTR) {
        if destinations.resolves_slug(slug) {
            return Some(LinkClass::Valid);
        }
    }

    if destinations.resolves_href(href) {
        Some(LinkClass::Valid)
    } else {
        Some(LinkClass::Dead)
    }
}

/// Apply a disposition to a dead anchor.
fn neutralize(el: &mut Element, disposition: Disposition, marker_class: &str) {
    match disposition {
        Disposition::Unlink => {
            el.tag = "span".to_string();
            el.attrs.remove("href");
        }
        Disposition::Mark => el.class.push(marker_class),
        Disposition::UnlinkAndMark => {
            el.class.push(marker_class);
            el.tag = "span".to_string();
            el.attrs.remove("href");
        }
    }
}

/// Neutralize every dead link in `doc`.
///
/// Leaves the tree untouched when `destinations` is empty. Running the pass
/// twice gives the same tree as running it once.
pub fn remove_dead_links(doc: &mut Document, destinations: &DestinationSet, opts: &DeadLinkOptions) {
    if destinations.is_empty() {
        debug!("no destinations known, skipping dead-link pass");
        return;
    }

    let disposition = opts.disposition();
    let marker = opts.marker_class_name.as_str();
    let mut dead = 0usize;

    for id in doc.element_ids() {
        let Some(class) = doc
            .element(id)
            .and_then(|el| classify(el, destinations, marker))
        else {
            continue;
        };

        if class != LinkClass::Dead {
            trace!(%class, "link kept");
            continue;
        }

        doc.with_element_mut(id, |el| {
            debug!(href = el.attr("href").unwrap_or_default(), %disposition, "dead link");
            neutralize(el, disposition, marker);
        });
        dead += 1;
    }

    debug!(dead, destinations = destinations.len(), "dead-link pass finished");
}
