// ABOUTME: Transformer runs the dead-link and section passes over one page with shared options.
// ABOUTME: Built through TransformerBuilder; each pass can be switched off independently.

use tracing::debug;

use crate::context::{BuildContext, PageData};
use crate::links::remove_dead_links;
use crate::options::{TransformOptions, TransformerBuilder};
use crate::sections::remove_sections;
use crate::tree::Document;

/// Applies the configured passes to documents.
///
/// Holds no per-document state, so one instance can serve any number of
/// pages, including from several threads.
#[derive(Debug, Clone)]
pub struct Transformer {
    opts: TransformOptions,
    dead_links: bool,
    sections: bool,
}

impl Transformer {
    pub(crate) fn new(opts: TransformOptions, dead_links: bool, sections: bool) -> Self {
        Self {
            opts,
            dead_links,
            sections,
        }
    }

    /// Create a new TransformerBuilder.
    pub fn builder() -> TransformerBuilder {
        TransformerBuilder::new()
    }

    pub fn options(&self) -> &TransformOptions {
        &self.opts
    }

    /// Run the enabled passes over `doc` in place.
    pub fn apply(&self, doc: &mut Document, build: Option<&BuildContext>, page: &PageData) {
        if self.dead_links {
            let destinations = page.destinations(build);
            remove_dead_links(doc, &destinations, &self.opts.dead_links);
        }
        if self.sections {
            let titles = page.removal_titles(&self.opts.sections.metadata_field);
            remove_sections(doc, &titles, &self.opts.sections);
        }
        debug!(
            dead_links = self.dead_links,
            sections = self.sections,
            "page transformed"
        );
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(TransformOptions::default(), true, true)
    }
}
