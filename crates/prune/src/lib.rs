// ABOUTME: Main library entry point for deadwood, the post-parse page cleanup passes.
// ABOUTME: Re-exports the public API: Document, Transformer, the two passes, options, and context types.

//! deadwood - document-tree passes for static site pages.
//!
//! Two passes run over an already-parsed page:
//!
//! - the dead-link pass neutralizes internal links whose target is not in
//!   the build's [`DestinationSet`];
//! - the section pass removes heading-delimited sections listed in the page's
//!   frontmatter.
//!
//! # Example
//!
//! ```
//! use deadwood_prune::{BuildContext, Document, PageData, Transformer};
//!
//! let mut doc = Document::parse_fragment(
//!     r#"<p><a href="/notes/rust">ok</a> <a href="/notes/gone">gone</a></p>"#,
//! );
//! let build = BuildContext::with_destinations(["notes/rust"].iter().collect());
//! let page = PageData::default();
//!
//! let transformer = Transformer::builder().build().unwrap();
//! transformer.apply(&mut doc, Some(&build), &page);
//!
//! assert_eq!(
//!     doc.to_html(),
//!     r#"<p><a href="/notes/rust">ok</a> <span class="dead-link">gone</span></p>"#,
//! );
//! ```

pub mod context;
pub mod error;
pub mod links;
pub mod options;
pub mod sections;
pub mod transform;
pub mod tree;

pub use crate::context::{BuildContext, PageData};
pub use crate::error::{Result, TransformError};
pub use crate::links::{classify, remove_dead_links, DestinationSet, LinkClass};
pub use crate::options::{
    DeadLinkOptions, Disposition, SectionOptions, TransformOptions, TransformerBuilder,
};
pub use crate::sections::{remove_sections, RemovalTitles, SectionState, Step};
pub use crate::transform::Transformer;
pub use crate::tree::{ClassList, Document, Element, Node};
