// ABOUTME: HTML adapter: builds a Document from scraper's parse tree and serializes it back.
// ABOUTME: The class attribute maps to ClassList::Joined; void elements are self-closed on output.

use ego_tree::{NodeMut, NodeRef};
use scraper::Html;

use super::{ClassList, Document, Element, Node};

impl Document {
    /// Parse an HTML fragment (body content) into a document.
    pub fn parse_fragment(html: &str) -> Self {
        let fragment = Html::parse_fragment(html);
        let mut doc = Document::new();
        {
            let mut root = doc.tree_mut().root_mut();
            for child in fragment.root_element().children() {
                copy_node(child, &mut root);
            }
        }
        doc
    }

    /// Parse a complete HTML document, keeping doctype, head and body.
    pub fn parse_document(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut doc = Document::new();
        {
            let mut root = doc.tree_mut().root_mut();
            for child in parsed.tree.root().children() {
                copy_node(child, &mut root);
            }
        }
        doc
    }

    /// Serialize the tree back to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.tree().root().children() {
            serialize_node(child, false, &mut out);
        }
        out
    }
}

fn convert(node: &scraper::Node) -> Option<Node> {
    match node {
        scraper::Node::Text(text) => Some(Node::Text(owned(text))),
        scraper::Node::Comment(comment) => Some(Node::Comment(owned(comment))),
        scraper::Node::Doctype(doctype) => Some(Node::Doctype(doctype.name().to_string())),
        scraper::Node::Element(el) => {
            let mut element = Element::new(el.name());
            for (name, value) in el.attrs() {
                if name.eq_ignore_ascii_case("class") {
                    element.class = ClassList::Joined(value.to_string());
                } else {
                    element.attrs.set(name, value);
                }
            }
            Some(Node::Element(element))
        }
        _ => None,
    }
}

fn owned(s: &str) -> String {
    s.to_string()
}

fn copy_node(src: NodeRef<'_, scraper::Node>, dst: &mut NodeMut<'_, Node>) {
    let Some(node) = convert(src.value()) else {
        return;
    };
    let mut child = dst.append(node);
    for grandchild in src.children() {
        copy_node(grandchild, &mut child);
    }
}

fn serialize_node(node: NodeRef<'_, Node>, raw_text: bool, out: &mut String) {
    match node.value() {
        Node::Root => {
            for child in node.children() {
                serialize_node(child, raw_text, out);
            }
        }
        Node::Text(t) => {
            if raw_text {
                out.push_str(t);
            } else {
                out.push_str(&escape_text(t));
            }
        }
        Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        Node::Doctype(name) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        Node::Raw(markup) => out.push_str(markup),
        Node::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);

            if let Some(class) = el.class.to_attr_value() {
                push_attr(out, "class", &class);
            }
            for (k, v) in el.attrs.iter() {
                push_attr(out, k, v);
            }

            if is_void_element(&el.tag) {
                out.push_str(" />");
                return;
            }

            out.push('>');
            let raw = matches!(el.tag.as_str(), "script" | "style");
            for child in node.children() {
                serialize_node(child, raw, out);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

/// Escape attribute value
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Check if tag is void element
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
