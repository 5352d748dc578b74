// ABOUTME: In-memory document tree the passes operate on, backed by ego_tree.
// ABOUTME: Provides Node, Element, Attributes, and Document with ordered, parent-linked children.

//! Document tree for the transform passes.
//!
//! A [`Document`] is an ordered tree rooted at [`Node::Root`]. Elements carry a
//! tag name, ordered attributes and a [`ClassList`]; text, comments, raw
//! markup and doctypes are leaves. The tree is owned exclusively by one pass
//! at a time.

mod class;
pub mod hast;
pub mod html;

pub use class::ClassList;

use ego_tree::{NodeId, NodeRef, Tree};

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Root,
    Element(Element),
    Text(String),
    Comment(String),
    Doctype(String),
    /// Markup carried through verbatim, e.g. a hast `raw` node.
    Raw(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// Ordered attribute map. The `class` attribute lives in [`Element::class`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing the value in place if it already exists.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.0.iter().position(|(k, _)| k == name)?;
        Some(self.0.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Attributes,
    pub class: ClassList,
    /// hast property keys that do not follow the camelCase mapping,
    /// keyed by attribute name.
    pub(crate) property_keys: Vec<(String, String)>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Attributes::default(),
            class: ClassList::Absent,
            property_keys: Vec::new(),
        }
    }

    /// Builder-style attribute setter. `class` is routed to the class list.
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        if name.eq_ignore_ascii_case("class") {
            self.class = ClassList::Joined(value.into());
        } else {
            self.attrs.set(name, value);
        }
        self
    }

    pub fn with_class(mut self, class: ClassList) -> Self {
        self.class = class;
        self
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }
}

/// A single page's document tree.
#[derive(Debug, Clone)]
pub struct Document {
    tree: Tree<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(Node::Root),
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn tree(&self) -> &Tree<Node> {
        &self.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut Tree<Node> {
        &mut self.tree
    }

    /// Ids of every element reachable from the root, in document order.
    pub fn element_ids(&self) -> Vec<NodeId> {
        self.tree
            .root()
            .descendants()
            .filter(|n| matches!(n.value(), Node::Element(_)))
            .map(|n| n.id())
            .collect()
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.tree.get(id).and_then(|n| n.value().as_element())
    }

    /// Run `f` against the element at `id`, if that node is an element.
    pub fn with_element_mut<R>(&mut self, id: NodeId, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        let mut node = self.tree.get_mut(id)?;
        match node.value() {
            Node::Element(el) => Some(f(el)),
            _ => None,
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        match self.tree.get(id) {
            Some(node) => collect_text(node),
            None => String::new(),
        }
    }

    /// Ids of the direct children of `parent`.
    pub fn children_of(&self, parent: NodeId) -> Vec<NodeId> {
        self.tree
            .get(parent)
            .map(|n| n.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }

    /// Detach the child currently at `position` under `parent`.
    ///
    /// Returns the id of the removed node, or `None` if there was no child at
    /// that position.
    pub fn remove_child_at(&mut self, parent: NodeId, position: usize) -> Option<NodeId> {
        let id = self.tree.get(parent)?.children().nth(position)?.id();
        self.tree.get_mut(id)?.detach();
        Some(id)
    }

    /// Append an element under `parent` and return its id.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.append(parent, Node::Element(element))
    }

    /// Append a text node under `parent` and return its id.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.append(parent, Node::Text(text.into()))
    }

    fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        match self.tree.get_mut(parent) {
            Some(mut p) => p.append(node).id(),
            None => self.tree.root_mut().append(node).id(),
        }
    }
}

pub(crate) fn collect_text(node: NodeRef<'_, Node>) -> String {
    node.descendants()
        .filter_map(|n| match n.value() {
            Node::Text(t) => Some(t.as_str()),
            _ => None,
        })
        .collect()
}
