// ABOUTME: hast JSON adapter: decodes and encodes the unist/hast tree shape used by markdown pipelines.
// ABOUTME: Maps className, data*/aria* and htmlFor properties onto Element attributes and back, keeping raw nodes.

use ego_tree::{NodeMut, NodeRef};
use serde_json::{Map, Value};

use super::{ClassList, Document, Element, Node};
use crate::error::{Result, TransformError};

impl Document {
    /// Decode a hast tree. The top-level value must be a `root` node.
    pub fn from_hast(value: &Value) -> Result<Self> {
        let kind = value.get("type").and_then(Value::as_str);
        if kind != Some("root") {
            return Err(TransformError::invalid_tree(format!(
                "expected root node, found {}",
                kind.unwrap_or("nothing")
            )));
        }

        let mut doc = Document::new();
        {
            let mut root = doc.tree_mut().root_mut();
            for child in children(value) {
                decode_node(child, &mut root);
            }
        }
        Ok(doc)
    }

    /// Decode a hast tree from JSON text.
    pub fn from_hast_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_hast(&value)
    }

    /// Encode the tree as hast.
    pub fn to_hast(&self) -> Value {
        encode_node(self.tree().root())
    }
}

fn children(value: &Value) -> &[Value] {
    value
        .get("children")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn decode_node(value: &Value, dst: &mut NodeMut<'_, Node>) {
    let text = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let node = match value.get("type").and_then(Value::as_str) {
        Some("text") => Node::Text(text("value")),
        Some("comment") => Node::Comment(text("value")),
        Some("doctype") => Node::Doctype("html".to_string()),
        Some("raw") => Node::Raw(text("value")),
        Some("element") => match value.get("tagName").and_then(Value::as_str) {
            Some(tag) => Node::Element(decode_element(tag, value.get("properties"))),
            None => return,
        },
        _ => return,
    };

    let mut child = dst.append(node);
    for grandchild in children(value) {
        decode_node(grandchild, &mut child);
    }
}

fn decode_element(tag: &str, properties: Option<&Value>) -> Element {
    let mut element = Element::new(tag);
    let Some(props) = properties.and_then(Value::as_object) else {
        return element;
    };

    for (key, value) in props {
        if key == "className" {
            element.class = ClassList::from_value(Some(value));
            continue;
        }
        if let Some(attr) = property_value(value) {
            let name = attribute_name(key);
            if property_name(&name) != *key {
                element.property_keys.push((name.clone(), key.clone()));
            }
            element.attrs.set(name, attr);
        }
    }
    element
}

fn property_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some(String::new()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" "),
        ),
        _ => None,
    }
}

/// `dataSlug` -> `data-slug`, `htmlFor` -> `for`.
fn attribute_name(property: &str) -> String {
    if property == "htmlFor" {
        return "for".to_string();
    }
    for prefix in ["data", "aria"] {
        if let Some(rest) = property.strip_prefix(prefix) {
            if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
                let mut out = prefix.to_string();
                for c in rest.chars() {
                    if c.is_ascii_uppercase() {
                        out.push('-');
                        out.push(c.to_ascii_lowercase());
                    } else {
                        out.push(c);
                    }
                }
                return out;
            }
        }
    }
    property.to_string()
}

/// `data-slug` -> `dataSlug`, `for` -> `htmlFor`.
fn property_name(attribute: &str) -> String {
    if attribute == "for" {
        return "htmlFor".to_string();
    }
    if attribute.starts_with("data-") || attribute.starts_with("aria-") {
        let mut out = String::with_capacity(attribute.len());
        let mut upper = false;
        for c in attribute.chars() {
            if c == '-' {
                upper = true;
            } else if upper {
                out.push(c.to_ascii_uppercase());
                upper = false;
            } else {
                out.push(c);
            }
        }
        return out;
    }
    attribute.to_string()
}

fn encode_node(node: NodeRef<'_, Node>) -> Value {
    let mut out = Map::new();
    match node.value() {
        Node::Root => {
            out.insert("type".into(), "root".into());
        }
        Node::Text(t) => {
            out.insert("type".into(), "text".into());
            out.insert("value".into(), t.clone().into());
            return Value::Object(out);
        }
        Node::Comment(c) => {
            out.insert("type".into(), "comment".into());
            out.insert("value".into(), c.clone().into());
            return Value::Object(out);
        }
        Node::Doctype(_) => {
            out.insert("type".into(), "doctype".into());
            return Value::Object(out);
        }
        Node::Raw(markup) => {
            out.insert("type".into(), "raw".into());
            out.insert("value".into(), markup.clone().into());
            return Value::Object(out);
        }
        Node::Element(el) => {
            out.insert("type".into(), "element".into());
            out.insert("tagName".into(), el.tag.clone().into());
            let mut props = Map::new();
            if let Some(class) = el.class.to_value() {
                props.insert("className".into(), class);
            }
            for (k, v) in el.attrs.iter() {
                let key = el
                    .property_keys
                    .iter()
                    .find(|(attr, _)| attr == k)
                    .map(|(_, key)| key.clone())
                    .unwrap_or_else(|| property_name(k));
                props.insert(key, v.into());
            }
            out.insert("properties".into(), Value::Object(props));
        }
    }
    out.insert(
        "children".into(),
        Value::Array(node.children().map(encode_node).collect()),
    );
    Value::Object(out)
}
