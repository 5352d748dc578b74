// ABOUTME: Class list representation shared by the HTML and hast adapters.
// ABOUTME: Models absent, list, and space-joined class values behind one append operation.

use serde_json::Value;

/// The class list of an element in whichever shape the producer used.
///
/// HTML input always yields [`ClassList::Joined`]; hast input may carry either
/// an array or a string. The shape is kept so the tree serializes back the way
/// it came in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClassList {
    #[default]
    Absent,
    List(Vec<String>),
    Joined(String),
}

impl ClassList {
    /// Decode a hast `className` value. Unrecognized shapes are absent.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => ClassList::Joined(s.clone()),
            Some(Value::Array(items)) => ClassList::List(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => ClassList::Absent,
        }
    }

    /// Encode back to a hast `className` value.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            ClassList::Absent => None,
            ClassList::List(items) => Some(Value::Array(
                items.iter().cloned().map(Value::String).collect(),
            )),
            ClassList::Joined(s) => Some(Value::String(s.clone())),
        }
    }

    /// Append a class without disturbing the existing ones.
    pub fn push(&mut self, class: &str) {
        match self {
            ClassList::Absent => *self = ClassList::Joined(class.to_string()),
            ClassList::List(items) => items.push(class.to_string()),
            ClassList::Joined(s) => {
                if s.trim().is_empty() {
                    *s = class.to_string();
                } else {
                    s.push(' ');
                    s.push_str(class);
                }
            }
        }
    }

    /// Iterate over individual class tokens.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            ClassList::Absent => Box::new(std::iter::empty()),
            ClassList::List(items) => Box::new(items.iter().map(String::as_str)),
            ClassList::Joined(s) => Box::new(s.split_whitespace()),
        }
    }

    /// True if `class` is one of the tokens.
    pub fn contains(&self, class: &str) -> bool {
        self.iter().any(|c| c == class)
    }

    /// Loose membership: exact member of a list, substring of a joined string.
    pub fn mentions(&self, needle: &str) -> bool {
        match self {
            ClassList::Absent => false,
            ClassList::List(items) => items.iter().any(|c| c == needle),
            ClassList::Joined(s) => s.contains(needle),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ClassList::Absent)
    }

    /// The value of the HTML `class` attribute, if any.
    pub fn to_attr_value(&self) -> Option<String> {
        match self {
            ClassList::Absent => None,
            ClassList::List(items) => Some(items.join(" ")),
            ClassList::Joined(s) => Some(s.clone()),
        }
    }
}
