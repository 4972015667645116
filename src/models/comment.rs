//! Raw comment values as read from an input source.

use serde_json::Value;

/// A raw comment before cleaning.
///
/// Input files do not guarantee a string in every cell. Non-string values
/// keep their textual form for the report but never reach the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comment {
    /// A string value.
    Text(String),
    /// An empty cell, `null`, or absent field.
    Missing,
    /// Any other value (number, bool, object), stored in its textual form.
    Other(String),
}

impl Comment {
    /// The string content, if this comment is a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Comment::Text(text) => Some(text),
            Comment::Missing | Comment::Other(_) => None,
        }
    }

    /// The value as it appears in the report `text` column.
    pub fn raw(&self) -> &str {
        match self {
            Comment::Text(text) | Comment::Other(text) => text,
            Comment::Missing => "",
        }
    }
}

impl From<&str> for Comment {
    fn from(text: &str) -> Self {
        Comment::Text(text.to_string())
    }
}

impl From<String> for Comment {
    fn from(text: String) -> Self {
        Comment::Text(text)
    }
}

impl From<Option<String>> for Comment {
    fn from(value: Option<String>) -> Self {
        value.map_or(Comment::Missing, Comment::Text)
    }
}

impl From<&Value> for Comment {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Comment::Text(s.clone()),
            Value::Null => Comment::Missing,
            other => Comment::Other(other.to_string()),
        }
    }
}
