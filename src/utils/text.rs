//! Text cleaning and meaningfulness checks applied before classification.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Comment;

/// Short texts accepted despite being at most [`MIN_CONTENT_LENGTH`] chars.
///
/// "good" and "great" are longer than the limit and never hit this list.
pub const SHORT_WHITELIST: &[&str] = &["good", "bad", "great", "sad", "ok", "yes", "no"];

/// Texts up to this many characters must be whitelisted to count.
pub const MIN_CONTENT_LENGTH: usize = 3;

// Information separators U+001C..U+001F count as whitespace alongside `\s`.
static RE_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s\x1C-\x1F.!?]").unwrap());
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x1C-\x1F]+").unwrap());

/// Whitespace test used for word splitting and trimming of comment text.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1C'..='\x1F').contains(&c)
}

/// Normalize a raw comment.
///
/// Non-string comments clean to the empty string. Strings are lowercased,
/// stripped of everything except letters, digits, whitespace and `.!?`, and
/// single-spaced.
pub fn clean_text<'a>(comment: impl Into<CommentRef<'a>>) -> String {
    let Some(text) = comment.into().0 else {
        return String::new();
    };

    let lowered = text.to_lowercase();
    let stripped = RE_DISALLOWED.replace_all(&lowered, "");
    let collapsed = RE_WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Check if cleaned text is worth sending to the classifier.
pub fn is_meaningful(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    if text.chars().count() <= MIN_CONTENT_LENGTH {
        return SHORT_WHITELIST.contains(&text);
    }

    text.chars().any(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}

/// Borrowed view of a comment's string content, if any.
pub struct CommentRef<'a>(Option<&'a str>);

impl<'a> From<&'a str> for CommentRef<'a> {
    fn from(text: &'a str) -> Self {
        CommentRef(Some(text))
    }
}

impl<'a> From<&'a String> for CommentRef<'a> {
    fn from(text: &'a String) -> Self {
        CommentRef(Some(text.as_str()))
    }
}

impl<'a> From<Option<&'a str>> for CommentRef<'a> {
    fn from(text: Option<&'a str>) -> Self {
        CommentRef(text)
    }
}

impl<'a> From<&'a Comment> for CommentRef<'a> {
    fn from(comment: &'a Comment) -> Self {
        CommentRef(comment.as_text())
    }
}
