//! JSON and JSONL comment input.

use serde_json::Value;

use crate::error::InputError;
use crate::models::Comment;

/// Parse a JSON array of objects (or bare strings).
pub fn parse_json(content: &str, field: &str) -> Result<Vec<Comment>, InputError> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(Vec::new());
    }

    let values: Vec<Value> = serde_json::from_str(content)?;
    Ok(values.iter().map(|v| comment_from_value(v, field)).collect())
}

/// Parse one JSON value per line, skipping blank lines.
pub fn parse_jsonl(content: &str, field: &str) -> Result<Vec<Comment>, InputError> {
    let mut comments = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|e| InputError::InvalidRecord {
            line: i + 1,
            message: e.to_string(),
        })?;
        comments.push(comment_from_value(&value, field));
    }
    Ok(comments)
}

fn comment_from_value(value: &Value, field: &str) -> Comment {
    match value {
        Value::Object(map) => map.get(field).map_or(Comment::Missing, Comment::from),
        other => Comment::from(other),
    }
}
