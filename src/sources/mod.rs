//! Comment input sources.
//!
//! Comments are read from a CSV column, a JSON/JSONL field, or a plain text
//! file with one comment per line. `-` reads from stdin.

mod json;
mod tabular;

pub use json::{parse_json, parse_jsonl};
pub use tabular::parse_csv;

use std::fmt;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::models::Comment;

/// Layout of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Csv,
    Json,
    Jsonl,
    Text,
}

impl InputFormat {
    /// Guess the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => InputFormat::Json,
            "jsonl" | "ndjson" => InputFormat::Jsonl,
            "txt" | "text" => InputFormat::Text,
            _ => InputFormat::Csv,
        }
    }
}

impl FromStr for InputFormat {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            "jsonl" | "ndjson" => Ok(InputFormat::Jsonl),
            "text" | "txt" => Ok(InputFormat::Text),
            _ => Err(InputError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Json => write!(f, "json"),
            InputFormat::Jsonl => write!(f, "jsonl"),
            InputFormat::Text => write!(f, "text"),
        }
    }
}

/// Read comments from `path` (or stdin for `-`).
///
/// `column` names the CSV column or JSON field holding the comment text.
/// When `format` is `None` it is guessed from the extension.
pub fn read_comments(
    path: &Path,
    format: Option<InputFormat>,
    column: &str,
) -> Result<Vec<Comment>, InputError> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    let content = read_input(path)?;
    parse_comments(&content, format, column)
}

pub fn parse_comments(
    content: &str,
    format: InputFormat,
    column: &str,
) -> Result<Vec<Comment>, InputError> {
    match format {
        InputFormat::Csv => parse_csv(content, column),
        InputFormat::Json => parse_json(content, column),
        InputFormat::Jsonl => parse_jsonl(content, column),
        InputFormat::Text => Ok(parse_lines(content)),
    }
}

fn parse_lines(content: &str) -> Vec<Comment> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(Comment::from)
        .collect()
}

/// Read input from file or stdin.
fn read_input(path: &Path) -> Result<String, InputError> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        return Ok(input);
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a.csv")), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("a.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("a.jsonl")), InputFormat::Jsonl);
        assert_eq!(InputFormat::from_path(Path::new("notes.txt")), InputFormat::Text);
        assert_eq!(InputFormat::from_path(Path::new("-")), InputFormat::Csv);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("NDJSON".parse::<InputFormat>().unwrap(), InputFormat::Jsonl);
        assert!(matches!(
            "xlsx".parse::<InputFormat>(),
            Err(InputError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_lines_skips_blank() {
        let comments = parse_comments("first\r\n\n  \nsecond\n", InputFormat::Text, "").unwrap();
        assert_eq!(
            comments,
            vec![Comment::from("first"), Comment::from("second")]
        );
    }

    #[test]
    fn test_read_comments_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("feedback.csv");
        std::fs::write(&path, "comment\nDo whatever\nnice\n").unwrap();

        let comments = read_comments(&path, None, "comment").unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0], Comment::from("Do whatever"));
    }

    #[test]
    fn test_read_comments_missing_file() {
        let result = read_comments(Path::new("/nonexistent/comments.csv"), None, "comment");
        assert!(matches!(result, Err(InputError::IoError(_))));
    }
}
