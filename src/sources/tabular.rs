//! CSV comment input.

use crate::error::InputError;
use crate::models::Comment;

/// Read the `column` of a headed CSV document.
///
/// The header is matched exactly first, then case-insensitively. Empty
/// cells and short rows yield [`Comment::Missing`].
pub fn parse_csv(content: &str, column: &str) -> Result<Vec<Comment>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let index = headers
        .iter()
        .position(|h| h.trim() == column)
        .or_else(|| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column))
        })
        .ok_or_else(|| InputError::MissingColumn(column.to_string()))?;

    let mut comments = Vec::new();
    for record in reader.records() {
        let record = record?;
        let comment = match record.get(index) {
            Some(cell) if !cell.is_empty() => Comment::Text(cell.to_string()),
            _ => Comment::Missing,
        };
        comments.push(comment);
    }

    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_column() {
        let content = "id,comment,rating\n1,\"Great, thanks!\",5\n2,,3\n3,meh\n";
        let comments = parse_csv(content, "comment").unwrap();
        assert_eq!(
            comments,
            vec![
                Comment::Text("Great, thanks!".to_string()),
                Comment::Missing,
                Comment::Text("meh".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_csv_short_row_is_missing() {
        let content = "id,comment\n1\n2,fine\n";
        let comments = parse_csv(content, "comment").unwrap();
        assert_eq!(comments[0], Comment::Missing);
        assert_eq!(comments[1], Comment::Text("fine".to_string()));
    }

    #[test]
    fn test_parse_csv_case_insensitive_header() {
        let content = "Comment\nhello there\n";
        let comments = parse_csv(content, "comment").unwrap();
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let content = "id,text\n1,hello\n";
        let err = parse_csv(content, "comment").unwrap_err();
        assert!(matches!(err, InputError::MissingColumn(col) if col == "comment"));
    }
}
