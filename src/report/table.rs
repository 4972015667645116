//! Detailed CSV output and per-sentiment counts.

use std::path::Path;

use crate::error::ReportError;
use crate::models::{AnalyzedComment, SentimentCount};

/// Write every row to `path` with a header line.
pub fn write_csv(rows: &[AnalyzedComment], path: &Path) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Count rows per sentiment label, most frequent first.
///
/// Labels with equal counts keep the order in which they first appear.
pub fn sentiment_counts(rows: &[AnalyzedComment]) -> Vec<SentimentCount> {
    let mut counts: Vec<SentimentCount> = Vec::new();
    for row in rows {
        let label = row.sentiment.as_str();
        match counts.iter_mut().find(|c| c.label == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(SentimentCount {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
