//! Report output: a detailed CSV and a sentiment distribution chart.

mod chart;
mod table;

pub use chart::{bar_color, render_chart};
pub use table::{sentiment_counts, write_csv};

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::ReportError;
use crate::models::{AnalyzedComment, ReportConfig, SentimentCount};

/// Files written by [`generate_report`] and the counts behind the chart.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub csv_path: PathBuf,
    pub chart_path: PathBuf,
    pub counts: Vec<SentimentCount>,
    pub total: u64,
}

/// Write the CSV and chart for `rows` into `output_dir`, creating it if needed.
pub fn generate_report(
    rows: &[AnalyzedComment],
    config: &ReportConfig,
    output_dir: &Path,
) -> Result<Report, ReportError> {
    if rows.is_empty() {
        return Err(ReportError::NoRows);
    }

    std::fs::create_dir_all(output_dir)?;

    let csv_path = output_dir.join(&config.csv_filename);
    write_csv(rows, &csv_path)?;
    info!(path = %csv_path.display(), "detailed analysis saved");

    let counts = sentiment_counts(rows);
    let chart_path = output_dir.join(&config.chart_filename);
    render_chart(&counts, &chart_path)?;
    info!(path = %chart_path.display(), "sentiment distribution chart saved");

    Ok(Report {
        csv_path,
        chart_path,
        counts,
        total: rows.len() as u64,
    })
}
