use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::cli::output::{AnalysisSummary, get_formatter};
use crate::models::{Config, OutputFormat};
use crate::report::generate_report;
use crate::services::PreparedComments;
use crate::sources::{InputFormat, read_comments};

use super::model::load_analyzer;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Input file with comments: CSV, JSON, JSONL or text (use - for stdin)
    pub input: PathBuf,

    /// CSV column or JSON field holding the comment text
    #[arg(long, short = 'c')]
    pub column: Option<String>,

    /// Input format (csv, json, jsonl, text); guessed from the extension by default
    #[arg(long, short = 'i')]
    pub input_format: Option<InputFormat>,

    /// Directory for the CSV and chart (created if missing)
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Directory containing model.onnx and tokenizer.json
    #[arg(long, env = "CSENT_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Number of comments per model call
    #[arg(long, short = 'b')]
    pub batch_size: Option<u32>,
}

pub fn handle_analyze(args: AnalyzeArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(batch_size) = args.batch_size {
        if batch_size == 0 {
            anyhow::bail!("batch size must be at least 1");
        }
        config.model.batch_size = batch_size;
    }

    let formatter = get_formatter(format);
    let start_time = Instant::now();

    let column = args
        .column
        .clone()
        .unwrap_or_else(|| config.input.text_column.clone());
    let comments = read_comments(&args.input, args.input_format, &column)
        .with_context(|| format!("failed to read comments from {}", args.input.display()))?;

    if comments.is_empty() {
        println!("{}", formatter.format_message("No comments found in input."));
        return Ok(());
    }

    let prepared = PreparedComments::new(&comments);
    let classified = prepared.meaningful() as u64;
    let skipped = prepared.len() as u64 - classified;
    if skipped > 0 {
        warn!(skipped, "comments too short or not meaningful, marked Neutral");
    }

    if verbose {
        eprintln!("Input: {}", args.input.display());
        eprintln!("  Comments: {}", comments.len());
        eprintln!("  To classify: {classified}");
    }

    let analyzer = load_analyzer(&config, args.model_dir.as_deref(), verbose)?;

    let pb = ProgressBar::new(classified);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )
            .unwrap()
            .progress_chars("#>-"),
    );

    let rows = analyzer
        .analyze_prepared(prepared, |n| pb.inc(n as u64))
        .context("sentiment analysis failed")?;
    pb.finish_and_clear();

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.report.output_dir.clone());
    let report =
        generate_report(&rows, &config.report, &output_dir).context("failed to write report")?;

    let summary = AnalysisSummary {
        input: args.input.display().to_string(),
        total: report.total,
        classified,
        counts: report.counts,
        csv_path: report.csv_path,
        chart_path: report.chart_path,
        duration_ms: start_time.elapsed().as_millis() as u64,
        generated_at: chrono::Utc::now().to_rfc3339(),
    };

    print!("{}", formatter.format_summary(&summary));

    Ok(())
}
