use std::fmt::Write as FmtWrite;
use std::path::PathBuf;

use console::style;
use serde::Serialize;

use crate::models::{AnalyzedComment, OutputFormat, Sentiment, SentimentCount};

pub trait Formatter {
    fn format_results(&self, rows: &[AnalyzedComment]) -> String;
    fn format_summary(&self, summary: &AnalysisSummary) -> String;
    fn format_status(&self, status: &StatusInfo) -> String;
    fn format_message(&self, message: &str) -> String;
    fn format_error(&self, error: &str) -> String;
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub input: String,
    pub total: u64,
    pub classified: u64,
    pub counts: Vec<SentimentCount>,
    pub csv_path: PathBuf,
    pub chart_path: PathBuf,
    pub duration_ms: u64,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusInfo {
    pub model_id: String,
    pub model_dir: Option<PathBuf>,
    pub model_file: bool,
    pub tokenizer_file: bool,
    pub label_config: bool,
    pub ort_dylib_path: Option<String>,
    pub config_path: Option<PathBuf>,
    pub config_exists: bool,
}

impl StatusInfo {
    pub fn model_ready(&self) -> bool {
        self.model_file && self.tokenizer_file
    }
}

fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

fn styled_sentiment(sentiment: Sentiment) -> String {
    let label = format!("{:<8}", sentiment.as_str());
    match sentiment {
        Sentiment::Positive => style(label).green().to_string(),
        Sentiment::Negative => style(label).red().to_string(),
        Sentiment::Neutral => style(label).dim().to_string(),
    }
}

fn mark(ok: bool) -> &'static str {
    if ok { "[OK]" } else { "[MISSING]" }
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_results(&self, rows: &[AnalyzedComment]) -> String {
        if rows.is_empty() {
            return "No comments to classify.\n".to_string();
        }

        let mut output = String::new();
        for row in rows {
            writeln!(
                output,
                "{} {:>+6.3}  {}",
                styled_sentiment(row.sentiment),
                row.polarity_score,
                row.text
            )
            .unwrap();
        }
        output
    }

    fn format_summary(&self, summary: &AnalysisSummary) -> String {
        let mut output = String::new();
        writeln!(output, "Sentiment Analysis Complete").unwrap();
        writeln!(output, "---------------------------").unwrap();
        writeln!(output, "Input:      {}", summary.input).unwrap();
        writeln!(output, "Comments:   {}", summary.total).unwrap();
        writeln!(output, "Classified: {}", summary.classified).unwrap();
        writeln!(output, "Duration:   {}ms", summary.duration_ms).unwrap();
        writeln!(output).unwrap();
        for count in &summary.counts {
            writeln!(
                output,
                "  {:<8} {:>6} ({:.1}%)",
                count.label,
                count.count,
                percent(count.count, summary.total)
            )
            .unwrap();
        }
        writeln!(output).unwrap();
        writeln!(output, "Detailed analysis: {}", summary.csv_path.display()).unwrap();
        writeln!(output, "Distribution chart: {}", summary.chart_path.display()).unwrap();
        output
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let mut output = String::new();
        writeln!(output, "Status").unwrap();
        writeln!(output, "------").unwrap();
        writeln!(output, "Model:         {}", status.model_id).unwrap();
        match status.model_dir {
            Some(ref dir) => writeln!(output, "  Directory:   {}", dir.display()).unwrap(),
            None => writeln!(output, "  Directory:   (unknown)").unwrap(),
        }
        writeln!(output, "  model.onnx:     {}", mark(status.model_file)).unwrap();
        writeln!(output, "  tokenizer.json: {}", mark(status.tokenizer_file)).unwrap();
        writeln!(output, "  config.json:    {}", mark(status.label_config)).unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "ONNX Runtime:  {}",
            status.ort_dylib_path.as_deref().unwrap_or("(not found)")
        )
        .unwrap();
        if let Some(ref path) = status.config_path {
            let state = if status.config_exists {
                ""
            } else {
                " (defaults)"
            };
            writeln!(output, "Config:        {}{}", path.display(), state).unwrap();
        }
        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("{}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}\n", error)
    }
}

pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize>(&self, value: &T) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

impl Formatter for JsonFormatter {
    fn format_results(&self, rows: &[AnalyzedComment]) -> String {
        self.render(&serde_json::json!({ "results": rows }))
    }

    fn format_summary(&self, summary: &AnalysisSummary) -> String {
        self.render(summary)
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        self.render(&serde_json::json!({
            "model": {
                "id": status.model_id,
                "dir": status.model_dir,
                "model_file": status.model_file,
                "tokenizer_file": status.tokenizer_file,
                "label_config": status.label_config,
                "ready": status.model_ready(),
            },
            "ort_dylib_path": status.ort_dylib_path,
            "config": {
                "path": status.config_path,
                "exists": status.config_exists,
            }
        }))
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({"message": message}).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({"error": error}).to_string()
    }
}

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format_results(&self, rows: &[AnalyzedComment]) -> String {
        if rows.is_empty() {
            return "*No comments to classify.*\n".to_string();
        }

        let mut output = String::new();
        writeln!(output, "| Comment | Sentiment | Polarity |").unwrap();
        writeln!(output, "|---------|-----------|----------|").unwrap();
        for row in rows {
            writeln!(
                output,
                "| {} | {} | {:.3} |",
                row.text.replace('|', "\\|"),
                row.sentiment,
                row.polarity_score
            )
            .unwrap();
        }
        output
    }

    fn format_summary(&self, summary: &AnalysisSummary) -> String {
        let mut output = String::new();
        writeln!(output, "## Sentiment Analysis\n").unwrap();
        writeln!(output, "**Input:** `{}`\n", summary.input).unwrap();
        writeln!(output, "| Sentiment | Count | Share |").unwrap();
        writeln!(output, "|-----------|-------|-------|").unwrap();
        for count in &summary.counts {
            writeln!(
                output,
                "| {} | {} | {:.1}% |",
                count.label,
                count.count,
                percent(count.count, summary.total)
            )
            .unwrap();
        }
        writeln!(output).unwrap();
        writeln!(
            output,
            "- **Comments:** {} ({} classified)",
            summary.total, summary.classified
        )
        .unwrap();
        writeln!(output, "- **Duration:** {}ms", summary.duration_ms).unwrap();
        writeln!(output, "- **CSV:** `{}`", summary.csv_path.display()).unwrap();
        writeln!(output, "- **Chart:** `{}`", summary.chart_path.display()).unwrap();
        output
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let check = |ok: bool| if ok { "✅" } else { "❌" };
        let mut output = String::new();
        writeln!(output, "## Status\n").unwrap();
        writeln!(output, "### Model {}\n", check(status.model_ready())).unwrap();
        writeln!(output, "- **Id:** {}", status.model_id).unwrap();
        if let Some(ref dir) = status.model_dir {
            writeln!(output, "- **Directory:** `{}`", dir.display()).unwrap();
        }
        writeln!(output, "- **model.onnx:** {}", check(status.model_file)).unwrap();
        writeln!(output, "- **tokenizer.json:** {}", check(status.tokenizer_file)).unwrap();
        writeln!(output, "- **config.json:** {}", check(status.label_config)).unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "### ONNX Runtime {}\n",
            check(status.ort_dylib_path.is_some())
        )
        .unwrap();
        if let Some(ref path) = status.ort_dylib_path {
            writeln!(output, "- **Library:** `{}`", path).unwrap();
        }
        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("> {}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("> ⚠️ **Error:** {}\n", error)
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}
