use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::get_formatter;
use crate::models::{Comment, Config, OutputFormat};

use super::model::load_analyzer;

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Comments to classify
    #[arg(required = true)]
    pub texts: Vec<String>,

    /// Directory containing model.onnx and tokenizer.json
    #[arg(long, env = "CSENT_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,
}

pub fn handle_classify(args: ClassifyArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let analyzer = load_analyzer(&config, args.model_dir.as_deref(), verbose)?;

    let comments: Vec<Comment> = args.texts.into_iter().map(Comment::from).collect();
    let rows = analyzer
        .analyze(&comments)
        .context("sentiment analysis failed")?;

    print!("{}", formatter.format_results(&rows));

    Ok(())
}
