use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::Config;
use crate::services::{OnnxClassifier, SarcasmRules, SentimentAnalyzer};

/// Resolve the model directory, preferring an explicit command-line path.
pub(super) fn resolve_model_dir(config: &Config, explicit: Option<&Path>) -> Result<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| config.model_dir())
        .ok_or_else(|| anyhow::anyhow!("could not determine models directory"))
}

/// Load the ONNX model and wrap it with the configured sarcasm rules.
pub(super) fn load_analyzer(
    config: &Config,
    model_dir: Option<&Path>,
    verbose: bool,
) -> Result<SentimentAnalyzer<OnnxClassifier>> {
    let model_dir = resolve_model_dir(config, model_dir)?;

    if verbose {
        eprintln!("Loading sentiment model: {}", model_dir.display());
    }

    let classifier = OnnxClassifier::load(&config.model, &model_dir).with_context(|| {
        format!(
            "failed to load sentiment model from {}\nHint: run `csent status` to check model files",
            model_dir.display()
        )
    })?;

    Ok(
        SentimentAnalyzer::new(classifier, SarcasmRules::new(&config.sarcasm))
            .with_batch_size(config.model.batch_size as usize),
    )
}
