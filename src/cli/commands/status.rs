use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::cli::output::{StatusInfo, get_formatter};
use crate::models::{Config, OutputFormat};
use crate::services::{MODEL_CONFIG_FILE, MODEL_FILE, TOKENIZER_FILE};

use super::model::resolve_model_dir;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Directory containing model.onnx and tokenizer.json
    #[arg(long, env = "CSENT_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,
}

pub fn handle_status(args: StatusArgs, format: OutputFormat, _verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let status = collect_status(&config, args.model_dir.as_deref());

    print!("{}", formatter.format_status(&status));

    if !status.model_ready() || status.ort_dylib_path.is_none() {
        eprintln!();
        if !status.model_ready() {
            eprintln!(
                "Hint: export {} to ONNX and place {} and {} in the model directory,",
                config.model.model_id, MODEL_FILE, TOKENIZER_FILE
            );
            eprintln!("      or set model.model_dir in the config file.");
        }
        if status.ort_dylib_path.is_none() {
            eprintln!(
                "Warning: ONNX Runtime library not found. Set ORT_DYLIB_PATH to libonnxruntime."
            );
        }
    }

    Ok(())
}

/// Inspect the model directory the analyze and classify commands would load.
fn collect_status(config: &Config, model_dir: Option<&Path>) -> StatusInfo {
    let model_dir = resolve_model_dir(config, model_dir).ok();
    let has_file = |name: &str| {
        model_dir
            .as_ref()
            .is_some_and(|dir| dir.join(name).is_file())
    };

    let config_path = Config::config_path();
    StatusInfo {
        model_id: config.model.model_id.clone(),
        model_file: has_file(MODEL_FILE),
        tokenizer_file: has_file(TOKENIZER_FILE),
        label_config: has_file(MODEL_CONFIG_FILE),
        model_dir,
        ort_dylib_path: std::env::var("ORT_DYLIB_PATH").ok(),
        config_exists: config_path.as_ref().is_some_and(|p| p.exists()),
        config_path,
    }
}
