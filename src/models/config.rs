use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::format::OutputFormat;
use crate::error::ConfigError;

pub const APP_DIR: &str = "comment-sentiment";
pub const DEFAULT_MODEL_ID: &str = "distilbert-base-uncased-finetuned-sst-2-english";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_CSV_FILENAME: &str = "detailed_sentiment_analysis.csv";
pub const DEFAULT_CHART_FILENAME: &str = "sentiment_distribution.svg";
pub const DEFAULT_TEXT_COLUMN: &str = "comment";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub sarcasm: SarcasmConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
    }

    pub fn models_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join(APP_DIR).join("models"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path().ok_or_else(|| {
            ConfigError::PathError("could not determine config directory".to_string())
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.batch_size == 0 {
            return Err(ConfigError::ValidationError(
                "model.batch_size must be at least 1".to_string(),
            ));
        }
        if self.model.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "model.max_tokens must be at least 1".to_string(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.sarcasm.override_score) {
            return Err(ConfigError::ValidationError(
                "sarcasm.override_score must be between -1.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }

    /// Directory holding `model.onnx` and `tokenizer.json`.
    ///
    /// An explicit `model.model_dir` wins; otherwise the model id is mapped
    /// into the per-user models directory.
    pub fn model_dir(&self) -> Option<PathBuf> {
        self.model
            .model_dir
            .clone()
            .or_else(|| Self::models_dir().map(|d| d.join(model_dir_name(&self.model.model_id))))
    }
}

fn model_dir_name(model_id: &str) -> String {
    model_id.replace('/', "--")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_id")]
    pub model_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_dir: Option<PathBuf>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_batch_size() -> u32 {
    32
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            model_dir: None,
            max_tokens: default_max_tokens(),
            batch_size: default_batch_size(),
        }
    }
}

/// Phrase rules that force a comment to Negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarcasmConfig {
    #[serde(default = "default_starts_with")]
    pub starts_with: Vec<String>,

    #[serde(default = "default_short_contains")]
    pub short_contains: Vec<String>,

    /// Texts with fewer words than this are checked against `short_contains`.
    #[serde(default = "default_short_max_words")]
    pub short_max_words: usize,

    #[serde(default = "default_override_score")]
    pub override_score: f32,
}

fn default_starts_with() -> Vec<String> {
    vec![
        "do whatever".to_string(),
        "do what ever".to_string(),
        "sure, whatever".to_string(),
        "yeah, right".to_string(),
    ]
}

fn default_short_contains() -> Vec<String> {
    vec![
        "fantastic".to_string(),
        "hilarious".to_string(),
        "improve".to_string(),
        "funny".to_string(),
    ]
}

fn default_short_max_words() -> usize {
    4
}

fn default_override_score() -> f32 {
    -0.95
}

impl Default for SarcasmConfig {
    fn default() -> Self {
        Self {
            starts_with: default_starts_with(),
            short_contains: default_short_contains(),
            short_max_words: default_short_max_words(),
            override_score: default_override_score(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_csv_filename")]
    pub csv_filename: String,

    #[serde(default = "default_chart_filename")]
    pub chart_filename: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_csv_filename() -> String {
    DEFAULT_CSV_FILENAME.to_string()
}

fn default_chart_filename() -> String {
    DEFAULT_CHART_FILENAME.to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            csv_filename: default_csv_filename(),
            chart_filename: default_chart_filename(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_text_column")]
    pub text_column: String,
}

fn default_text_column() -> String {
    DEFAULT_TEXT_COLUMN.to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            text_column: default_text_column(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.model.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.model.batch_size, 32);
        assert_eq!(config.report.csv_filename, DEFAULT_CSV_FILENAME);
        assert_eq!(config.report.chart_filename, DEFAULT_CHART_FILENAME);
        assert_eq!(config.input.text_column, DEFAULT_TEXT_COLUMN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sarcasm_config_default() {
        let config = SarcasmConfig::default();
        assert_eq!(config.starts_with.len(), 4);
        assert!(config.short_contains.contains(&"funny".to_string()));
        assert_eq!(config.short_max_words, 4);
        assert_eq!(config.override_score, -0.95);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [model]
            batch_size = 8

            [sarcasm]
            short_contains = ["brilliant"]
            "#,
        )
        .unwrap();
        assert_eq!(config.model.batch_size, 8);
        assert_eq!(config.model.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.sarcasm.short_contains, vec!["brilliant".to_string()]);
        assert_eq!(config.sarcasm.starts_with.len(), 4);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.input.text_column = "review".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.input.text_column, "review");
    }

    #[test]
    fn test_validate_rejects_zero_batch() {
        let mut config = Config::default();
        config.model.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_model_dir_wins() {
        let mut config = Config::default();
        config.model.model_dir = Some(PathBuf::from("/opt/models/sst2"));
        assert_eq!(config.model_dir(), Some(PathBuf::from("/opt/models/sst2")));
    }

    #[test]
    fn test_model_dir_name() {
        assert_eq!(model_dir_name("org/model"), "org--model");
    }
}
