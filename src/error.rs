//! Error types for the comment sentiment CLI.

use thiserror::Error;

/// Errors related to loading and running a sentiment classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("failed to load model: {0}")]
    LoadError(String),

    #[error("tokenizer error: {0}")]
    TokenizerError(String),

    #[error("inference error: {0}")]
    InferenceError(String),

    #[error("unknown classifier label: {0}")]
    UnknownLabel(String),

    #[error("classifier score out of range [0, 1]: {0}")]
    ScoreOutOfRange(f32),

    #[error("classifier returned {actual} verdicts for {expected} texts")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("path error: {0}")]
    PathError(String),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Errors related to reading comments from input files.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}

/// Errors related to writing the report files.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("chart error: {0}")]
    ChartError(String),

    #[error("no rows to report")]
    NoRows,
}

/// Application-level errors that wrap domain errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("report error: {0}")]
    Report(#[from] ReportError),

    #[error("{0}")]
    Other(String),
}
