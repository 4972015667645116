mod comment;
mod config;
mod format;
mod sentiment;

pub use comment::Comment;
pub use config::{
    Config, DEFAULT_CHART_FILENAME, DEFAULT_CSV_FILENAME, DEFAULT_MODEL_ID, DEFAULT_OUTPUT_DIR,
    DEFAULT_TEXT_COLUMN, InputConfig, ModelConfig, OutputConfig, ReportConfig, SarcasmConfig,
};
pub use format::OutputFormat;
pub use sentiment::{AnalyzedComment, Sentiment, SentimentCount, SentimentResult, Verdict};
