mod analyzer;
mod batch;
mod classifier;
mod onnx;
mod sarcasm;

pub use analyzer::{DEFAULT_BATCH_SIZE, PreparedComments, SentimentAnalyzer};
pub use batch::classify_in_batches;
pub use classifier::Classifier;
pub use onnx::{MODEL_CONFIG_FILE, MODEL_FILE, OnnxClassifier, TOKENIZER_FILE};
pub use sarcasm::{SarcasmRule, SarcasmRules, polarity_from_verdict};
