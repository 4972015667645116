pub mod cli;
pub mod error;
pub mod models;
pub mod report;
pub mod services;
pub mod sources;
pub mod utils;

pub use cli::{Cli, Commands};
pub use error::AppError;
pub use models::{Comment, Config, OutputFormat, Sentiment, SentimentResult};
pub use services::{Classifier, SentimentAnalyzer};
pub use utils::{clean_text, is_meaningful};
