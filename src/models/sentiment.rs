//! Sentiment labels, classifier verdicts and report rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Final sentiment class of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw output of a classifier for one text.
///
/// `label` is the model's class name (`POSITIVE` / `NEGATIVE` for SST-2
/// models) and `score` its probability in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: String,
    pub score: f32,
}

impl Verdict {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Sentiment with a signed polarity score in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub polarity_score: f32,
}

impl SentimentResult {
    pub fn new(sentiment: Sentiment, polarity_score: f32) -> Self {
        Self {
            sentiment,
            polarity_score,
        }
    }

    /// Result for text that was not worth scoring.
    pub fn neutral() -> Self {
        Self::new(Sentiment::Neutral, 0.0)
    }
}

/// One row of the detailed report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedComment {
    pub text: String,
    pub cleaned_text: String,
    pub sentiment: Sentiment,
    pub polarity_score: f32,
}

impl AnalyzedComment {
    pub fn new(text: impl Into<String>, cleaned_text: impl Into<String>, result: SentimentResult) -> Self {
        Self {
            text: text.into(),
            cleaned_text: cleaned_text.into(),
            sentiment: result.sentiment,
            polarity_score: result.polarity_score,
        }
    }
}

/// Number of comments sharing one sentiment label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCount {
    pub label: String,
    pub count: u64,
}
