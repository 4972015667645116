//! Fixed phrase rules that override the model on sarcastic comments.
//!
//! The model reads "fantastic." or "do whatever you want" at face value.
//! These rules run before the model's verdict is used and force such
//! comments to Negative.

use crate::error::ClassifierError;
use crate::models::{SarcasmConfig, Sentiment, SentimentResult, Verdict};
use crate::utils::is_separator;

/// A single override rule, matched against lowercased, trimmed raw text.
#[derive(Debug, Clone)]
pub enum SarcasmRule {
    /// Text begins with any of the phrases.
    StartsWith(Vec<String>),
    /// Text has fewer than `max_words` words and contains any of the phrases.
    ShortContains { max_words: usize, phrases: Vec<String> },
}

impl SarcasmRule {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            SarcasmRule::StartsWith(phrases) => phrases.iter().any(|p| text.starts_with(p.as_str())),
            SarcasmRule::ShortContains { max_words, phrases } => {
                text.split(is_separator).filter(|w| !w.is_empty()).count() < *max_words
                    && phrases.iter().any(|p| text.contains(p.as_str()))
            }
        }
    }
}

/// Ordered rule chain; the first matching rule forces `forced`.
#[derive(Debug, Clone)]
pub struct SarcasmRules {
    rules: Vec<SarcasmRule>,
    forced: SentimentResult,
}

impl SarcasmRules {
    pub fn new(config: &SarcasmConfig) -> Self {
        let rules = vec![
            SarcasmRule::StartsWith(lowercase_all(&config.starts_with)),
            SarcasmRule::ShortContains {
                max_words: config.short_max_words,
                phrases: lowercase_all(&config.short_contains),
            },
        ];

        Self {
            rules,
            forced: SentimentResult::new(Sentiment::Negative, config.override_score),
        }
    }

    /// Check the raw (uncleaned) comment text against the rules.
    pub fn is_sarcastic(&self, raw_text: &str) -> bool {
        let text = raw_text.to_lowercase();
        let text = text.trim_matches(is_separator);
        self.rules.iter().any(|rule| rule.matches(text))
    }

    /// Final result for a comment given the classifier's verdict on it.
    pub fn apply(&self, raw_text: &str, verdict: &Verdict) -> Result<SentimentResult, ClassifierError> {
        if self.is_sarcastic(raw_text) {
            return Ok(self.forced);
        }
        polarity_from_verdict(verdict)
    }
}

impl Default for SarcasmRules {
    fn default() -> Self {
        Self::new(&SarcasmConfig::default())
    }
}

/// Map a binary POSITIVE/NEGATIVE verdict to a signed polarity.
pub fn polarity_from_verdict(verdict: &Verdict) -> Result<SentimentResult, ClassifierError> {
    if !(0.0..=1.0).contains(&verdict.score) {
        return Err(ClassifierError::ScoreOutOfRange(verdict.score));
    }

    match capitalize(&verdict.label).as_str() {
        "Positive" => Ok(SentimentResult::new(Sentiment::Positive, verdict.score)),
        "Negative" => Ok(SentimentResult::new(Sentiment::Negative, -verdict.score)),
        _ => Err(ClassifierError::UnknownLabel(verdict.label.clone())),
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn lowercase_all(phrases: &[String]) -> Vec<String> {
    phrases.iter().map(|p| p.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> SarcasmRules {
        SarcasmRules::default()
    }

    #[test]
    fn test_starts_with_overrides_positive_verdict() {
        let result = rules()
            .apply("do whatever you want", &Verdict::new("POSITIVE", 0.99))
            .unwrap();
        assert_eq!(result, SentimentResult::new(Sentiment::Negative, -0.95));
    }

    #[test]
    fn test_starts_with_is_case_and_space_insensitive() {
        let rules = rules();
        assert!(rules.is_sarcastic("  Yeah, right. Best service ever"));
        assert!(rules.is_sarcastic("Sure, whatever you say, this is totally fine by me"));
        assert!(rules.is_sarcastic("DO WHAT EVER"));
        assert!(!rules.is_sarcastic("I would do whatever it takes"));
    }

    #[test]
    fn test_short_text_with_trigger_word() {
        let result = rules()
            .apply("funny", &Verdict::new("POSITIVE", 0.97))
            .unwrap();
        assert_eq!(result, SentimentResult::new(Sentiment::Negative, -0.95));

        assert!(rules().is_sarcastic("Oh, fantastic."));
        assert!(rules().is_sarcastic("needs to improve"));
    }

    #[test]
    fn test_separator_controls_count_as_whitespace() {
        let rules = rules();
        assert!(rules.is_sarcastic("\u{1f}sure thing"));
        // Four words once U+001F splits them, so the short rule no longer applies.
        assert!(!rules.is_sarcastic("so\u{1f}very funny indeed"));
        assert!(rules.is_sarcastic("so\u{1f}funny"));
    }

    #[test]
    fn test_trigger_word_matches_as_substring() {
        assert!(rules().is_sarcastic("unfunny"));
    }

    #[test]
    fn test_long_text_with_trigger_word_passes_through() {
        let result = rules()
            .apply(
                "that was a genuinely funny movie",
                &Verdict::new("POSITIVE", 0.93),
            )
            .unwrap();
        assert_eq!(result, SentimentResult::new(Sentiment::Positive, 0.93));
    }

    #[test]
    fn test_pass_through_positive() {
        let result = rules()
            .apply("I love this product", &Verdict::new("POSITIVE", 0.87))
            .unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.polarity_score, 0.87);
    }

    #[test]
    fn test_pass_through_negative() {
        let result = rules()
            .apply("the delivery was late", &Verdict::new("NEGATIVE", 0.6))
            .unwrap();
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.polarity_score, -0.6);
    }

    #[test]
    fn test_unknown_label_is_error() {
        let err = polarity_from_verdict(&Verdict::new("LABEL_2", 0.5)).unwrap_err();
        assert!(matches!(err, ClassifierError::UnknownLabel(label) if label == "LABEL_2"));
    }

    #[test]
    fn test_score_out_of_range_is_error() {
        assert!(matches!(
            polarity_from_verdict(&Verdict::new("POSITIVE", 1.5)),
            Err(ClassifierError::ScoreOutOfRange(_))
        ));
        assert!(polarity_from_verdict(&Verdict::new("NEGATIVE", f32::NAN)).is_err());
    }

    #[test]
    fn test_override_ignores_malformed_verdict() {
        let result = rules()
            .apply("yeah, right", &Verdict::new("???", 7.0))
            .unwrap();
        assert_eq!(result.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_custom_config() {
        let config = SarcasmConfig {
            starts_with: vec!["Great, just".to_string()],
            short_contains: vec![],
            short_max_words: 4,
            override_score: -0.8,
        };
        let rules = SarcasmRules::new(&config);
        let result = rules
            .apply("great, just great", &Verdict::new("POSITIVE", 0.99))
            .unwrap();
        assert_eq!(result, SentimentResult::new(Sentiment::Negative, -0.8));
        assert!(!rules.is_sarcastic("funny"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("POSITIVE"), "Positive");
        assert_eq!(capitalize("negative"), "Negative");
        assert_eq!(capitalize(""), "");
    }
}
