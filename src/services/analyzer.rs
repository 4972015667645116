//! Comment-level sentiment analysis: clean, filter, classify, override.

use tracing::{debug, info};

use crate::error::ClassifierError;
use crate::models::{AnalyzedComment, Comment, SentimentResult};
use crate::services::{Classifier, SarcasmRules, classify_in_batches};
use crate::utils::{clean_text, is_meaningful};

pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Comments with their cleaned text and the positions worth classifying.
pub struct PreparedComments<'a> {
    comments: &'a [Comment],
    cleaned: Vec<String>,
    meaningful_idx: Vec<usize>,
}

impl<'a> PreparedComments<'a> {
    pub fn new(comments: &'a [Comment]) -> Self {
        let cleaned: Vec<String> = comments.iter().map(clean_text).collect();
        let meaningful_idx: Vec<usize> = cleaned
            .iter()
            .enumerate()
            .filter(|(_, text)| is_meaningful(text))
            .map(|(i, _)| i)
            .collect();

        debug!(
            total = comments.len(),
            meaningful = meaningful_idx.len(),
            "filtered comments"
        );

        Self {
            comments,
            cleaned,
            meaningful_idx,
        }
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Number of comments that will be sent to the classifier.
    pub fn meaningful(&self) -> usize {
        self.meaningful_idx.len()
    }
}

pub struct SentimentAnalyzer<C> {
    classifier: C,
    rules: SarcasmRules,
    batch_size: usize,
}

impl<C: Classifier> SentimentAnalyzer<C> {
    pub fn new(classifier: C, rules: SarcasmRules) -> Self {
        Self {
            classifier,
            rules,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn analyze(&self, comments: &[Comment]) -> Result<Vec<AnalyzedComment>, ClassifierError> {
        self.analyze_with_progress(comments, |_| {})
    }

    /// Analyze comments, reporting each classified batch size to `on_batch`.
    pub fn analyze_with_progress<F>(
        &self,
        comments: &[Comment],
        on_batch: F,
    ) -> Result<Vec<AnalyzedComment>, ClassifierError>
    where
        F: FnMut(usize),
    {
        self.analyze_prepared(PreparedComments::new(comments), on_batch)
    }

    /// Classify comments already cleaned and filtered by [`PreparedComments::new`].
    ///
    /// Comments that clean to nothing meaningful are Neutral with a zero
    /// score and never reach the classifier. Output order matches input.
    pub fn analyze_prepared<F>(
        &self,
        prepared: PreparedComments<'_>,
        on_batch: F,
    ) -> Result<Vec<AnalyzedComment>, ClassifierError>
    where
        F: FnMut(usize),
    {
        let PreparedComments {
            comments,
            cleaned,
            meaningful_idx,
        } = prepared;

        let meaningful_texts: Vec<String> =
            meaningful_idx.iter().map(|&i| cleaned[i].clone()).collect();
        let verdicts =
            classify_in_batches(&self.classifier, &meaningful_texts, self.batch_size, on_batch)?;

        let mut results = vec![SentimentResult::neutral(); comments.len()];
        for (idx, verdict) in meaningful_idx.into_iter().zip(verdicts.iter()) {
            results[idx] = self.rules.apply(comments[idx].raw(), verdict)?;
        }

        let rows: Vec<AnalyzedComment> = comments
            .iter()
            .zip(cleaned)
            .zip(results)
            .map(|((comment, cleaned_text), result)| {
                AnalyzedComment::new(comment.raw(), cleaned_text, result)
            })
            .collect();

        info!(comments = rows.len(), "analysis complete");
        Ok(rows)
    }

    /// Analyze a single piece of text.
    pub fn analyze_text(&self, text: &str) -> Result<AnalyzedComment, ClassifierError> {
        let mut rows = self.analyze(&[Comment::from(text)])?;
        rows.pop().ok_or(ClassifierError::LengthMismatch {
            expected: 1,
            actual: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sentiment, Verdict};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Returns a fixed verdict per cleaned text and records what it saw.
    struct TableClassifier {
        table: HashMap<String, Verdict>,
        seen: RefCell<Vec<String>>,
    }

    impl TableClassifier {
        fn new(entries: &[(&str, &str, f32)]) -> Self {
            Self {
                table: entries
                    .iter()
                    .map(|(text, label, score)| (text.to_string(), Verdict::new(*label, *score)))
                    .collect(),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Classifier for TableClassifier {
        fn classify(&self, texts: &[String]) -> Result<Vec<Verdict>, ClassifierError> {
            self.seen.borrow_mut().extend(texts.iter().cloned());
            Ok(texts
                .iter()
                .map(|t| {
                    self.table
                        .get(t)
                        .cloned()
                        .unwrap_or_else(|| Verdict::new("POSITIVE", 0.5))
                })
                .collect())
        }
    }

    struct BrokenClassifier;

    impl Classifier for BrokenClassifier {
        fn classify(&self, _texts: &[String]) -> Result<Vec<Verdict>, ClassifierError> {
            Ok(vec![Verdict::new("NEUTRAL", 0.5)])
        }
    }

    #[test]
    fn test_analyze_mixed_comments() {
        let classifier = TableClassifier::new(&[
            ("i love this product!", "POSITIVE", 0.98),
            ("the delivery was late.", "NEGATIVE", 0.91),
            ("do whatever you want.", "POSITIVE", 0.7),
        ]);
        let analyzer = SentimentAnalyzer::new(classifier, SarcasmRules::default());

        let comments = vec![
            Comment::from("I love this product!"),
            Comment::from("The delivery was LATE."),
            Comment::Missing,
            Comment::from("Do whatever you want."),
            Comment::from("rghhh"),
            Comment::Other("42".to_string()),
        ];
        let rows = analyzer.analyze(&comments).unwrap();

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].sentiment, Sentiment::Positive);
        assert_eq!(rows[0].polarity_score, 0.98);
        assert_eq!(rows[1].sentiment, Sentiment::Negative);
        assert_eq!(rows[1].polarity_score, -0.91);
        assert_eq!(rows[1].cleaned_text, "the delivery was late.");
        assert_eq!(rows[2].sentiment, Sentiment::Neutral);
        assert_eq!(rows[2].polarity_score, 0.0);
        assert_eq!(rows[3].sentiment, Sentiment::Negative);
        assert_eq!(rows[3].polarity_score, -0.95);
        assert_eq!(rows[4].sentiment, Sentiment::Neutral);
        assert_eq!(rows[5].text, "42");
        assert_eq!(rows[5].cleaned_text, "");
        assert_eq!(rows[5].sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_non_meaningful_comments_skip_classifier() {
        let classifier = TableClassifier::new(&[]);
        let analyzer = SentimentAnalyzer::new(classifier, SarcasmRules::default());

        let comments = vec![
            Comment::from("ok"),
            Comment::from("xyz"),
            Comment::from("!!!"),
            Comment::from("nice work team"),
        ];
        analyzer.analyze(&comments).unwrap();

        assert_eq!(
            *analyzer.classifier().seen.borrow(),
            vec!["ok".to_string(), "nice work team".to_string()]
        );
    }

    #[test]
    fn test_override_uses_raw_text() {
        // Cleaning drops the comma, but the rule sees the raw comment.
        let classifier = TableClassifier::new(&[("sure whatever works", "POSITIVE", 0.9)]);
        let analyzer = SentimentAnalyzer::new(classifier, SarcasmRules::default());

        let row = analyzer.analyze_text("Sure, whatever works").unwrap();
        assert_eq!(row.cleaned_text, "sure whatever works");
        assert_eq!(row.sentiment, Sentiment::Negative);
        assert_eq!(row.polarity_score, -0.95);
    }

    #[test]
    fn test_batches_preserve_order() {
        let classifier = TableClassifier::new(&[
            ("first comment here", "POSITIVE", 0.8),
            ("second comment here", "NEGATIVE", 0.7),
            ("third comment here", "POSITIVE", 0.6),
        ]);
        let analyzer =
            SentimentAnalyzer::new(classifier, SarcasmRules::default()).with_batch_size(1);

        let comments: Vec<Comment> = ["First comment here", "Second comment here", "Third comment here"]
            .into_iter()
            .map(Comment::from)
            .collect();
        let mut batches = 0;
        let rows = analyzer
            .analyze_with_progress(&comments, |_| batches += 1)
            .unwrap();

        assert_eq!(batches, 3);
        let scores: Vec<f32> = rows.iter().map(|r| r.polarity_score).collect();
        assert_eq!(scores, vec![0.8, -0.7, 0.6]);
    }

    #[test]
    fn test_prepared_counts_match_classifier_calls() {
        let comments = vec![
            Comment::from("Great job everyone"),
            Comment::from("zzz"),
            Comment::Missing,
            Comment::from("ok"),
        ];
        let prepared = PreparedComments::new(&comments);
        assert_eq!(prepared.len(), 4);
        assert!(!prepared.is_empty());
        assert_eq!(prepared.meaningful(), 2);

        let analyzer = SentimentAnalyzer::new(TableClassifier::new(&[]), SarcasmRules::default());
        let mut sent = 0;
        let rows = analyzer
            .analyze_prepared(prepared, |n| sent += n)
            .unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(sent, 2);
        assert_eq!(analyzer.classifier().seen.borrow().len(), 2);
        assert_eq!(rows[1].sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_malformed_classifier_output_fails() {
        let analyzer = SentimentAnalyzer::new(BrokenClassifier, SarcasmRules::default());

        let err = analyzer
            .analyze(&[Comment::from("a perfectly normal comment")])
            .unwrap_err();
        assert!(matches!(err, ClassifierError::UnknownLabel(_)));

        let err = analyzer
            .analyze(&[Comment::from("one comment"), Comment::from("another comment")])
            .unwrap_err();
        assert!(matches!(err, ClassifierError::LengthMismatch { .. }));
    }
}
