use tracing::debug;

use crate::error::ClassifierError;
use crate::models::Verdict;
use crate::services::Classifier;

/// Classify `texts` in chunks of `batch_size`, calling `on_batch` with the
/// size of each finished chunk.
pub fn classify_in_batches<C, F>(
    classifier: &C,
    texts: &[String],
    batch_size: usize,
    mut on_batch: F,
) -> Result<Vec<Verdict>, ClassifierError>
where
    C: Classifier + ?Sized,
    F: FnMut(usize),
{
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    let mut verdicts = Vec::with_capacity(texts.len());

    for (index, chunk) in texts.chunks(batch_size.max(1)).enumerate() {
        let batch = classifier.classify(chunk)?;
        if batch.len() != chunk.len() {
            return Err(ClassifierError::LengthMismatch {
                expected: chunk.len(),
                actual: batch.len(),
            });
        }
        debug!(batch = index, size = chunk.len(), "classified batch");
        verdicts.extend(batch);
        on_batch(chunk.len());
    }

    Ok(verdicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingClassifier {
        calls: RefCell<Vec<usize>>,
    }

    impl Classifier for RecordingClassifier {
        fn classify(&self, texts: &[String]) -> Result<Vec<Verdict>, ClassifierError> {
            self.calls.borrow_mut().push(texts.len());
            Ok(texts.iter().map(|_| Verdict::new("POSITIVE", 0.9)).collect())
        }
    }

    struct ShortClassifier;

    impl Classifier for ShortClassifier {
        fn classify(&self, texts: &[String]) -> Result<Vec<Verdict>, ClassifierError> {
            Ok(texts
                .iter()
                .skip(1)
                .map(|_| Verdict::new("NEGATIVE", 0.5))
                .collect())
        }
    }

    fn texts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("comment {i}")).collect()
    }

    #[test]
    fn test_chunks_by_batch_size() {
        let classifier = RecordingClassifier {
            calls: RefCell::new(Vec::new()),
        };
        let mut progressed = 0;
        let verdicts = classify_in_batches(&classifier, &texts(7), 3, |n| progressed += n).unwrap();

        assert_eq!(verdicts.len(), 7);
        assert_eq!(*classifier.calls.borrow(), vec![3, 3, 1]);
        assert_eq!(progressed, 7);
    }

    #[test]
    fn test_empty_input_skips_classifier() {
        let classifier = RecordingClassifier {
            calls: RefCell::new(Vec::new()),
        };
        let verdicts = classify_in_batches(&classifier, &[], 4, |_| {}).unwrap();
        assert!(verdicts.is_empty());
        assert!(classifier.calls.borrow().is_empty());
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let result = classify_in_batches(&ShortClassifier, &texts(2), 8, |_| {});
        assert!(matches!(
            result,
            Err(ClassifierError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }
}
