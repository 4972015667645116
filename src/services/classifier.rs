//! Classifier seam between the analyzer and the sentiment model.

use crate::error::ClassifierError;
use crate::models::Verdict;

/// Something that labels texts with a sentiment class and confidence.
///
/// Implementations must return exactly one verdict per input text, in input
/// order.
pub trait Classifier {
    fn classify(&self, texts: &[String]) -> Result<Vec<Verdict>, ClassifierError>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn classify(&self, texts: &[String]) -> Result<Vec<Verdict>, ClassifierError> {
        (**self).classify(texts)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn classify(&self, texts: &[String]) -> Result<Vec<Verdict>, ClassifierError> {
        (**self).classify(texts)
    }
}
