//! Sentiment classification
//!
//! A [`PolarityAnalyzer`] produces a score in [-1, 1]; the
//! [`SentimentClassifier`] turns that score into a [`Sentiment`] label.

pub mod lexicon;

pub use lexicon::{LexiconAnalyzer, LexiconResult};

use crate::types::Sentiment;
use std::sync::Arc;
use tracing::debug;

/// Source of polarity scores for free text
pub trait PolarityAnalyzer: Send + Sync {
    /// Polarity in [-1, 1]; text with no opinion content scores 0.0
    fn polarity(&self, text: &str) -> f64;
}

/// Three-way sentiment classifier over a polarity analyzer
#[derive(Clone)]
pub struct SentimentClassifier {
    analyzer: Arc<dyn PolarityAnalyzer>,
}

impl SentimentClassifier {
    pub fn new(analyzer: Arc<dyn PolarityAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Classifier backed by the built-in lexicon
    pub fn lexicon() -> Self {
        Self::new(Arc::new(LexiconAnalyzer::new()))
    }

    /// Raw polarity for a text
    pub fn polarity(&self, text: &str) -> f64 {
        self.analyzer.polarity(text)
    }

    /// Label a text
    pub fn classify(&self, text: &str) -> Sentiment {
        let polarity = self.polarity(text);
        let sentiment = Sentiment::from_polarity(polarity);
        debug!("Classified text as {} (polarity {:.3})", sentiment, polarity);
        sentiment
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::lexicon()
    }
}

impl std::fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentClassifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Analyzer that ignores the text and returns a fixed score
    struct FixedPolarity(f64);

    impl PolarityAnalyzer for FixedPolarity {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_lexicon_classifier_examples() {
        let classifier = SentimentClassifier::lexicon();
        assert_eq!(classifier.classify("I love this!"), Sentiment::Positive);
        assert_eq!(classifier.classify("This is terrible"), Sentiment::Negative);
        assert_eq!(classifier.classify("It arrived on Monday"), Sentiment::Neutral);
        assert_eq!(classifier.classify(""), Sentiment::Neutral);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = SentimentClassifier::default();
        let text = "Great service, but the app is slow";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }

    proptest! {
        #[test]
        fn prop_classify_follows_polarity_sign(score in -1.0f64..=1.0) {
            let classifier = SentimentClassifier::new(Arc::new(FixedPolarity(score)));
            let expected = if score > 0.0 {
                Sentiment::Positive
            } else if score < 0.0 {
                Sentiment::Negative
            } else {
                Sentiment::Neutral
            };
            prop_assert_eq!(classifier.classify("anything"), expected);
        }
    }
}
