use crate::classifier::{ImageClassifier, Prediction};
use crate::error::ReportError;
use tracing::{debug, warn};

/// Tries each backend in order; the first success wins.
#[derive(Default)]
pub struct FallbackClassifier {
    strategies: Vec<Box<dyn ImageClassifier>>,
}

impl FallbackClassifier {
    pub fn new(strategies: Vec<Box<dyn ImageClassifier>>) -> Self {
        Self { strategies }
    }

    pub fn push(&mut self, strategy: Box<dyn ImageClassifier>) {
        self.strategies.push(strategy);
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl ImageClassifier for FallbackClassifier {
    fn classify(&self, image: &[u8]) -> Result<Vec<Prediction>, ReportError> {
        let mut attempts = Vec::new();
        for strategy in &self.strategies {
            match strategy.classify(image) {
                Ok(predictions) => {
                    debug!(backend = strategy.backend_name(), "classifier succeeded");
                    return Ok(predictions);
                }
                Err(e) => {
                    warn!(backend = strategy.backend_name(), error = %e, "classifier failed, trying next");
                    attempts.push(format!("{}: {}", strategy.backend_name(), e));
                }
            }
        }
        Err(ReportError::ClassifierExhausted { attempts })
    }

    fn backend_name(&self) -> &str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FixedClassifier;

    struct Broken;

    impl ImageClassifier for Broken {
        fn classify(&self, _image: &[u8]) -> Result<Vec<Prediction>, ReportError> {
            Err(ReportError::Classifier {
                backend: "broken".into(),
                reason: "model file missing".into(),
            })
        }

        fn backend_name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_falls_back_to_second() {
        let classifier =
            FallbackClassifier::new(vec![Box::new(Broken), Box::new(FixedClassifier::new("Tire"))]);
        let predictions = classifier.classify(b"img").unwrap();
        assert_eq!(predictions[0].label, "Tire");
    }

    #[test]
    fn test_first_success_wins() {
        let classifier = FallbackClassifier::new(vec![
            Box::new(FixedClassifier::new("Metal")),
            Box::new(FixedClassifier::new("Tire")),
        ]);
        assert_eq!(classifier.classify(b"img").unwrap()[0].label, "Metal");
    }

    #[test]
    fn test_all_failed_is_surfaced() {
        let classifier = FallbackClassifier::new(vec![Box::new(Broken), Box::new(Broken)]);
        match classifier.classify(b"img") {
            Err(ReportError::ClassifierExhausted { attempts }) => assert_eq!(attempts.len(), 2),
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_chain_is_exhausted() {
        let classifier = FallbackClassifier::default();
        assert!(classifier.is_empty());
        assert!(matches!(
            classifier.classify(b"img"),
            Err(ReportError::ClassifierExhausted { .. })
        ));
    }
}
