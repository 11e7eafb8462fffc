use crate::classifier::{ImageClassifier, Prediction};
use crate::error::ReportError;

/// Returns one operator-chosen label with full confidence.
///
/// Stands in for a model when the reporter picks the category by hand.
pub struct FixedClassifier {
    label: String,
}

impl FixedClassifier {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ImageClassifier for FixedClassifier {
    fn classify(&self, _image: &[u8]) -> Result<Vec<Prediction>, ReportError> {
        Ok(vec![Prediction {
            label: self.label.clone(),
            probability: 1.0,
        }])
    }

    fn backend_name(&self) -> &str {
        "fixed"
    }
}
