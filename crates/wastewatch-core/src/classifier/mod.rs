pub mod command;
pub mod fallback;
pub mod fixed;
pub mod labels;

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use command::CommandClassifier;
pub use fallback::FallbackClassifier;
pub use fixed::FixedClassifier;
pub use labels::{suggest_waste_type, LabelMap};

/// One ranked classifier output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub probability: f64,
}

/// Trait for image classification backends.
pub trait ImageClassifier: Send + Sync {
    /// Classify image bytes. Predictions are ordered by descending
    /// probability and the probabilities sum to 1.
    fn classify(&self, image: &[u8]) -> Result<Vec<Prediction>, ReportError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Pair labels with probabilities and sort, most likely first.
///
/// Extra labels or scores beyond the shorter of the two are ignored.
pub fn rank(labels: &[String], probabilities: &[f64]) -> Vec<Prediction> {
    let mut pairs: Vec<Prediction> = labels
        .iter()
        .zip(probabilities)
        .map(|(label, &probability)| Prediction {
            label: label.clone(),
            probability,
        })
        .collect();
    pairs.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });
    pairs
}

/// Numerically stable softmax over raw logits.
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Scale non-negative scores so they sum to 1. `None` if they cannot be.
pub fn normalize(scores: &[f64]) -> Option<Vec<f64>> {
    if scores.iter().any(|s| !s.is_finite() || *s < 0.0) {
        return None;
    }
    let sum: f64 = scores.iter().sum();
    if sum <= 0.0 {
        return None;
    }
    Some(scores.iter().map(|s| s / sum).collect())
}
