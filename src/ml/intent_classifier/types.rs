//! Common types for intent classification.

use serde::{Deserialize, Serialize};

/// Outcome of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Arg-max tag.
    pub tag: String,
    /// Softmax probability of `tag`, in `[0, 1]`.
    pub confidence: f32,
    /// Output index of `tag`.
    pub index: usize,
}

impl ClassificationResult {
    /// Whether the confidence strictly exceeds `threshold`.
    pub fn is_confident(&self, threshold: f32) -> bool {
        self.confidence > threshold
    }
}
