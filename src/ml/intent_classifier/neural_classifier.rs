//! Intent classifier backed by a pretrained feed-forward network.

use log::debug;

use crate::error::Result;
use crate::ml::backend::ComputeBackend;
use crate::ml::model::ModelBundle;
use crate::util::simd::numeric;

use super::classifier::IntentClassifier;
use super::network::FeedForwardNetwork;
use super::types::ClassificationResult;

/// Neural intent classifier.
#[derive(Debug, Clone)]
pub struct NeuralIntentClassifier {
    network: FeedForwardNetwork,
    all_words: Vec<String>,
    tags: Vec<String>,
    backend: ComputeBackend,
}

impl NeuralIntentClassifier {
    /// Create a classifier from a bundle, validating it first.
    pub fn new(bundle: ModelBundle, backend: ComputeBackend) -> Result<Self> {
        bundle.validate()?;

        Ok(NeuralIntentClassifier {
            network: FeedForwardNetwork::from_bundle(&bundle),
            all_words: bundle.all_words,
            tags: bundle.tags,
            backend,
        })
    }

    /// Get the compute backend.
    pub fn backend(&self) -> ComputeBackend {
        self.backend
    }

    /// Return a copy of this classifier using another backend.
    pub fn with_backend(mut self, backend: ComputeBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Softmax probabilities for every tag, in tag order.
    pub fn probabilities(&self, features: &[f32]) -> Result<Vec<f32>> {
        let logits = self.network.forward(features, self.backend)?;
        Ok(numeric::softmax(&logits))
    }
}

impl IntentClassifier for NeuralIntentClassifier {
    fn classify(&self, features: &[f32]) -> Result<ClassificationResult> {
        let probabilities = self.probabilities(features)?;

        // Bundles always have at least one tag; validate() enforces it.
        let (index, confidence) = numeric::find_max_with_index(&probabilities).unwrap_or((0, 0.0));
        let tag = self.tags.get(index).cloned().unwrap_or_default();

        debug!(
            "Classified as '{tag}' with confidence {confidence:.4} ({} backend)",
            self.backend
        );

        Ok(ClassificationResult {
            tag,
            confidence,
            index,
        })
    }

    fn vocabulary(&self) -> &[String] {
        &self.all_words
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn name(&self) -> &str {
        "neural"
    }
}
