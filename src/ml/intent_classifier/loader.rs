//! Helper functions for creating intent classifiers.

use std::path::Path;

use crate::error::Result;
use crate::ml::backend::ComputeBackend;
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::neural_classifier::NeuralIntentClassifier;
use crate::ml::model::ModelBundle;

/// Create a neural intent classifier from an in-memory bundle.
pub fn new_neural(bundle: ModelBundle, backend: ComputeBackend) -> Result<Box<dyn IntentClassifier>> {
    Ok(Box::new(NeuralIntentClassifier::new(bundle, backend)?))
}

/// Load a model bundle from disk and wrap it in a neural intent classifier.
pub fn load_neural<P: AsRef<Path>>(
    path: P,
    backend: ComputeBackend,
) -> Result<Box<dyn IntentClassifier>> {
    new_neural(ModelBundle::load(path)?, backend)
}
