//! Intent classifier trait definition.

use crate::error::Result;
use crate::ml::intent_classifier::types::ClassificationResult;

/// Intent classifier trait.
///
/// A classifier maps a bag-of-words feature vector over [`vocabulary`](Self::vocabulary)
/// to one of its [`tags`](Self::tags).
pub trait IntentClassifier: Send + Sync {
    /// Classify a feature vector.
    ///
    /// # Arguments
    /// * `features` - One value per vocabulary entry
    ///
    /// # Returns
    /// The most probable tag and its probability, or an error when
    /// `features` does not match the vocabulary length.
    fn classify(&self, features: &[f32]) -> Result<ClassificationResult>;

    /// Ordered vocabulary stems the features are projected onto.
    fn vocabulary(&self) -> &[String];

    /// Ordered output tags.
    fn tags(&self) -> &[String];

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
