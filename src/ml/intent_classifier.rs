//! Intent classification with a pretrained feed-forward network.
//!
//! # Architecture
//!
//! - `IntentClassifier` trait: common interface for classifiers
//! - `FeedForwardNetwork`: Linear → ReLU → Linear → ReLU → Linear
//! - `NeuralIntentClassifier`: network plus vocabulary and tags from a `ModelBundle`
//! - `ClassificationResult`: arg-max tag with its softmax probability
//!
//! # Example
//!
//! ```rust,no_run
//! use unibot::ml::backend::ComputeBackend;
//! use unibot::ml::intent_classifier::{self, IntentClassifier};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = intent_classifier::load_neural("data/model.json", ComputeBackend::Simd)?;
//!
//! let mut features = vec![0.0; classifier.vocabulary().len()];
//! features[0] = 1.0;
//! let result = classifier.classify(&features)?;
//! println!("{} ({:.2})", result.tag, result.confidence);
//! # Ok(())
//! # }
//! ```

mod classifier;
mod loader;
mod network;
mod neural_classifier;
mod types;

pub use classifier::IntentClassifier;
pub use loader::{load_neural, new_neural};
pub use network::FeedForwardNetwork;
pub use neural_classifier::NeuralIntentClassifier;
pub use types::ClassificationResult;
