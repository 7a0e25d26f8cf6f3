//! Learned intent classification.
//!
//! [`model::ModelBundle`] holds the pretrained vocabulary, tag set and weights.
//! [`intent_classifier::NeuralIntentClassifier`] runs the feed-forward network
//! on a bag-of-words feature vector using one of the [`backend::ComputeBackend`]s.

pub mod backend;
pub mod intent_classifier;
pub mod model;
