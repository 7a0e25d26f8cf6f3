//! Bot configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "confidence_threshold": 0.75, "backend": "parallel" }
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UnibotError};
use crate::ml::backend::ComputeBackend;
use crate::normalizer::NormalizerConfig;

/// Settings for a [`ChatEngine`](crate::chat::ChatEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Classifier confidence above which data answers are tried.
    pub confidence_threshold: f32,
    /// Minimum fuzzy score (0–100) for a pattern match.
    pub fuzzy_threshold: f64,
    /// Prefix for download links in data answers.
    pub base_url: String,
    /// Longer utterances are truncated to this many chars.
    pub max_utterance_chars: usize,
    /// Compute backend for the classifier.
    pub backend: ComputeBackend,
    /// Spelling correction and tokenization.
    pub normalizer: NormalizerConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            confidence_threshold: 0.80,
            fuzzy_threshold: 70.0,
            base_url: "http://127.0.0.1:5000".to_string(),
            max_utterance_chars: 1000,
            backend: ComputeBackend::default(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl BotConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: BotConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check that thresholds and limits are usable.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(UnibotError::config(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if !(0.0..=100.0).contains(&self.fuzzy_threshold) {
            return Err(UnibotError::config(format!(
                "fuzzy_threshold must be within [0, 100], got {}",
                self.fuzzy_threshold
            )));
        }
        if self.max_utterance_chars == 0 {
            return Err(UnibotError::config("max_utterance_chars must be positive"));
        }

        let correction = &self.normalizer.correction;
        if !(0.0..=1.0).contains(&correction.auto_correct_threshold) {
            return Err(UnibotError::config(format!(
                "normalizer.correction.auto_correct_threshold must be within [0, 1], got {}",
                correction.auto_correct_threshold
            )));
        }
        if correction.min_word_length > correction.max_word_length {
            return Err(UnibotError::config(
                "normalizer.correction.min_word_length exceeds max_word_length",
            ));
        }

        Ok(())
    }
}
