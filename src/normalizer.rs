//! Utterance normalization: spelling correction, analysis and vocabulary projection.
//!
//! ```text
//! raw → TextCorrector → Analyzer (tokenize, lowercase, stem) → bag of words
//! ```
//!
//! Normalization never fails. A corrector error keeps the uncorrected text and
//! an analyzer error yields no tokens, so the classifier simply sees an empty
//! feature vector.

use std::fmt;
use std::sync::Arc;

use ahash::AHashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::catalog::IntentCatalog;
use crate::error::Result;
use crate::spelling::corrector::{CorrectorConfig, SpellingCorrector, TextCorrector};
use crate::spelling::dictionary::{BuiltinDictionary, DOMAIN_WORD_FREQUENCY};

/// Normalizer settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Regex for word units; Unicode word boundaries when unset.
    pub token_pattern: Option<String>,
    /// Spelling correction settings.
    pub correction: CorrectorConfig,
}

/// Bag-of-words vector over the model vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// Get the raw values.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Vector length (always the vocabulary size).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indices set to 1.0.
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0.0)
            .map(|(i, _)| i)
    }
}

/// A normalized utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Text as received.
    pub raw: String,
    /// Text after spelling correction.
    pub corrected: String,
    /// Lowercased, stemmed tokens of `corrected`.
    pub tokens: Vec<String>,
    /// Projection of `tokens` onto the vocabulary.
    pub features: FeatureVector,
}

/// Turns raw text into feature vectors for the classifier.
#[derive(Clone)]
pub struct TextNormalizer {
    corrector: Arc<dyn TextCorrector>,
    analyzer: Arc<dyn Analyzer>,
    vocabulary: Vec<String>,
}

impl TextNormalizer {
    /// Create a normalizer from explicit parts.
    pub fn new(
        vocabulary: Vec<String>,
        analyzer: Arc<dyn Analyzer>,
        corrector: Arc<dyn TextCorrector>,
    ) -> Self {
        TextNormalizer {
            corrector,
            analyzer,
            vocabulary,
        }
    }

    /// Build the standard normalizer.
    ///
    /// The correction dictionary is the builtin English list plus every word of
    /// the catalog patterns and the model vocabulary.
    pub fn from_config(
        config: &NormalizerConfig,
        vocabulary: &[String],
        catalog: &IntentCatalog,
    ) -> Result<Self> {
        let analyzer = match &config.token_pattern {
            Some(pattern) => PipelineAnalyzer::english_with_pattern(pattern)?,
            None => PipelineAnalyzer::english(),
        };

        let mut dictionary = BuiltinDictionary::english();
        for pattern in catalog.patterns() {
            dictionary.add_text(pattern, DOMAIN_WORD_FREQUENCY);
        }
        for word in vocabulary {
            dictionary.add_text(word, DOMAIN_WORD_FREQUENCY);
        }
        debug!("Spelling dictionary has {} words", dictionary.word_count());

        let corrector = SpellingCorrector::with_config(dictionary, config.correction.clone());

        Ok(Self::new(
            vocabulary.to_vec(),
            Arc::new(analyzer),
            Arc::new(corrector),
        ))
    }

    /// The vocabulary features are projected onto.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Normalize an utterance. Never fails.
    pub fn normalize(&self, raw: &str) -> Utterance {
        let corrected = match self.corrector.correct(raw) {
            Ok(result) => result.text().to_string(),
            Err(e) => {
                debug!("Spelling correction skipped: {e}");
                raw.to_string()
            }
        };

        let tokens: Vec<String> = match self.analyzer.analyze(&corrected) {
            Ok(stream) => stream.map(|token| token.text).collect(),
            Err(e) => {
                debug!("Analysis failed, using no tokens: {e}");
                Vec::new()
            }
        };

        let features = self.project(&tokens);
        debug!(
            "Normalized {raw:?} -> {corrected:?}, {} tokens, {} active features",
            tokens.len(),
            features.active_indices().count()
        );

        Utterance {
            raw: raw.to_string(),
            corrected,
            tokens,
            features,
        }
    }

    /// Project stemmed tokens onto the vocabulary.
    pub fn project(&self, tokens: &[String]) -> FeatureVector {
        let present: AHashSet<&str> = tokens.iter().map(String::as_str).collect();
        FeatureVector(
            self.vocabulary
                .iter()
                .map(|word| if present.contains(word.as_str()) { 1.0 } else { 0.0 })
                .collect(),
        )
    }

    /// Vocabulary words active in an utterance's feature vector.
    pub fn active_words<'a>(&'a self, utterance: &Utterance) -> Vec<&'a str> {
        utterance
            .features
            .active_indices()
            .filter_map(|i| self.vocabulary.get(i).map(String::as_str))
            .collect()
    }
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("corrector", &self.corrector.name())
            .field("analyzer", &self.analyzer.name())
            .field("vocabulary", &self.vocabulary.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Intent;
    use crate::error::UnibotError;
    use crate::spelling::corrector::CorrectionResult;

    struct FailingCorrector;

    impl TextCorrector for FailingCorrector {
        fn correct(&self, _text: &str) -> Result<CorrectionResult> {
            Err(UnibotError::correction("boom"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn vocabulary() -> Vec<String> {
        ["cours", "holiday", "student", "what"]
            .iter()
            .map(|w| w.to_string())
            .collect()
    }

    fn catalog() -> IntentCatalog {
        IntentCatalog::from_intents(vec![Intent::new(
            "courses",
            vec!["What courses are offered?".into()],
            vec!["Courses!".into()],
        )])
        .unwrap()
    }

    #[test]
    fn test_normalize_projects_onto_vocabulary() {
        let normalizer =
            TextNormalizer::from_config(&NormalizerConfig::default(), &vocabulary(), &catalog())
                .unwrap();

        let utterance = normalizer.normalize("What COURSES are there?");
        assert_eq!(utterance.features.as_slice(), &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(normalizer.active_words(&utterance), vec!["cours", "what"]);
        assert!(utterance.tokens.contains(&"cours".to_string()));
    }

    #[test]
    fn test_normalize_corrects_spelling() {
        let normalizer =
            TextNormalizer::from_config(&NormalizerConfig::default(), &vocabulary(), &catalog())
                .unwrap();

        let utterance = normalizer.normalize("list of holidyas");
        assert_eq!(utterance.corrected, "list of holidays");
        assert_eq!(utterance.features.as_slice()[1], 1.0);
    }

    #[test]
    fn test_correction_failure_keeps_raw_text() {
        let normalizer = TextNormalizer::new(
            vocabulary(),
            Arc::new(PipelineAnalyzer::english()),
            Arc::new(FailingCorrector),
        );

        let utterance = normalizer.normalize("Holidays");
        assert_eq!(utterance.corrected, "Holidays");
        assert_eq!(utterance.features.as_slice(), &[0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_degenerate_input() {
        let normalizer =
            TextNormalizer::from_config(&NormalizerConfig::default(), &vocabulary(), &catalog())
                .unwrap();

        for raw in ["", "   ", "?!...", "日本語のテキスト", "ÉCOLE"] {
            let utterance = normalizer.normalize(raw);
            assert_eq!(utterance.features.len(), 4);
            assert_eq!(utterance.features.active_indices().count(), 0);
        }
    }

    #[test]
    fn test_custom_token_pattern() {
        let config = NormalizerConfig {
            token_pattern: Some("(".to_string()),
            ..Default::default()
        };
        assert!(TextNormalizer::from_config(&config, &vocabulary(), &catalog()).is_err());
    }
}
