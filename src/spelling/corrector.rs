//! Utterance-level spelling correction.
//!
//! [`SpellingCorrector`] walks the Unicode word segments of an utterance and
//! replaces misspelled ASCII words with their best dictionary suggestion. Every
//! other segment (whitespace, punctuation, digits, non-ASCII words) is copied
//! through unchanged, so the corrected text keeps the shape of the input.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Result, UnibotError};
use crate::spelling::dictionary::{BuiltinDictionary, SpellingDictionary};
use crate::spelling::suggest::{Suggestion, SuggestionConfig, SuggestionEngine};

/// Configuration for the spelling corrector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Maximum edit distance for suggestions.
    pub max_distance: usize,
    /// Maximum number of suggestions to keep per word.
    pub max_suggestions: usize,
    /// Minimum frequency threshold for suggestions.
    pub min_frequency: u32,
    /// Whether to replace misspelled words automatically.
    pub auto_correct: bool,
    /// Minimum suggestion score for automatic replacement (0.0 to 1.0).
    pub auto_correct_threshold: f64,
    /// Words shorter than this (in chars) are never corrected.
    pub min_word_length: usize,
    /// Words longer than this (in chars) are never corrected.
    pub max_word_length: usize,
    /// Texts longer than this (in chars) are refused with an error.
    pub max_text_chars: usize,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            max_distance: 2,
            max_suggestions: 5,
            min_frequency: 1,
            auto_correct: true,
            auto_correct_threshold: 0.6,
            min_word_length: 3,
            max_word_length: 24,
            max_text_chars: 2_000,
        }
    }
}

/// One replaced word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCorrection {
    /// The word as typed.
    pub original: String,
    /// The replacement that was applied.
    pub replacement: String,
    /// Score of the applied suggestion.
    pub score: f64,
}

/// Result of spelling correction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionResult {
    /// Original text.
    pub original: String,
    /// Corrected text, if any word was replaced.
    pub corrected: Option<String>,
    /// Words that were replaced, in input order.
    pub corrections: Vec<WordCorrection>,
    /// Misspelled words without an applied replacement, with their suggestions.
    pub unresolved: Vec<(String, Vec<Suggestion>)>,
    /// Average confidence over the checked words.
    pub confidence: f64,
}

impl CorrectionResult {
    /// Create a new correction result.
    pub fn new(original: String) -> Self {
        CorrectionResult {
            original,
            corrected: None,
            corrections: Vec::new(),
            unresolved: Vec::new(),
            confidence: 1.0,
        }
    }

    /// Get the corrected text, or the original if nothing changed.
    pub fn text(&self) -> &str {
        self.corrected.as_deref().unwrap_or(&self.original)
    }

    /// Whether any word was replaced.
    pub fn was_corrected(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// A component that spelling-corrects free text.
pub trait TextCorrector: Send + Sync {
    /// Correct `text`. Errors are recoverable: callers fall back to the input.
    fn correct(&self, text: &str) -> Result<CorrectionResult>;

    /// Get the name of this corrector (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Dictionary-based spelling corrector.
#[derive(Debug, Clone)]
pub struct SpellingCorrector {
    engine: SuggestionEngine,
    config: CorrectorConfig,
}

impl SpellingCorrector {
    /// Create a new spelling corrector with the builtin dictionary.
    pub fn new() -> Self {
        Self::with_config(BuiltinDictionary::english(), CorrectorConfig::default())
    }

    /// Create a new spelling corrector with a custom dictionary.
    pub fn with_dictionary(dictionary: SpellingDictionary) -> Self {
        Self::with_config(dictionary, CorrectorConfig::default())
    }

    /// Create a new spelling corrector with custom configuration.
    pub fn with_config(dictionary: SpellingDictionary, config: CorrectorConfig) -> Self {
        let suggestion_config = SuggestionConfig {
            max_distance: config.max_distance,
            max_suggestions: config.max_suggestions,
            min_frequency: config.min_frequency,
            ..Default::default()
        };
        let engine = SuggestionEngine::with_config(dictionary, suggestion_config);

        SpellingCorrector { engine, config }
    }

    /// Get the corrector configuration.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Check if a word is correctly spelled.
    pub fn is_correct(&self, word: &str) -> bool {
        self.engine.is_correct(word)
    }

    /// Get statistics about the corrector.
    pub fn stats(&self) -> CorrectorStats {
        let dictionary = self.engine.dictionary();
        CorrectorStats {
            dictionary_words: dictionary.word_count(),
            dictionary_total_frequency: dictionary.total_frequency(),
        }
    }

    fn is_checkable(&self, segment: &str) -> bool {
        let len = segment.len();
        segment.bytes().all(|b| b.is_ascii_alphabetic())
            && len >= self.config.min_word_length
            && len <= self.config.max_word_length
    }
}

impl Default for SpellingCorrector {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCorrector for SpellingCorrector {
    fn correct(&self, text: &str) -> Result<CorrectionResult> {
        let char_count = text.chars().count();
        if char_count > self.config.max_text_chars {
            return Err(UnibotError::correction(format!(
                "text has {char_count} chars, limit is {}",
                self.config.max_text_chars
            )));
        }

        let mut result = CorrectionResult::new(text.to_string());
        let mut output = String::with_capacity(text.len());
        let mut checked = 0usize;
        let mut total_confidence = 0.0;

        for segment in text.split_word_bounds() {
            if !self.is_checkable(segment) {
                output.push_str(segment);
                continue;
            }

            checked += 1;
            if self.engine.is_correct(segment) {
                total_confidence += 1.0;
                output.push_str(segment);
                continue;
            }

            let suggestions = self.engine.suggest(segment);
            match suggestions.first() {
                Some(best)
                    if self.config.auto_correct
                        && best.score >= self.config.auto_correct_threshold =>
                {
                    total_confidence += best.score;
                    let replacement = match_case(segment, &best.word);
                    output.push_str(&replacement);
                    result.corrections.push(WordCorrection {
                        original: segment.to_string(),
                        replacement,
                        score: best.score,
                    });
                }
                Some(best) => {
                    total_confidence += best.score;
                    output.push_str(segment);
                    result.unresolved.push((segment.to_string(), suggestions));
                }
                None => {
                    // Unknown word without candidates gets a neutral score
                    total_confidence += 0.5;
                    output.push_str(segment);
                }
            }
        }

        if checked > 0 {
            result.confidence = total_confidence / checked as f64;
        }
        if result.was_corrected() {
            result.corrected = Some(output);
        }

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "spelling"
    }
}

/// Carry the capitalization of `original` over to `replacement`.
fn match_case(original: &str, replacement: &str) -> String {
    let mut chars = original.chars();
    let first_upper = chars.next().is_some_and(char::is_uppercase);

    if first_upper && original.len() > 1 && chars.all(char::is_uppercase) {
        return replacement.to_uppercase();
    }

    if first_upper {
        let mut rest = replacement.chars();
        return match rest.next() {
            Some(first) => first.to_uppercase().chain(rest).collect(),
            None => String::new(),
        };
    }

    replacement.to_string()
}

/// Statistics about the spelling corrector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectorStats {
    /// Number of words in the dictionary.
    pub dictionary_words: usize,
    /// Total frequency count in dictionary.
    pub dictionary_total_frequency: u64,
}
