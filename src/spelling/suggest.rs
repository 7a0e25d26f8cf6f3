//! Spelling suggestion generation.

use std::cmp::Ordering;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::spelling::dictionary::SpellingDictionary;
use crate::util::levenshtein::LevenshteinMatcher;

/// A spelling suggestion with a score indicating confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested word.
    pub word: String,
    /// Confidence score (higher is better, 0.0 to 1.0).
    pub score: f64,
    /// Edit distance from the original word.
    pub distance: usize,
    /// Frequency of the suggested word in the dictionary.
    pub frequency: u32,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(word: String, score: f64, distance: usize, frequency: u32) -> Self {
        Suggestion {
            word,
            score,
            distance,
            frequency,
        }
    }
}

impl Eq for Suggestion {}

impl Ord for Suggestion {
    // Best first: higher score, then smaller distance, then more frequent, then alphabetical.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.distance.cmp(&other.distance))
            .then_with(|| other.frequency.cmp(&self.frequency))
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Configuration for spelling suggestion generation.
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    /// Maximum edit distance to consider.
    pub max_distance: usize,
    /// Maximum number of suggestions to return.
    pub max_suggestions: usize,
    /// Minimum frequency threshold for suggestions.
    pub min_frequency: u32,
    /// Weight for edit distance in scoring (0.0 to 1.0).
    pub distance_weight: f64,
    /// Weight for word frequency in scoring (0.0 to 1.0).
    pub frequency_weight: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            max_distance: 2,
            max_suggestions: 5,
            min_frequency: 1,
            distance_weight: 0.6,
            frequency_weight: 0.4,
        }
    }
}

/// Spelling suggestion engine over a fixed dictionary.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    dictionary: SpellingDictionary,
    config: SuggestionConfig,
}

impl SuggestionEngine {
    /// Create a new suggestion engine with the given dictionary.
    pub fn new(dictionary: SpellingDictionary) -> Self {
        Self::with_config(dictionary, SuggestionConfig::default())
    }

    /// Create a new suggestion engine with custom configuration.
    pub fn with_config(dictionary: SpellingDictionary, config: SuggestionConfig) -> Self {
        SuggestionEngine { dictionary, config }
    }

    /// Get the dictionary backing this engine.
    pub fn dictionary(&self) -> &SpellingDictionary {
        &self.dictionary
    }

    /// Get suggestions for a potentially misspelled word, best first.
    pub fn suggest(&self, word: &str) -> Vec<Suggestion> {
        let word_lower = word.to_lowercase();

        if self.dictionary.contains(&word_lower) {
            let frequency = self.dictionary.frequency(&word_lower);
            return vec![Suggestion::new(word_lower, 1.0, 0, frequency)];
        }

        let matcher = LevenshteinMatcher::new(word_lower.clone());
        let mut suggestions: Vec<Suggestion> = self
            .generate_candidates(&word_lower)
            .into_iter()
            .filter_map(|candidate| {
                let distance = matcher.distance_threshold(&candidate, self.config.max_distance)?;
                let frequency = self.dictionary.frequency(&candidate);
                if frequency < self.config.min_frequency {
                    return None;
                }
                let score = self.calculate_score(&word_lower, &candidate, distance, frequency);
                Some(Suggestion::new(candidate, score, distance, frequency))
            })
            .collect();

        suggestions.sort();
        suggestions.truncate(self.config.max_suggestions);
        suggestions
    }

    /// Collect dictionary words that may be within the edit distance limit.
    fn generate_candidates(&self, word: &str) -> AHashSet<String> {
        let mut candidates: AHashSet<String> = self
            .generate_edits(word)
            .into_iter()
            .filter(|edit| self.dictionary.contains(edit))
            .collect();

        if self.config.max_distance >= 2 {
            // Second-order edits grow quadratically; scan the dictionary instead.
            let len = word.chars().count();
            candidates.extend(
                self.dictionary
                    .words_near_length(len, self.config.max_distance)
                    .map(str::to_string),
            );
        }

        let prefix: String = word.chars().take(3).collect();
        candidates.extend(self.dictionary.words_with_prefix(&prefix));

        candidates
    }

    /// Generate all single edits of a word.
    fn generate_edits(&self, word: &str) -> AHashSet<String> {
        let mut edits = AHashSet::new();
        let chars: Vec<char> = word.chars().collect();
        let len = chars.len();

        // Deletions
        for i in 0..len {
            let mut new_word = chars.clone();
            new_word.remove(i);
            edits.insert(new_word.into_iter().collect());
        }

        // Transpositions
        for i in 0..len.saturating_sub(1) {
            let mut new_word = chars.clone();
            new_word.swap(i, i + 1);
            edits.insert(new_word.into_iter().collect());
        }

        // Replacements
        for i in 0..len {
            for ch in 'a'..='z' {
                if ch != chars[i] {
                    let mut new_word = chars.clone();
                    new_word[i] = ch;
                    edits.insert(new_word.into_iter().collect());
                }
            }
        }

        // Insertions
        for i in 0..=len {
            for ch in 'a'..='z' {
                let mut new_word = chars.clone();
                new_word.insert(i, ch);
                edits.insert(new_word.into_iter().collect());
            }
        }

        edits
    }

    /// Calculate a confidence score for a suggestion.
    fn calculate_score(
        &self,
        original: &str,
        candidate: &str,
        distance: usize,
        frequency: u32,
    ) -> f64 {
        let original_len = original.chars().count();

        // One edit in a long word is less suspicious than one edit in a short word.
        let distance_score = 1.0 - distance as f64 / (original_len as f64 + 1.0);

        let max_frequency = self.dictionary.max_frequency();
        let frequency_score = if max_frequency == 0 {
            0.0
        } else {
            (1.0 + frequency as f64).ln() / (1.0 + max_frequency as f64).ln()
        };

        let length_penalty = if original_len == candidate.chars().count() {
            1.0
        } else {
            0.9
        };

        let prefix_bonus = self.calculate_prefix_bonus(original, candidate);

        let base_score = distance_score * self.config.distance_weight
            + frequency_score * self.config.frequency_weight;

        (base_score * length_penalty * prefix_bonus).min(1.0)
    }

    /// Calculate bonus for common prefixes, from 1.0 up to 1.2.
    fn calculate_prefix_bonus(&self, original: &str, candidate: &str) -> f64 {
        let common_prefix_len = original
            .chars()
            .zip(candidate.chars())
            .take_while(|(a, b)| a == b)
            .count();

        let max_len = original.chars().count().max(candidate.chars().count());
        if max_len == 0 {
            return 1.0;
        }

        1.0 + (common_prefix_len as f64 / max_len as f64) * 0.2
    }

    /// Check if a word exists in the dictionary.
    pub fn is_correct(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }
}
