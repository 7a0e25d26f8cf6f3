//! Exact-then-approximate matching of an utterance against catalog patterns.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::IntentCatalog;
use crate::matcher::similarity::{default_process, weighted_ratio_processed};

/// A pattern that matched an utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    /// Tag of the matching intent.
    pub tag: String,
    /// The pattern that matched.
    pub pattern: String,
    /// Similarity score, 0–100 (100 for exact matches).
    pub score: f64,
    /// Whether the match came from the exact phase.
    pub exact: bool,
}

/// Matches utterances to intents by their example patterns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl FuzzyMatcher {
    /// Minimum similarity for the approximate phase.
    pub const DEFAULT_THRESHOLD: f64 = 70.0;

    /// Create a matcher accepting scores at or above `threshold`.
    pub fn new(threshold: f64) -> Self {
        FuzzyMatcher { threshold }
    }

    /// Get the acceptance threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Tag of the best matching intent, if any.
    pub fn fuzzy_match(&self, raw: &str, catalog: &IntentCatalog) -> Option<String> {
        self.best_match(raw, catalog).map(|m| m.tag)
    }

    /// Run the exact phase, then the approximate phase if nothing matched exactly.
    pub fn best_match(&self, raw: &str, catalog: &IntentCatalog) -> Option<FuzzyMatch> {
        if let Some(found) = self.exact_match(raw, catalog) {
            debug!("Exact pattern match for tag '{}'", found.tag);
            return Some(found);
        }

        let found = self.approximate_match(raw, catalog);
        match &found {
            Some(m) => debug!(
                "Fuzzy match for tag '{}' on {:?} (score {:.1})",
                m.tag, m.pattern, m.score
            ),
            None => debug!("No pattern scored at least {:.1}", self.threshold),
        }
        found
    }

    /// First pattern, in catalog order, equal to `raw` ignoring case and
    /// surrounding whitespace.
    pub fn exact_match(&self, raw: &str, catalog: &IntentCatalog) -> Option<FuzzyMatch> {
        let needle = raw.trim().to_lowercase();

        catalog.intents().iter().find_map(|intent| {
            intent
                .patterns
                .iter()
                .find(|pattern| pattern.trim().to_lowercase() == needle)
                .map(|pattern| FuzzyMatch {
                    tag: intent.tag.clone(),
                    pattern: pattern.clone(),
                    score: 100.0,
                    exact: true,
                })
        })
    }

    /// Highest scoring pattern at or above the threshold.
    ///
    /// The running best is only replaced by a strictly greater score, so the
    /// first pattern seen wins ties.
    pub fn approximate_match(&self, raw: &str, catalog: &IntentCatalog) -> Option<FuzzyMatch> {
        let processed = default_process(raw);
        if processed.is_empty() {
            return None;
        }

        let mut best: Option<FuzzyMatch> = None;

        for intent in catalog.intents() {
            for pattern in &intent.patterns {
                let score = weighted_ratio_processed(&processed, &default_process(pattern));
                if score < self.threshold {
                    continue;
                }
                if best.as_ref().is_none_or(|b| score > b.score) {
                    best = Some(FuzzyMatch {
                        tag: intent.tag.clone(),
                        pattern: pattern.clone(),
                        score,
                        exact: false,
                    });
                }
            }
        }

        best
    }
}
