//! Static intent catalog loaded from `intents.json`.
//!
//! The catalog is the knowledge base of canned answers: each [`Intent`] has a
//! unique tag, example patterns used by the fuzzy matcher, and the responses the
//! bot picks from when that intent is resolved.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UnibotError};

/// One intent of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Unique tag, shared with the classifier's output labels.
    pub tag: String,
    /// Example utterances. An intent without patterns is never fuzzy matched.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Canned responses; must not be empty.
    pub responses: Vec<String>,
}

impl Intent {
    /// Create a new intent.
    pub fn new<S: Into<String>>(tag: S, patterns: Vec<String>, responses: Vec<String>) -> Self {
        Intent {
            tag: tag.into(),
            patterns,
            responses,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct CatalogDocument {
    intents: Vec<Intent>,
}

/// Immutable, validated set of intents in file order.
#[derive(Debug, Clone, Default)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
    by_tag: AHashMap<String, usize>,
}

impl IntentCatalog {
    /// Build a catalog, rejecting duplicate tags and intents without responses.
    pub fn from_intents(intents: Vec<Intent>) -> Result<Self> {
        let mut by_tag = AHashMap::with_capacity(intents.len());

        for (position, intent) in intents.iter().enumerate() {
            if intent.tag.trim().is_empty() {
                return Err(UnibotError::catalog(format!(
                    "intent #{position} has an empty tag"
                )));
            }
            if intent.responses.is_empty() {
                return Err(UnibotError::catalog(format!(
                    "intent '{}' has no responses",
                    intent.tag
                )));
            }
            if by_tag.insert(intent.tag.clone(), position).is_some() {
                return Err(UnibotError::catalog(format!(
                    "duplicate intent tag '{}'",
                    intent.tag
                )));
            }
        }

        Ok(IntentCatalog { intents, by_tag })
    }

    /// Parse a `{"intents": [...]}` document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_intents(document.intents)
    }

    /// Load and validate a catalog file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let catalog = Self::from_json_str(&fs::read_to_string(path)?)?;

        info!(
            "Loaded {} intents ({} patterns) from {}",
            catalog.len(),
            catalog.pattern_count(),
            path.display()
        );

        Ok(catalog)
    }

    /// Serialize back to the `{"intents": [...]}` layout.
    pub fn to_json_string(&self) -> Result<String> {
        let document = CatalogDocument {
            intents: self.intents.clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Intents in file order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Look up an intent by tag.
    pub fn get(&self, tag: &str) -> Option<&Intent> {
        self.by_tag.get(tag).map(|&i| &self.intents[i])
    }

    /// Number of intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Whether the catalog has no intents.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Total number of patterns over all intents.
    pub fn pattern_count(&self) -> usize {
        self.intents.iter().map(|i| i.patterns.len()).sum()
    }

    /// Every pattern, in catalog order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.intents
            .iter()
            .flat_map(|intent| intent.patterns.iter().map(String::as_str))
    }
}
