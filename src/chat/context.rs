//! Immutable state shared by every request.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use crate::catalog::IntentCatalog;
use crate::config::BotConfig;
use crate::error::Result;
use crate::matcher::FuzzyMatcher;
use crate::ml::intent_classifier::{self, IntentClassifier};
use crate::normalizer::TextNormalizer;
use crate::responder::{DataResponder, RandomSelector, ResponseSelector};
use crate::store::{MemoryStore, UniversityStore};

/// Catalog, model, normalizer and collaborators for one bot instance.
pub struct BotContext {
    config: BotConfig,
    catalog: IntentCatalog,
    normalizer: TextNormalizer,
    classifier: Arc<dyn IntentClassifier>,
    matcher: FuzzyMatcher,
    data: DataResponder,
    selector: Arc<dyn ResponseSelector>,
}

impl BotContext {
    /// Assemble a context from loaded parts.
    ///
    /// The normalizer is built for the classifier's vocabulary. Classifier tags
    /// missing from the catalog are allowed but logged, since such a tag can
    /// only ever be answered by the data responder.
    pub fn new(
        config: BotConfig,
        catalog: IntentCatalog,
        classifier: Arc<dyn IntentClassifier>,
        store: Arc<dyn UniversityStore>,
    ) -> Result<Self> {
        config.validate()?;

        let normalizer =
            TextNormalizer::from_config(&config.normalizer, classifier.vocabulary(), &catalog)?;

        for tag in classifier.tags() {
            if catalog.get(tag).is_none() && !DataResponder::handles(tag) {
                warn!("Classifier tag '{tag}' has no intent in the catalog");
            }
        }

        Ok(BotContext {
            matcher: FuzzyMatcher::new(config.fuzzy_threshold),
            data: DataResponder::new(store, config.base_url.clone()),
            selector: Arc::new(RandomSelector),
            config,
            catalog,
            normalizer,
            classifier,
        })
    }

    /// Load the catalog, model and (optionally) a store snapshot from disk.
    ///
    /// Without a snapshot the store is empty.
    pub fn load<P, Q, R>(
        config: BotConfig,
        intents_path: P,
        model_path: Q,
        data_path: Option<R>,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        R: AsRef<Path>,
    {
        let catalog = IntentCatalog::load(intents_path)?;
        let classifier: Arc<dyn IntentClassifier> =
            intent_classifier::load_neural(model_path, config.backend)?.into();
        let store = match data_path {
            Some(path) => MemoryStore::load(path)?,
            None => MemoryStore::new(),
        };

        info!(
            "Bot ready: {} intents, {} vocabulary words, {} tags, {} backend",
            catalog.len(),
            classifier.vocabulary().len(),
            classifier.tags().len(),
            config.backend
        );

        Self::new(config, catalog, classifier, Arc::new(store))
    }

    /// Replace the source of randomness used for canned responses.
    pub fn with_selector(mut self, selector: Arc<dyn ResponseSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> &dyn IntentClassifier {
        self.classifier.as_ref()
    }

    pub fn matcher(&self) -> &FuzzyMatcher {
        &self.matcher
    }

    pub fn data(&self) -> &DataResponder {
        &self.data
    }

    pub fn store(&self) -> &dyn UniversityStore {
        self.data.store().as_ref()
    }

    pub fn selector(&self) -> &dyn ResponseSelector {
        self.selector.as_ref()
    }
}

impl fmt::Debug for BotContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotContext")
            .field("config", &self.config)
            .field("intents", &self.catalog.len())
            .field("normalizer", &self.normalizer)
            .field("classifier", &self.classifier.name())
            .field("matcher", &self.matcher)
            .field("data", &self.data)
            .field("selector", &self.selector.name())
            .finish()
    }
}
