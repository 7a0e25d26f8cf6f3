//! Request handling over a shared [`BotContext`].

use std::borrow::Cow;
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::chat::context::BotContext;
use crate::error::{Result, UnibotError};
use crate::ml::intent_classifier::ClassificationResult;
use crate::normalizer::Utterance;
use crate::responder::BotResponse;

/// Answer when neither the classifier nor the fuzzy matcher resolves an intent.
pub const FALLBACK_RESPONSE: &str =
    "I'm sorry, but I couldn't understand your query. Please verify your question and try again.";
/// Tag of [`FALLBACK_RESPONSE`].
pub const FALLBACK_TAG: &str = "unknown";
/// Answer when the data responder fails.
pub const DATA_ERROR_RESPONSE: &str =
    "An error occurred while retrieving data. Please try again later.";
/// Message for missing or blank input.
pub const EMPTY_MESSAGE_RESPONSE: &str = "Please provide a message.";
/// Answer to a student id that is not all digits.
pub const RESULT_FORMAT_RESPONSE: &str = "Please use the correct format: \n434121010021";

/// The text sent back for one utterance, with the tag that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotReply {
    pub response: String,
    pub tag: String,
}

impl BotReply {
    fn new<S: Into<String>>(response: BotResponse, tag: S) -> Self {
        BotReply {
            response: response.into_string(),
            tag: tag.into(),
        }
    }

    fn fallback() -> Self {
        Self::new(BotResponse::plain(FALLBACK_RESPONSE), FALLBACK_TAG)
    }

    /// Whether no intent was resolved.
    pub fn is_fallback(&self) -> bool {
        self.tag == FALLBACK_TAG
    }
}

/// Intermediate results of the pipeline for one utterance.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    pub utterance: Utterance,
    /// `None` when the classifier failed.
    pub classification: Option<ClassificationResult>,
    /// Vocabulary words present in the utterance.
    pub active_words: Vec<String>,
    /// Whether the classification clears the confidence threshold.
    pub confident: bool,
}

/// Runs utterances through the pipeline. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ChatEngine {
    context: Arc<BotContext>,
}

impl ChatEngine {
    pub fn new(context: BotContext) -> Self {
        Self::from_arc(Arc::new(context))
    }

    pub fn from_arc(context: Arc<BotContext>) -> Self {
        ChatEngine { context }
    }

    pub fn context(&self) -> &Arc<BotContext> {
        &self.context
    }

    /// Validate boundary input, then answer it.
    ///
    /// Missing or blank messages are rejected with
    /// [`UnibotError::MalformedInput`].
    pub fn chat(&self, message: Option<&str>) -> Result<BotReply> {
        match message {
            Some(text) if !text.trim().is_empty() => Ok(self.get_bot_response(text)),
            _ => Err(UnibotError::malformed_input(EMPTY_MESSAGE_RESPONSE)),
        }
    }

    /// Answer an utterance. Never fails; unresolved input gets the fallback reply.
    pub fn get_bot_response(&self, raw: &str) -> BotReply {
        let raw = self.truncate(raw);
        let utterance = self.context.normalizer().normalize(&raw);

        let classification = match self.context.classifier().classify(utterance.features.as_slice()) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Classification failed, using pattern matching: {e}");
                None
            }
        };

        self.resolve(&raw, classification.as_ref())
    }

    /// Pick the reply for `raw` given its classification.
    ///
    /// A confident classification is answered from data when the tag has a
    /// data answer; everything else goes to the fuzzy matcher.
    pub fn resolve(&self, raw: &str, classification: Option<&ClassificationResult>) -> BotReply {
        let threshold = self.context.config().confidence_threshold;

        if let Some(result) = classification
            && result.is_confident(threshold)
        {
            match self.context.data().respond_for_tag(&result.tag, raw) {
                Ok(Some(response)) if !response.is_empty() => {
                    debug!("Answered '{}' from data", result.tag);
                    return BotReply::new(response, result.tag.clone());
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Data lookup for '{}' failed: {e}", result.tag);
                    return BotReply::new(BotResponse::plain(DATA_ERROR_RESPONSE), result.tag.clone());
                }
            }
        }

        self.respond_from_catalog(raw)
    }

    fn respond_from_catalog(&self, raw: &str) -> BotReply {
        let context = &self.context;

        let Some(tag) = context.matcher().fuzzy_match(raw, context.catalog()) else {
            debug!("No intent resolved, using fallback");
            return BotReply::fallback();
        };

        context
            .catalog()
            .get(&tag)
            .and_then(|intent| context.selector().select(&intent.responses))
            .map(|text| BotReply::new(BotResponse::canned(text), tag))
            .unwrap_or_else(BotReply::fallback)
    }

    /// Look up a student's result by registration number.
    pub fn lookup_result(&self, raw_id: &str) -> String {
        let id: String = raw_id.trim().chars().filter(|c| *c != ' ').collect();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return RESULT_FORMAT_RESPONSE.to_string();
        }

        match self.context.store().find_student(&id) {
            Ok(Some(student)) => {
                format!("Result of {id} is {}", student.cgpa_display())
            }
            Ok(None) => "Student not found".to_string(),
            Err(e) => {
                warn!("Result lookup for {id} failed: {e}");
                "An error occurred while retrieving the result.".to_string()
            }
        }
    }

    /// Run normalization and classification without resolving a reply.
    pub fn diagnose(&self, raw: &str) -> Diagnosis {
        let raw = self.truncate(raw);
        let normalizer = self.context.normalizer();
        let utterance = normalizer.normalize(&raw);

        let classification = self
            .context
            .classifier()
            .classify(utterance.features.as_slice())
            .ok();
        let confident = classification
            .as_ref()
            .is_some_and(|c| c.is_confident(self.context.config().confidence_threshold));
        let active_words = normalizer
            .active_words(&utterance)
            .into_iter()
            .map(str::to_string)
            .collect();

        Diagnosis {
            utterance,
            classification,
            active_words,
            confident,
        }
    }

    fn truncate<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        let limit = self.context.config().max_utterance_chars;
        match raw.char_indices().nth(limit) {
            Some((end, _)) => {
                warn!("Utterance truncated to {limit} chars");
                Cow::Borrowed(&raw[..end])
            }
            None => Cow::Borrowed(raw),
        }
    }
}
