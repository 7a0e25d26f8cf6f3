//! Spelling correction for user utterances.
//!
//! The normalizer runs every utterance through a [`corrector::TextCorrector`]
//! before tokenization. The default [`corrector::SpellingCorrector`] combines a
//! builtin English word list with the words of the intent catalog and the model
//! vocabulary, so domain terms such as "syllabus" or "cgpa" are never "fixed".

pub mod corrector;
pub mod dictionary;
pub mod suggest;
