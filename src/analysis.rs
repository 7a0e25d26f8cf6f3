//! Text analysis for user utterances.
//!
//! A tokenizer splits the utterance into word units and a chain of filters
//! lowercases and stems them. [`analyzer::pipeline::PipelineAnalyzer`] glues the
//! two together and is what the normalizer runs before vocabulary projection.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
