//! Analyzer trait that combines a tokenizer with token filters.
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 → ... → Filter N → Token Stream
//! ```
//!
//! # Examples
//!
//! ```
//! use unibot::analysis::analyzer::Analyzer;
//! use unibot::analysis::analyzer::pipeline::PipelineAnalyzer;
//!
//! let analyzer = PipelineAnalyzer::english();
//! let tokens: Vec<_> = analyzer.analyze("Show the Holidays!").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[2].text, "holiday");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod pipeline;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so one analyzer can be shared by every
/// request through the bot context.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &str;
}
