//! Pipeline analyzer that combines a tokenizer and token filters.
//!
//! Filters run in the order they were added. The chatbot uses
//! [`PipelineAnalyzer::english`] (Unicode words, lowercase, Porter stem) unless a
//! custom token pattern is configured.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use unibot::analysis::analyzer::Analyzer;
//! use unibot::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use unibot::analysis::token_filter::lowercase::LowercaseFilter;
//! use unibot::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
//! let analyzer = PipelineAnalyzer::new(tokenizer)
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .with_name("lowercase_only");
//!
//! let tokens: Vec<_> = analyzer.analyze("Hello WORLD").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(analyzer.name(), "lowercase_only");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Unicode word tokenizer followed by lowercase and Porter stem filters.
    pub fn english() -> Self {
        Self::new(Arc::new(UnicodeWordTokenizer::new())).with_english_filters()
    }

    /// Like [`english`](Self::english), but tokenizing with a custom regex.
    pub fn english_with_pattern(pattern: &str) -> Result<Self> {
        let tokenizer = RegexTokenizer::with_pattern(pattern)?;
        Ok(Self::new(Arc::new(tokenizer)).with_english_filters())
    }

    fn with_english_filters(self) -> Self {
        self.add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StemFilter::new()))
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filters: Vec<&str> = self.filters.iter().map(|filter| filter.name()).collect();
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &filters)
            .finish()
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_pipeline_analyzer() {
        let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
        let analyzer = PipelineAnalyzer::new(tokenizer).add_filter(Arc::new(LowercaseFilter::new()));

        let tokens: Vec<Token> = analyzer.analyze("Hello World").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(analyzer.name(), "pipeline_regex");
    }

    #[test]
    fn test_english_pipeline() {
        let analyzer = PipelineAnalyzer::english();
        let tokens: Vec<String> = analyzer
            .analyze("What COURSES are offered?")
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(tokens, vec!["what", "cours", "ar", "offer"]);
        assert_eq!(analyzer.filters().len(), 2);
        assert_eq!(analyzer.tokenizer().name(), "unicode_word");
    }

    #[test]
    fn test_punctuation_only_input() {
        let analyzer = PipelineAnalyzer::english();
        assert_eq!(analyzer.analyze("?!...").unwrap().count(), 0);
        assert_eq!(analyzer.analyze("").unwrap().count(), 0);
    }

    #[test]
    fn test_english_with_pattern() {
        let analyzer = PipelineAnalyzer::english_with_pattern(r"[A-Za-z&]+").unwrap();
        let tokens: Vec<String> = analyzer.analyze("AI&DS faculty").unwrap().map(|t| t.text).collect();

        assert_eq!(tokens, vec!["ai&ds", "faculti"]);
        assert!(PipelineAnalyzer::english_with_pattern("[").is_err());
    }

    #[test]
    fn test_debug_lists_filters() {
        let debug = format!("{:?}", PipelineAnalyzer::english());
        assert!(debug.contains("lowercase"));
        assert!(debug.contains("stem"));
    }
}
