//! Token filter implementations for token transformation.
//!
//! Filters transform the token stream produced by a tokenizer. The chatbot's
//! normalizer chains [`lowercase::LowercaseFilter`] and [`stem::StemFilter`] so
//! that user words line up with the stemmed vocabulary of the model:
//!
//! ```text
//! Tokenizer → Lowercase → Porter stem → vocabulary projection
//! ```
//!
//! # Examples
//!
//! ```
//! use unibot::analysis::token_filter::Filter;
//! use unibot::analysis::token_filter::lowercase::LowercaseFilter;
//! use unibot::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod stem;
