//! Lexical intent matching against catalog patterns.
//!
//! Used when the classifier is not confident: an exact pattern match wins
//! outright, otherwise the most similar pattern above the threshold decides.

pub mod fuzzy;
pub mod similarity;

pub use fuzzy::{FuzzyMatch, FuzzyMatcher};
