//! Shared utility modules used across Unibot components.

pub mod levenshtein;
pub mod simd;
