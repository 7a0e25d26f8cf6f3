//! The intent-resolution pipeline.
//!
//! ```text
//! utterance → TextNormalizer → IntentClassifier ─ confident ─→ DataResponder
//!                                    │                             │ no answer
//!                                    └──── otherwise ──→ FuzzyMatcher → canned response
//!                                                              │ no match
//!                                                              └──→ fallback ("unknown")
//! ```
//!
//! [`BotContext`] holds everything loaded at startup and is shared behind an
//! `Arc`; [`ChatEngine`] runs requests against it.

pub mod context;
pub mod engine;

pub use context::BotContext;
pub use engine::{BotReply, ChatEngine, Diagnosis};
