//! # Unibot
//!
//! Intent resolution for a university information chatbot.
//!
//! ## Features
//!
//! - Spelling correction, Porter stemming and bag-of-words vectorization
//! - Pretrained feed-forward intent classifier with scalar, SIMD and parallel backends
//! - Exact and fuzzy pattern matching over a static intent catalog
//! - Data-backed answers for students, faculty, courses, syllabi and holidays
//! - CLI and HTTP front ends
//!
//! ## Example
//!
//! ```rust,no_run
//! use unibot::chat::{BotContext, ChatEngine};
//! use unibot::config::BotConfig;
//!
//! # fn main() -> unibot::error::Result<()> {
//! let context = BotContext::load(
//!     BotConfig::default(),
//!     "data/intents.json",
//!     "data/model.json",
//!     Some("data/university.json"),
//! )?;
//! let engine = ChatEngine::new(context);
//!
//! let reply = engine.get_bot_response("list of holidays");
//! println!("[{}] {}", reply.tag, reply.response);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod catalog;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod ml;
pub mod normalizer;
pub mod responder;
pub mod server;
pub mod spelling;
pub mod store;
pub mod util;

pub mod prelude {
    pub use crate::catalog::{Intent, IntentCatalog};
    pub use crate::chat::{BotContext, BotReply, ChatEngine};
    pub use crate::config::BotConfig;
    pub use crate::error::{Result, UnibotError};
    pub use crate::ml::backend::ComputeBackend;
    pub use crate::store::{MemoryStore, UniversityStore};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
