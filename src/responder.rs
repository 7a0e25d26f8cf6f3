//! Turning a resolved intent into the text sent back to the user.

pub mod data;
pub mod response;
pub mod selector;

pub use data::{DEPARTMENTS, DataResponder};
pub use response::{BotResponse, ResponseKind};
pub use selector::{FirstSelector, RandomSelector, ResponseSelector, SeededSelector};
