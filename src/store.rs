//! Read access to university records.
//!
//! The chat pipeline only sees the [`UniversityStore`] trait. [`MemoryStore`] is
//! the bundled implementation, loaded from a JSON snapshot.

pub mod memory;
pub mod traits;
pub mod types;

pub use memory::{MemoryStore, StoreSnapshot};
pub use traits::UniversityStore;
pub use types::{Course, Holiday, Student, Teacher};
