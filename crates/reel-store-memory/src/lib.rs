//! In-memory backend for the Reel movie store.
//!
//! Movies live in a single ordered `Vec` behind an async `RwLock`; nothing is
//! persisted across restarts. A JSON seed file can pre-populate the store.

mod seed;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use seed::parse_seed;
pub use store::MemoryStore;
