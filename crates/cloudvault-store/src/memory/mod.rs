//! In-memory record storage.

pub mod store;

pub use store::MemoryStore;
